//! `wasm-bindgen` exports.

use std::rc::Rc;

use juxta_core::config::SliderConfig;
use juxta_core::error::{Recovery, SliderError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::console::ConsoleMakeWriter;
use super::host::SliderCell;
use super::install_panic_hook;
use crate::contract::{CONTAINER_SELECTOR, REDUCED_MOTION_QUERY};
use crate::logging::parse_filter;
use crate::resolve_config;

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .is_some_and(|query| query.matches())
}

fn config_from_js(config_json: Option<String>) -> Result<SliderConfig, JsValue> {
    resolve_config(config_json.as_deref(), prefers_reduced_motion()).map_err(|err| {
        tracing::warn!(message = "slider.config_rejected", error = %err);
        JsValue::from_str(&err.to_string())
    })
}

/// Mount one container, logging failures according to their severity.
fn mount_logged(container: HtmlElement, config: SliderConfig) -> Result<Rc<SliderCell>, SliderError> {
    SliderCell::mount(container, config).inspect_err(|err| {
        if err.is_benign() {
            tracing::debug!(
                message = "slider.skipped",
                error_type = err.error_type(),
                error = %err
            );
        } else {
            tracing::error!(
                message = "slider.mount_failed",
                error_type = err.error_type(),
                error = %err
            );
        }
    })
}

/// Route `tracing` output to the browser console.
///
/// `filter` is an `EnvFilter` directive such as `"info"` or
/// `"warn,juxta_widget=debug"`. Fails if the directive is invalid or a
/// subscriber is already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(filter: &str) -> Result<(), JsValue> {
    install_panic_hook();
    let filter = parse_filter(filter).map_err(|err| JsValue::from_str(&err))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(ConsoleMakeWriter)
                .with_ansi(false)
                .without_time(),
        )
        .with(filter)
        .try_init()
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Mount a slider on every `.comparison-slider` container in the document.
///
/// A container that fails to mount is skipped; the others are unaffected.
/// A rejected config fails the whole call since every container would
/// reject it.
#[wasm_bindgen(js_name = initComparisonSliders)]
pub fn init_comparison_sliders(config_json: Option<String>) -> Result<SliderRegistry, JsValue> {
    install_panic_hook();
    let config = config_from_js(config_json)?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let containers = document.query_selector_all(CONTAINER_SELECTOR)?;

    let found = containers.length();
    let mut sliders = Vec::new();
    let mut skipped = 0u32;
    for index in 0..found {
        let Some(container) = containers
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            skipped += 1;
            continue;
        };
        match mount_logged(container, config.clone()) {
            Ok(cell) => sliders.push(cell),
            Err(err) if err.recovery() == Recovery::AbortInit => {
                for cell in &sliders {
                    cell.dispose();
                }
                return Err(JsValue::from_str(&err.to_string()));
            }
            Err(_) => skipped += 1,
        }
    }

    tracing::info!(
        message = "slider.init",
        found,
        mounted = sliders.len(),
        skipped
    );
    Ok(SliderRegistry { sliders })
}

/// Mount a slider on a single container.
///
/// Returns `undefined` when the container does not have the slider markup
/// or could not be bound.
#[wasm_bindgen(js_name = mountComparisonSlider)]
pub fn mount_comparison_slider(
    container: HtmlElement,
    config_json: Option<String>,
) -> Result<Option<SliderHandle>, JsValue> {
    install_panic_hook();
    let config = config_from_js(config_json)?;
    match mount_logged(container, config) {
        Ok(cell) => Ok(Some(SliderHandle { cell })),
        Err(err) if err.recovery() == Recovery::AbortInit => {
            Err(JsValue::from_str(&err.to_string()))
        }
        Err(_) => Ok(None),
    }
}

/// A mounted slider.
///
/// The slider stays live while this handle exists or until
/// [`SliderHandle::dispose`] is called.
#[wasm_bindgen]
pub struct SliderHandle {
    cell: Rc<SliderCell>,
}

#[wasm_bindgen]
impl SliderHandle {
    /// Move to `target` (clamped to the slider's domain).
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, target: f64, smooth: Option<bool>) {
        self.cell.set_position(target, smooth.unwrap_or(true));
    }

    /// Displayed position, or `undefined` while a callback holds the slider.
    pub fn position(&self) -> Option<f64> {
        self.cell.position()
    }

    /// Per-page instance number used in log events.
    pub fn instance(&self) -> Option<f64> {
        self.cell.instance().map(|id| id as f64)
    }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool {
        self.cell.is_disposed()
    }

    /// Detach every listener and stop all pending work. Idempotent.
    pub fn dispose(&self) {
        self.cell.dispose();
    }
}

/// Every slider mounted by `initComparisonSliders`.
#[wasm_bindgen]
pub struct SliderRegistry {
    sliders: Vec<Rc<SliderCell>>,
}

#[wasm_bindgen]
impl SliderRegistry {
    /// Number of mounted sliders.
    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    /// Handle for the slider at `index`, in document order.
    pub fn get(&self, index: usize) -> Option<SliderHandle> {
        self.sliders.get(index).map(|cell| SliderHandle {
            cell: Rc::clone(cell),
        })
    }

    /// Displayed position of the slider at `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        self.sliders.get(index).and_then(|cell| cell.position())
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, index: usize, target: f64, smooth: Option<bool>) -> bool {
        let Some(cell) = self.sliders.get(index) else {
            return false;
        };
        cell.set_position(target, smooth.unwrap_or(true));
        true
    }

    /// Dispose every slider. Idempotent.
    pub fn dispose(&self) {
        for cell in &self.sliders {
            cell.dispose();
        }
        tracing::debug!(message = "slider.registry_dispose", count = self.sliders.len());
    }
}
