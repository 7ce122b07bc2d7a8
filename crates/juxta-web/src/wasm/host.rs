//! DOM backend for one slider and the listeners that feed it.
//!
//! A [`SliderCell`] owns the widget, its [`WebHost`], every event listener,
//! and the intersection observer. Callbacks hold only a `Weak` reference to
//! the cell, so dropping the last strong reference (or disposing) detaches
//! everything. Frames and timers are gloo handles kept in per-host tables;
//! dropping a handle cancels it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use core::time::Duration;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use juxta_backend::{AnimationDriver, SliderClock, SliderSurface, TimerDriver};
use juxta_core::config::SliderConfig;
use juxta_core::error::{Result, SliderError};
use juxta_core::event::{
    ClickEvent, EventOutcome, InputEvent, InteractionKind, KeyCode, KeyEvent, Modifiers,
    MouseButton, PointerKind,
};
use juxta_core::geometry::WrapperRect;
use juxta_core::handle::{FrameHandle, RippleId, TimerHandle, TimerKind};
use juxta_core::visual::{AccessibilityAttributes, Ripple, VisualFrame};
use juxta_widget::ComparisonSlider;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, Node,
    TouchEvent,
};
use web_time::Instant;

use super::js_error_message;
use crate::contract::{
    DRAG_CURSOR, DRAGGING_CLASS, IDLE_CURSOR, Part, RIPPLE_CLASS, timeout_millis,
};
use crate::style::{self, FOCUS_RING_SHADOW, FrameStyles};

fn init_failure(msg: impl Into<String>) -> SliderError {
    SliderError::InitializationFailure(msg.into())
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

fn set_attr(el: &Element, name: &str, value: &str) {
    let _ = el.set_attribute(name, value);
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// Elements of one slider container.
pub(crate) struct SliderParts {
    container: HtmlElement,
    wrapper: HtmlElement,
    handle: HtmlElement,
    after: HtmlElement,
    before_label: Option<HtmlElement>,
    after_label: Option<HtmlElement>,
    button: Option<HtmlElement>,
    instructions: Option<HtmlElement>,
}

impl SliderParts {
    /// Resolve every part below `container`, failing on the first missing
    /// required one.
    pub(crate) fn query(container: HtmlElement) -> Result<Self> {
        let wrapper = required(&container, Part::Wrapper)?;
        let handle = required(&container, Part::Handle)?;
        let after = required(&container, Part::After)?;
        Ok(Self {
            before_label: find(&container, Part::BeforeLabel)?,
            after_label: find(&container, Part::AfterLabel)?,
            button: find(&container, Part::HandleButton)?,
            instructions: find(&container, Part::Instructions)?,
            container,
            wrapper,
            handle,
            after,
        })
    }
}

fn find(container: &HtmlElement, part: Part) -> Result<Option<HtmlElement>> {
    let found = container
        .query_selector(part.selector())
        .map_err(|err| init_failure(js_error_message(&err)))?;
    found
        .map(|el| {
            el.dyn_into::<HtmlElement>()
                .map_err(|_| init_failure(format!("{} is not an HTML element", part.name())))
        })
        .transpose()
}

fn required(container: &HtmlElement, part: Part) -> Result<HtmlElement> {
    debug_assert!(part.is_required());
    find(container, part)?.ok_or(SliderError::StructuralMismatch {
        missing: part.name(),
    })
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// [`juxta_backend::Backend`] over one container's DOM.
pub(crate) struct WebHost {
    parts: SliderParts,
    document: Document,
    cell: Weak<SliderCell>,
    epoch: Instant,
    next_id: u64,
    frames: HashMap<u64, AnimationFrame>,
    timers: HashMap<u64, Timeout>,
    ripples: HashMap<RippleId, Element>,
    ripple_ms: u64,
}

impl WebHost {
    fn new(parts: SliderParts, document: Document, cell: Weak<SliderCell>, ripple_ms: u64) -> Self {
        Self {
            parts,
            document,
            cell,
            epoch: Instant::now(),
            next_id: 0,
            frames: HashMap::new(),
            timers: HashMap::new(),
            ripples: HashMap::new(),
            ripple_ms,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Drop every outstanding frame, timer, and ripple element.
    fn release_all(&mut self) {
        self.frames.clear();
        self.timers.clear();
        for (_, ripple) in self.ripples.drain() {
            ripple.remove();
        }
    }
}

impl SliderClock for WebHost {
    fn now_mono(&self) -> Duration {
        self.epoch.elapsed()
    }
}

impl AnimationDriver for WebHost {
    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        let cell = self.cell.clone();
        let frame = request_animation_frame(move |_| {
            if let Some(cell) = cell.upgrade() {
                cell.on_frame(handle);
            }
        });
        self.frames.insert(handle.0, frame);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.remove(&handle.0);
    }
}

impl TimerDriver for WebHost {
    fn start_timer(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        let cell = self.cell.clone();
        let timeout = Timeout::new(timeout_millis(delay), move || {
            if let Some(cell) = cell.upgrade() {
                cell.on_timer(kind, handle);
            }
        });
        self.timers.insert(handle.0, timeout);
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle.0);
    }
}

impl SliderSurface for WebHost {
    fn wrapper_rect(&self) -> WrapperRect {
        let rect = self.parts.wrapper.get_bounding_client_rect();
        WrapperRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn has_instructions(&self) -> bool {
        self.parts.instructions.is_some()
    }

    fn present(&mut self, frame: &VisualFrame) {
        let styles = FrameStyles::from_frame(frame);
        let parts = &self.parts;
        set_style(&parts.handle, "left", style::HANDLE_LEFT);
        set_style(&parts.handle, "transform", &styles.handle_transform);
        set_style(&parts.after, "clip-path", &styles.after_clip);
        if let Some(label) = &parts.before_label {
            set_style(label, "opacity", &styles.before_opacity);
            set_style(label, "transform", &styles.before_transform);
        }
        if let Some(label) = &parts.after_label {
            set_style(label, "opacity", &styles.after_opacity);
            set_style(label, "transform", &styles.after_transform);
        }
        if let Some(button) = &parts.button {
            set_style(button, "transform", &styles.button_transform);
        }
        set_attr(&parts.handle, "aria-valuenow", &styles.aria_value_now);
    }

    fn set_accessibility(&mut self, attrs: &AccessibilityAttributes) {
        let handle = &self.parts.handle;
        set_attr(handle, "role", attrs.role);
        set_attr(handle, "tabindex", &attrs.tab_index.to_string());
        set_attr(handle, "aria-valuemin", &attrs.value_min.to_string());
        set_attr(handle, "aria-valuemax", &attrs.value_max.to_string());
        set_attr(handle, "aria-valuenow", &attrs.value_now.to_string());
        set_attr(handle, "aria-orientation", attrs.orientation);
        set_attr(handle, "aria-label", &attrs.label);
        if let (Some(id), Some(instructions)) = (&attrs.described_by, &self.parts.instructions) {
            instructions.set_id(id);
            set_attr(handle, "aria-describedby", id);
        }
    }

    fn set_drag_feedback(&mut self, active: bool) {
        let parts = &self.parts;
        let _ = parts.handle.class_list().toggle_with_force(DRAGGING_CLASS, active);
        let _ = parts.wrapper.class_list().toggle_with_force(DRAGGING_CLASS, active);
        set_style(
            &parts.handle,
            "cursor",
            if active { DRAG_CURSOR } else { IDLE_CURSOR },
        );
        let Some(body) = self.document.body() else {
            return;
        };
        if active {
            set_style(&body, "user-select", "none");
            set_style(&body, "cursor", DRAG_CURSOR);
        } else {
            clear_style(&body, "user-select");
            clear_style(&body, "cursor");
        }
    }

    fn set_focus_ring(&mut self, visible: bool) {
        if visible {
            set_style(&self.parts.handle, "box-shadow", FOCUS_RING_SHADOW);
        } else {
            clear_style(&self.parts.handle, "box-shadow");
        }
    }

    fn spawn_ripple(&mut self, ripple: Ripple) {
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        el.set_class_name(RIPPLE_CLASS);
        set_attr(&el, "style", &style::ripple_css(&ripple, self.ripple_ms));
        if self.parts.wrapper.append_child(&el).is_ok() {
            self.ripples.insert(ripple.id, el);
        }
    }

    fn remove_ripple(&mut self, id: RippleId) {
        if let Some(el) = self.ripples.remove(&id) {
            el.remove();
        }
    }
}

// ---------------------------------------------------------------------------
// Slider cell
// ---------------------------------------------------------------------------

struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// A mounted slider with its host and DOM subscriptions.
pub(crate) struct SliderCell {
    slider: RefCell<Option<ComparisonSlider>>,
    host: RefCell<WebHost>,
    document: Document,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<VisibilityObserver>>,
    /// Last intersection ratio, replayed when the document becomes visible.
    last_ratio: Cell<f64>,
}

impl SliderCell {
    /// Bind a slider to `container`.
    pub(crate) fn mount(container: HtmlElement, config: SliderConfig) -> Result<Rc<Self>> {
        let parts = SliderParts::query(container)?;
        let window = web_sys::window().ok_or_else(|| init_failure("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| init_failure("no document"))?;
        let threshold = config.auto_play.visibility_threshold;
        let ripple_ms = config.ripple_ms;

        let cell = Rc::new_cyclic(|weak| Self {
            slider: RefCell::new(None),
            host: RefCell::new(WebHost::new(parts, document.clone(), weak.clone(), ripple_ms)),
            document,
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
            last_ratio: Cell::new(0.0),
        });

        let slider = ComparisonSlider::mount(config, &mut *cell.host.borrow_mut())?;
        *cell.slider.borrow_mut() = Some(slider);

        cell.install_listeners(&window);
        if let Err(err) = cell.observe(threshold) {
            cell.dispose();
            return Err(err);
        }
        Ok(cell)
    }

    pub(crate) fn instance(&self) -> Option<u64> {
        let slider = self.slider.try_borrow().ok()?;
        slider.as_ref().map(ComparisonSlider::instance)
    }

    pub(crate) fn position(&self) -> Option<f64> {
        let slider = self.slider.try_borrow().ok()?;
        slider.as_ref().map(ComparisonSlider::position)
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.slider
            .try_borrow()
            .map(|s| s.as_ref().is_none_or(ComparisonSlider::is_disposed))
            .unwrap_or(false)
    }

    pub(crate) fn set_position(&self, target: f64, smooth: bool) {
        self.with_slider(|slider, host| slider.set_position(target, smooth, host));
    }

    /// Detach every listener and observer and stop all pending work.
    pub(crate) fn dispose(&self) {
        self.listeners.borrow_mut().clear();
        self.observer.borrow_mut().take();
        self.with_slider(|slider, host| {
            slider.dispose(host);
            host.release_all();
        });
    }

    fn with_slider<R>(
        &self,
        f: impl FnOnce(&mut ComparisonSlider, &mut WebHost) -> R,
    ) -> Option<R> {
        let (Ok(mut slider), Ok(mut host)) =
            (self.slider.try_borrow_mut(), self.host.try_borrow_mut())
        else {
            tracing::debug!(message = "slider.reentrant_callback");
            return None;
        };
        let slider = slider.as_mut()?;
        Some(f(slider, &mut host))
    }

    fn dispatch(&self, input: InputEvent) -> EventOutcome {
        self.with_slider(|slider, host| slider.handle_event(&input, host))
            .unwrap_or(EventOutcome::IGNORED)
    }

    /// Dispatch and suppress the native default when the widget asks for it.
    fn forward(&self, event: &Event, input: InputEvent) {
        if self.dispatch(input).prevent_default {
            event.prevent_default();
        }
    }

    fn on_frame(&self, handle: FrameHandle) {
        self.with_slider(|slider, host| {
            host.frames.remove(&handle.0);
            slider.on_frame(handle, host);
        });
    }

    fn on_timer(&self, kind: TimerKind, handle: TimerHandle) {
        self.with_slider(|slider, host| {
            host.timers.remove(&handle.0);
            slider.on_timer(kind, handle, host);
        });
    }

    fn listen<F>(self: &Rc<Self>, target: &EventTarget, event_type: &'static str, passive: bool, mut handler: F)
    where
        F: FnMut(&Self, &Event) + 'static,
    {
        let weak = Rc::downgrade(self);
        let listener = EventListener::new_with_options(
            target,
            event_type,
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive,
            },
            move |event: &Event| {
                if let Some(cell) = weak.upgrade() {
                    handler(&cell, event);
                }
            },
        );
        self.listeners.borrow_mut().push(listener);
    }

    fn install_listeners(self: &Rc<Self>, window: &web_sys::Window) {
        let (container, wrapper, handle) = {
            let host = self.host.borrow();
            (
                host.parts.container.clone(),
                host.parts.wrapper.clone(),
                host.parts.handle.clone(),
            )
        };
        let document = self.document.clone();

        // Handle: drag start and keyboard.
        self.listen(&handle, "mousedown", false, |cell, event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            cell.forward(
                event,
                InputEvent::PointerDown {
                    kind: PointerKind::Mouse,
                    button: MouseButton::from_dom(mouse.button()),
                },
            );
        });
        self.listen(&handle, "touchstart", false, |cell, event| {
            cell.forward(
                event,
                InputEvent::PointerDown {
                    kind: PointerKind::Touch,
                    button: MouseButton::Primary,
                },
            );
        });
        self.listen(&handle, "keydown", false, |cell, event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            cell.forward(event, InputEvent::Key(key_event(key)));
        });

        // Wrapper: click to position.
        let handle_node: Node = handle.clone().into();
        self.listen(&wrapper, "click", true, move |cell, event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let mut click = ClickEvent::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let on_handle = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| handle_node.contains(Some(&node)));
            if on_handle {
                click = click.on_handle();
            }
            cell.forward(event, InputEvent::Click(click));
        });

        // Container: any interaction stops the sweep.
        for (event_type, kind) in [
            ("mousedown", InteractionKind::Press),
            ("touchstart", InteractionKind::TouchStart),
            ("keydown", InteractionKind::KeyDown),
            ("click", InteractionKind::Click),
        ] {
            self.listen(&container, event_type, true, move |cell, _| {
                cell.dispatch(InputEvent::Interaction(kind));
            });
        }

        // Document: drag tracking continues outside the container.
        self.listen(&document, "mousemove", false, |cell, event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            cell.forward(
                event,
                InputEvent::PointerMove {
                    kind: PointerKind::Mouse,
                    client_x: f64::from(mouse.client_x()),
                },
            );
        });
        self.listen(&document, "touchmove", false, |cell, event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|touch| touch.touches().get(0))
            else {
                return;
            };
            cell.forward(
                event,
                InputEvent::PointerMove {
                    kind: PointerKind::Touch,
                    client_x: f64::from(touch.client_x()),
                },
            );
        });
        self.listen(&document, "mouseup", true, |cell, _| {
            cell.dispatch(InputEvent::PointerUp {
                kind: PointerKind::Mouse,
            });
        });
        self.listen(&document, "touchend", true, |cell, _| {
            cell.dispatch(InputEvent::PointerUp {
                kind: PointerKind::Touch,
            });
        });

        self.listen(window, "resize", true, |cell, _| {
            cell.dispatch(InputEvent::Resize);
        });
        self.listen(&document, "visibilitychange", true, |cell, _| {
            let ratio = if cell.document.hidden() {
                0.0
            } else {
                cell.last_ratio.get()
            };
            cell.dispatch(InputEvent::Visibility { ratio });
        });
    }

    fn observe(self: &Rc<Self>, threshold: f64) -> Result<()> {
        let container = self.host.borrow().parts.container.clone();
        let weak = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let Some(cell) = weak.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let ratio = entry.intersection_ratio();
                    cell.last_ratio.set(ratio);
                    if !cell.document.hidden() {
                        cell.dispatch(InputEvent::Visibility { ratio });
                    }
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|err| init_failure(js_error_message(&err)))?;
        observer.observe(&container);
        *self.observer.borrow_mut() = Some(VisibilityObserver {
            observer,
            _callback: callback,
        });
        Ok(())
    }
}

impl Drop for SliderCell {
    /// Restore page-level styles when JS frees the last handle without
    /// calling `dispose`.
    fn drop(&mut self) {
        self.dispose();
    }
}

fn key_event(key: &KeyboardEvent) -> KeyEvent {
    let mut modifiers = Modifiers::NONE;
    if key.shift_key() {
        modifiers |= Modifiers::SHIFT;
    }
    if key.alt_key() {
        modifiers |= Modifiers::ALT;
    }
    if key.ctrl_key() {
        modifiers |= Modifiers::CTRL;
    }
    if key.meta_key() {
        modifiers |= Modifiers::SUPER;
    }
    KeyEvent::new(KeyCode::from_dom_key(&key.key())).with_modifiers(modifiers)
}
