#![no_main]

use juxta_core::config::SliderConfig;
use juxta_harness::Harness;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = serde_json::from_str::<SliderConfig>(text) else {
        return;
    };
    // Mounting must agree with validation and never panic.
    let valid = config.validate().is_ok();
    assert_eq!(Harness::new(config).is_ok(), valid);
});
