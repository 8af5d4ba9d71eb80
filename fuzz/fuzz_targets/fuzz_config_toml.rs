#![no_main]

use glide_core::config::CarouselConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = CarouselConfig::from_toml_str(text) {
        assert!(config.is_valid(), "loader accepted an invalid config");
        assert_eq!(config.clone().validated(), config);
    }
    let _ = CarouselConfig::from_json_str(text);
});
