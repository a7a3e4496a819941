use std::sync::OnceLock;

use super::core::FirmrankConfig;
use super::loader::load_config;
use crate::observability::{set_phase, Phase};

/// Cache the configuration
static CONFIG: OnceLock<FirmrankConfig> = OnceLock::new();

/// Get the cached configuration
pub fn get_config() -> &'static FirmrankConfig {
    CONFIG.get_or_init(|| {
        let _phase = set_phase(Phase::ConfigLoading);
        load_config()
    })
}
