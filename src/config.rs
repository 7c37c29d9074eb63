use std::time::Duration;

/// Environment variable naming the display to flash.
pub const TARGET_ENV_VAR: &str = "EINK_DISPLAY_NAME";

/// Display name used when [`TARGET_ENV_VAR`] is unset.
pub const DEFAULT_TARGET_NAME: &str = "EINK";

/// How long the white overlay stays on screen.
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Settings captured once at startup.
#[derive(Clone, Debug)]
pub struct FlashSettings {
    /// Name of the display as reported by the system display report.
    pub target_name: String,
    pub duration: Duration,
}

impl FlashSettings {
    /// Read the target name from the environment.
    pub fn from_env() -> Self {
        let value = std::env::var(TARGET_ENV_VAR).ok();
        if value.is_none() {
            log::debug!("{} not set, using default '{}'", TARGET_ENV_VAR, DEFAULT_TARGET_NAME);
        }
        Self {
            target_name: target_name_from(value),
            duration: FLASH_DURATION,
        }
    }
}

/// Resolve the target display name from an optional override.
///
/// The override is taken verbatim, including an empty string.
pub fn target_name_from(value: Option<String>) -> String {
    value.unwrap_or_else(|| DEFAULT_TARGET_NAME.to_string())
}
