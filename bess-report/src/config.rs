//! Session configuration as JSON
//!
//! Missing keys take their defaults, so `{}` is a valid file. Values are
//! checked with [`SessionConfig::validate`] before being handed back.

use bess_core::SessionConfig;

use crate::error::ReportResult;

/// Parse and validate a session configuration
pub fn load_config(json: &str) -> ReportResult<SessionConfig> {
    let config: SessionConfig = serde_json::from_str(json)?;
    config.validate()?;
    log::debug!(
        "Loaded session config: {} calibration frames, {} s trial",
        config.calibration_frames,
        config.test_duration_s
    );
    Ok(config)
}

/// Pretty-printed JSON for a configuration, e.g. to seed a settings file
pub fn to_json(config: &SessionConfig) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
