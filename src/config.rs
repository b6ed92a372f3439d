use crate::models::{SpringParams, SwipeThresholds};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub swipe: SwipeSettings,
    #[serde(default)]
    pub spring: SpringSettings,
    #[serde(default)]
    pub otp: OtpSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeSettings {
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f64,
    #[serde(default = "default_exit_duration_ms")]
    pub exit_duration_ms: u64,
    #[serde(default = "default_screen_width")]
    pub screen_width: f64,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            commit_threshold: default_commit_threshold(),
            exit_duration_ms: default_exit_duration_ms(),
            screen_width: default_screen_width(),
        }
    }
}

impl SwipeSettings {
    pub fn thresholds(&self) -> SwipeThresholds {
        SwipeThresholds {
            commit_threshold: self.commit_threshold,
            exit_duration: Duration::from_millis(self.exit_duration_ms),
            screen_width: self.screen_width,
        }
    }
}

fn default_commit_threshold() -> f64 { 100.0 }
fn default_exit_duration_ms() -> u64 { 300 }
fn default_screen_width() -> f64 { 390.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SpringSettings {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_rest_threshold")]
    pub rest_displacement: f64,
    #[serde(default = "default_rest_threshold")]
    pub rest_speed: f64,
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_displacement: default_rest_threshold(),
            rest_speed: default_rest_threshold(),
        }
    }
}

impl SpringSettings {
    pub fn params(&self) -> SpringParams {
        SpringParams {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            rest_displacement: self.rest_displacement,
            rest_speed: self.rest_speed,
        }
    }
}

fn default_stiffness() -> f64 { 230.2 }
fn default_damping() -> f64 { 22.0 }
fn default_mass() -> f64 { 1.0 }
fn default_rest_threshold() -> f64 { 0.001 }

#[derive(Debug, Clone, Deserialize)]
pub struct OtpSettings {
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_resend_cooldown_secs")]
    pub resend_cooldown_secs: u32,
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            resend_cooldown_secs: default_resend_cooldown_secs(),
            verify_delay_ms: default_verify_delay_ms(),
        }
    }
}

fn default_code_length() -> usize { 4 }
fn default_resend_cooldown_secs() -> u32 { 30 }
fn default_verify_delay_ms() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSettings {
    pub candidates_path: Option<String>,
    pub script_path: Option<String>,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_true")]
    pub realtime: bool,
    #[serde(default)]
    pub backend_latency_ms: u64,
    /// Runs the login stub for this number before swiping
    pub mobile_number: Option<String>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            candidates_path: None,
            script_path: None,
            frame_interval_ms: default_frame_interval_ms(),
            realtime: default_true(),
            backend_latency_ms: 0,
            mobile_number: None,
        }
    }
}

fn default_frame_interval_ms() -> u64 { 16 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CLIK__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CLIK__SWIPE__COMMIT_THRESHOLD -> swipe.commit_threshold
            .add_source(env_source())
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Reject values the gesture and spring math cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("swipe.commit_threshold", self.swipe.commit_threshold)?;
        require_positive("swipe.screen_width", self.swipe.screen_width)?;
        require_positive("spring.stiffness", self.spring.stiffness)?;
        require_positive("spring.mass", self.spring.mass)?;
        if !self.spring.damping.is_finite() || self.spring.damping < 0.0 {
            return Err(ConfigError::Message(format!(
                "spring.damping must be a finite non-negative number, got {}",
                self.spring.damping
            )));
        }
        require_positive("spring.rest_displacement", self.spring.rest_displacement)?;
        require_positive("spring.rest_speed", self.spring.rest_speed)?;
        Ok(())
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

fn require_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Message(format!(
            "{} must be a finite positive number, got {}",
            key, value
        )))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("CLIK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_swipe_settings() {
        let thresholds = SwipeSettings::default().thresholds();
        assert_eq!(thresholds, SwipeThresholds::default());
    }

    #[test]
    fn test_default_spring_settings() {
        assert_eq!(SpringSettings::default().params(), SpringParams::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [swipe]
                commit_threshold = 120.0

                [otp]
                code_length = 6
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.swipe.commit_threshold, 120.0);
        assert_eq!(settings.swipe.exit_duration_ms, 300);
        assert_eq!(settings.otp.code_length, 6);
        assert_eq!(settings.otp.resend_cooldown_secs, 30);
        assert!(settings.simulation.candidates_path.is_none());
    }

    fn rejected(settings: &Settings, key: &str) -> bool {
        match settings.validate() {
            Err(ConfigError::Message(message)) => message.starts_with(key),
            _ => false,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_commit_threshold() {
        for value in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let mut settings = Settings::default();
            settings.swipe.commit_threshold = value;
            assert!(rejected(&settings, "swipe.commit_threshold"), "accepted {}", value);
        }
    }

    #[test]
    fn test_rejects_bad_screen_width() {
        for value in [0.0, -390.0, f64::NAN] {
            let mut settings = Settings::default();
            settings.swipe.screen_width = value;
            assert!(rejected(&settings, "swipe.screen_width"), "accepted {}", value);
        }
    }

    #[test]
    fn test_rejects_bad_mass() {
        for value in [0.0, -1.0, f64::NAN] {
            let mut settings = Settings::default();
            settings.spring.mass = value;
            assert!(rejected(&settings, "spring.mass"), "accepted {}", value);
        }
    }

    #[test]
    fn test_rejects_bad_stiffness() {
        for value in [0.0, -230.2, f64::INFINITY] {
            let mut settings = Settings::default();
            settings.spring.stiffness = value;
            assert!(rejected(&settings, "spring.stiffness"), "accepted {}", value);
        }
    }

    #[test]
    fn test_damping_may_be_zero_but_not_negative() {
        let mut settings = Settings::default();
        settings.spring.damping = 0.0;
        assert!(settings.validate().is_ok());

        settings.spring.damping = -22.0;
        assert!(rejected(&settings, "spring.damping"));
        settings.spring.damping = f64::NAN;
        assert!(rejected(&settings, "spring.damping"));
    }

    #[test]
    fn test_rejects_bad_rest_thresholds() {
        let mut settings = Settings::default();
        settings.spring.rest_displacement = 0.0;
        assert!(rejected(&settings, "spring.rest_displacement"));

        let mut settings = Settings::default();
        settings.spring.rest_speed = -0.001;
        assert!(rejected(&settings, "spring.rest_speed"));
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("clik-invalid-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[spring]\nmass = 0.0\n").unwrap();

        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn test_load_from_env_overrides_file_and_defaults() {
        let path = std::env::temp_dir().join(format!("clik-layered-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[swipe]\ncommit_threshold = 80.0\nscreen_width = 400.0\n\n[otp]\ncode_length = 6\n",
        )
        .unwrap();
        std::env::set_var("CLIK__SWIPE__COMMIT_THRESHOLD", "120");

        let result = Settings::load_from(&path);
        std::env::remove_var("CLIK__SWIPE__COMMIT_THRESHOLD");
        std::fs::remove_file(&path).unwrap();
        let settings = result.unwrap();

        // Environment beats file, file beats serde defaults
        assert_eq!(settings.swipe.commit_threshold, 120.0);
        assert_eq!(settings.swipe.screen_width, 400.0);
        assert_eq!(settings.otp.code_length, 6);
        assert_eq!(settings.swipe.exit_duration_ms, 300);
        assert_eq!(settings.spring.mass, 1.0);
    }
}
