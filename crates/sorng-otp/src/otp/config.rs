//! Immutable OTP configuration.
//!
//! Digits, period and verification window are validated once at
//! construction and then passed explicitly to every operation. A config
//! deserialised from JSON goes through the same validation.

use serde::{Deserialize, Serialize};

use crate::otp::types::{Digits, OtpError};

pub const DEFAULT_DIGITS: Digits = Digits::Six;
pub const DEFAULT_PERIOD: u32 = 30;
pub const MIN_PERIOD: u32 = 15;
pub const MAX_PERIOD: u32 = 60;
pub const DEFAULT_WINDOW: u32 = 1;
/// Largest window an `OtpConfig` accepts. The free verification
/// functions take any window.
pub const MAX_WINDOW: u32 = 10;

/// Raw byte length bounds for generated secrets (80–640 bits).
pub const MIN_SECRET_LENGTH: usize = 10;
pub const MAX_SECRET_LENGTH: usize = 80;
pub const DEFAULT_SECRET_LENGTH: usize = 16;

/// Validated engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOtpConfig")]
pub struct OtpConfig {
    digits: Digits,
    period: u32,
    window: u32,
}

/// Unvalidated serde mirror of [`OtpConfig`].
#[derive(Debug, Deserialize)]
struct RawOtpConfig {
    #[serde(default)]
    digits: Digits,
    #[serde(default = "default_period")]
    period: u32,
    #[serde(default = "default_window")]
    window: u32,
}

fn default_period() -> u32 {
    DEFAULT_PERIOD
}

fn default_window() -> u32 {
    DEFAULT_WINDOW
}

impl TryFrom<RawOtpConfig> for OtpConfig {
    type Error = OtpError;

    fn try_from(raw: RawOtpConfig) -> Result<Self, Self::Error> {
        OtpConfig::new(raw.digits, raw.period, raw.window)
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            window: DEFAULT_WINDOW,
        }
    }
}

impl OtpConfig {
    pub fn new(digits: Digits, period: u32, window: u32) -> Result<Self, OtpError> {
        validate_period(period)?;
        validate_window(window)?;
        Ok(Self {
            digits,
            period,
            window,
        })
    }

    /// Parse and validate a JSON document such as
    /// `{"digits": 8, "period": 60, "window": 2}`. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, OtpError> {
        serde_json::from_str(json).map_err(|e| {
            OtpError::invalid_parameter("Invalid OTP configuration").with_detail(e.to_string())
        })
    }

    pub fn with_digits(self, digits: Digits) -> Self {
        Self { digits, ..self }
    }

    pub fn with_period(self, period: u32) -> Result<Self, OtpError> {
        Self::new(self.digits, period, self.window)
    }

    pub fn with_window(self, window: u32) -> Result<Self, OtpError> {
        Self::new(self.digits, self.period, window)
    }

    pub fn digits(&self) -> Digits {
        self.digits
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn window(&self) -> u32 {
        self.window
    }
}

pub(crate) fn validate_period(period: u32) -> Result<(), OtpError> {
    if !(MIN_PERIOD..=MAX_PERIOD).contains(&period) {
        return Err(OtpError::invalid_parameter(format!(
            "period must be within {}..={} seconds, got {}",
            MIN_PERIOD, MAX_PERIOD, period
        )));
    }
    Ok(())
}

pub(crate) fn validate_window(window: u32) -> Result<(), OtpError> {
    if window > MAX_WINDOW {
        return Err(OtpError::invalid_parameter(format!(
            "window must be at most {}, got {}",
            MAX_WINDOW, window
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::types::OtpErrorKind;

    #[test]
    fn defaults() {
        let c = OtpConfig::default();
        assert_eq!(c.digits(), Digits::Six);
        assert_eq!(c.period(), 30);
        assert_eq!(c.window(), 1);
    }

    #[test]
    fn period_bounds() {
        assert!(OtpConfig::new(Digits::Six, 15, 1).is_ok());
        assert!(OtpConfig::new(Digits::Six, 60, 1).is_ok());
        let err = OtpConfig::new(Digits::Six, 14, 1).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidParameter);
        assert!(OtpConfig::new(Digits::Six, 61, 1).is_err());
        assert!(OtpConfig::new(Digits::Six, 0, 1).is_err());
    }

    #[test]
    fn window_bounds() {
        assert!(OtpConfig::new(Digits::Six, 30, 0).is_ok());
        assert!(OtpConfig::new(Digits::Six, 30, MAX_WINDOW).is_ok());
        assert!(OtpConfig::new(Digits::Six, 30, MAX_WINDOW + 1).is_err());
    }

    #[test]
    fn builders_revalidate() {
        let c = OtpConfig::default().with_digits(Digits::Eight);
        assert_eq!(c.digits(), Digits::Eight);
        assert_eq!(c.with_period(45).unwrap().period(), 45);
        assert!(c.with_period(90).is_err());
        assert!(c.with_window(11).is_err());
    }

    #[test]
    fn from_json_full() {
        let c = OtpConfig::from_json(r#"{"digits": 8, "period": 60, "window": 2}"#).unwrap();
        assert_eq!(c.digits(), Digits::Eight);
        assert_eq!(c.period(), 60);
        assert_eq!(c.window(), 2);
    }

    #[test]
    fn from_json_defaults_missing_fields() {
        let c = OtpConfig::from_json("{}").unwrap();
        assert_eq!(c, OtpConfig::default());
    }

    #[test]
    fn from_json_rejects_invalid_values() {
        assert!(OtpConfig::from_json(r#"{"digits": 7}"#).is_err());
        assert!(OtpConfig::from_json(r#"{"period": 10}"#).is_err());
        let err = OtpConfig::from_json(r#"{"window": 50}"#).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidParameter);
    }

    #[test]
    fn serde_roundtrip() {
        let c = OtpConfig::new(Digits::Eight, 45, 3).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"digits\":8"));
        let back: OtpConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
