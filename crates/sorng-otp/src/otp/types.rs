//! Core types for the OTP engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::otp::config::{self, DEFAULT_PERIOD};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Digits
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decimal length of a generated code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Digits {
    #[default]
    Six,
    Eight,
}

impl Digits {
    /// Number of decimal characters in the code.
    pub fn count(self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// `10^digits`, the truncation modulus.
    pub fn modulus(self) -> u32 {
        10u32.pow(self.count() as u32)
    }
}

impl TryFrom<u8> for Digits {
    type Error = OtpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            other => Err(OtpError::invalid_parameter(format!(
                "digits must be 6 or 8, got {}",
                other
            ))),
        }
    }
}

impl From<Digits> for u8 {
    fn from(d: Digits) -> u8 {
        d.count()
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Provisioning parameters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Everything an authenticator app needs to enrol a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningParams {
    /// Base-32 alphabet secret.
    pub secret: String,
    /// Path label, usually `issuer:account`. Inserted verbatim.
    pub label: String,
    /// Issuer shown by the authenticator app.
    pub issuer: String,
    /// Code length.
    pub digits: Digits,
    /// Step length in seconds.
    pub period: u32,
}

impl ProvisioningParams {
    /// Parameters with the default digits and period.
    pub fn new(
        secret: impl Into<String>,
        label: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            label: label.into(),
            issuer: issuer.into(),
            digits: Digits::default(),
            period: DEFAULT_PERIOD,
        }
    }

    /// Builder: set digit count.
    pub fn with_digits(mut self, digits: Digits) -> Self {
        self.digits = digits;
        self
    }

    /// Builder: set time period.
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Check the period is within the accepted range.
    pub fn validate_period(&self) -> Result<(), OtpError> {
        config::validate_period(self.period)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Verification result
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Outcome of checking a candidate code against a window of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub valid: bool,
    /// Offset of the matching step relative to the reference step (0 = exact).
    pub drift: i64,
    /// The time step that matched (if any).
    pub matched_step: Option<u64>,
}

impl VerifyResult {
    pub(crate) fn rejected() -> Self {
        Self {
            valid: false,
            drift: 0,
            matched_step: None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error kind for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpErrorKind {
    /// Digits, period, window or secret length outside the allowed bounds.
    InvalidParameter,
    /// Secret contains characters outside `A-Z2-7` or is empty.
    InvalidSecret,
    /// The platform CSPRNG could not produce bytes.
    RandomSourceUnavailable,
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpError {
    pub kind: OtpErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for OtpError {}

impl OtpError {
    pub fn new(kind: OtpErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::new(OtpErrorKind::InvalidParameter, msg)
    }

    pub fn invalid_secret(msg: impl Into<String>) -> Self {
        Self::new(OtpErrorKind::InvalidSecret, msg)
    }

    pub fn random_unavailable(msg: impl Into<String>) -> Self {
        Self::new(OtpErrorKind::RandomSourceUnavailable, msg)
    }
}

impl From<OtpError> for String {
    fn from(e: OtpError) -> String {
        e.to_string()
    }
}
