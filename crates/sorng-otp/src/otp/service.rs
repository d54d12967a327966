//! High-level facade — binds a validated config and a clock, delegates to
//! the sub-modules.
//!
//! An `Authenticator` holds no mutable state and can be shared across
//! threads behind a plain `Arc`.

use crate::otp::clock::{Clock, SystemClock};
use crate::otp::config::{OtpConfig, DEFAULT_SECRET_LENGTH};
use crate::otp::core;
use crate::otp::secret;
use crate::otp::types::*;
use crate::otp::uri;
use crate::otp::verify;

/// TOTP operations under one configuration.
#[derive(Debug, Clone)]
pub struct Authenticator<C: Clock = SystemClock> {
    config: OtpConfig,
    clock: C,
}

impl Default for Authenticator<SystemClock> {
    fn default() -> Self {
        Self::new(OtpConfig::default())
    }
}

impl Authenticator<SystemClock> {
    /// Authenticator reading the wall clock.
    pub fn new(config: OtpConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Authenticator<C> {
    /// Authenticator reading time from `clock`.
    pub fn with_clock(config: OtpConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Secrets
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// New secret of the default length.
    pub fn create_secret(&self) -> Result<String, OtpError> {
        secret::create_secret(DEFAULT_SECRET_LENGTH)
    }

    /// New secret of `byte_length` characters.
    pub fn create_secret_of_length(&self, byte_length: usize) -> Result<String, OtpError> {
        secret::create_secret(byte_length)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Codes
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// The step the clock is currently in.
    pub fn current_step(&self) -> u64 {
        core::step_of(self.clock.unix_time(), self.config.period())
    }

    /// Seconds until the current code rolls over.
    pub fn seconds_remaining(&self) -> u32 {
        core::remaining_in(self.clock.unix_time(), self.config.period())
    }

    pub fn code_at(&self, secret: &str, time_step: u64) -> Result<String, OtpError> {
        core::compute_code(secret, time_step, self.config.digits())
    }

    pub fn current_code(&self, secret: &str) -> Result<String, OtpError> {
        self.code_at(secret, self.current_step())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Verification
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Verify `candidate` around the current step.
    pub fn verify(&self, candidate: &str, secret: &str) -> Result<bool, OtpError> {
        self.verify_at(candidate, secret, self.current_step())
    }

    /// Verify `candidate` around an explicit step.
    pub fn verify_at(
        &self,
        candidate: &str,
        secret: &str,
        time_step: u64,
    ) -> Result<bool, OtpError> {
        verify::verify_code(
            candidate,
            secret,
            time_step,
            self.config.window(),
            self.config.digits(),
        )
    }

    /// Verify around the current step and report the drift.
    pub fn verify_detailed(&self, candidate: &str, secret: &str) -> Result<VerifyResult, OtpError> {
        verify::verify_code_detailed(
            candidate,
            secret,
            self.current_step(),
            self.config.window(),
            self.config.digits(),
        )
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    //  Provisioning
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `otpauth://` URI carrying this authenticator's digits and period.
    pub fn provisioning_uri(
        &self,
        secret: &str,
        label: &str,
        issuer: &str,
    ) -> Result<String, OtpError> {
        let params = ProvisioningParams::new(secret, label, issuer)
            .with_digits(self.config.digits())
            .with_period(self.config.period());
        uri::build_uri(&params)
    }
}
