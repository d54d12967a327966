//! Code verification across a drift window.
//!
//! The secret is validated before any HMAC is computed. Each candidate
//! comparison runs in constant time over the code's content; the loop
//! stops at the first matching step, which reveals only the step offset.

use subtle::ConstantTimeEq;

use crate::otp::clock::Clock;
use crate::otp::config::OtpConfig;
use crate::otp::core::{decode_key, hotp_raw, step_of};
use crate::otp::encoding::is_alphabet_char;
use crate::otp::types::{Digits, OtpError, VerifyResult};

/// Every character must be in `A-Z2-7`; the empty string is rejected.
pub fn validate_secret(secret: &str) -> Result<(), OtpError> {
    if secret.is_empty() {
        return Err(OtpError::invalid_secret("Secret is empty"));
    }
    if let Some(pos) = secret.find(|c: char| !is_alphabet_char(c)) {
        return Err(OtpError::invalid_secret("Secret contains a non base-32 character")
            .with_detail(format!("position {}", pos)));
    }
    Ok(())
}

/// `true` if `candidate` matches the code of any step within
/// `time_step ± window`.
pub fn verify_code(
    candidate: &str,
    secret: &str,
    time_step: u64,
    window: u32,
    digits: Digits,
) -> Result<bool, OtpError> {
    verify_code_detailed(candidate, secret, time_step, window, digits).map(|r| r.valid)
}

/// Like [`verify_code`] but reports which step matched.
///
/// Steps are tried from `time_step - window` upwards; steps below zero
/// are skipped. Any window is accepted here; [`OtpConfig`] is where a
/// deployment caps it.
pub fn verify_code_detailed(
    candidate: &str,
    secret: &str,
    time_step: u64,
    window: u32,
    digits: Digits,
) -> Result<VerifyResult, OtpError> {
    let key = decode_key(secret)?;

    if candidate.len() != digits.count() as usize {
        log::debug!("OTP: candidate has wrong length, rejecting");
        return Ok(VerifyResult::rejected());
    }

    let w = window as i64;
    for offset in -w..=w {
        let Some(step) = time_step.checked_add_signed(offset) else {
            continue;
        };
        let expected = hotp_raw(&key, step, digits)?;
        if bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())) {
            log::debug!("OTP: code accepted at drift {}", offset);
            return Ok(VerifyResult {
                valid: true,
                drift: offset,
                matched_step: Some(step),
            });
        }
    }

    log::debug!("OTP: no match within ±{} steps", window);
    Ok(VerifyResult::rejected())
}

/// Verify against the step `clock` is currently in, using `config`'s
/// digits, period and window.
pub fn verify_code_now(
    candidate: &str,
    secret: &str,
    config: &OtpConfig,
    clock: &impl Clock,
) -> Result<bool, OtpError> {
    let step = step_of(clock.unix_time(), config.period());
    verify_code(candidate, secret, step, config.window(), config.digits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::clock::FixedClock;
    use crate::otp::core::compute_code;
    use crate::otp::types::OtpErrorKind;

    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    // HOTP codes for counters 0..=4.
    const CODES: [&str; 5] = ["755224", "287082", "359152", "969429", "338314"];

    // ── validate_secret ──────────────────────────────────────────

    #[test]
    fn secret_charset() {
        assert!(validate_secret("JBSWY3DPEHPK3PXP").is_ok());
        assert!(validate_secret("ABCDEFGHIJKLMNOPQRSTUVWXYZ234567").is_ok());
        for bad in ["", "jbswy3dp", "JBSWY0DP", "JBSWY1DP", "JBSWY8DP", "JBSWY9DP", "JBSW=", "JBSW-Y3DP"] {
            let err = validate_secret(bad).unwrap_err();
            assert_eq!(err.kind, OtpErrorKind::InvalidSecret, "{:?}", bad);
        }
    }

    // ── Window ───────────────────────────────────────────────────

    #[test]
    fn window_one_accepts_adjacent_steps() {
        for code in &CODES[1..=3] {
            assert!(verify_code(code, RFC_SECRET, 2, 1, Digits::Six).unwrap(), "{}", code);
        }
        assert!(!verify_code(CODES[0], RFC_SECRET, 2, 1, Digits::Six).unwrap());
        assert!(!verify_code(CODES[4], RFC_SECRET, 2, 1, Digits::Six).unwrap());
    }

    #[test]
    fn window_zero_is_exact() {
        assert!(verify_code(CODES[2], RFC_SECRET, 2, 0, Digits::Six).unwrap());
        assert!(!verify_code(CODES[1], RFC_SECRET, 2, 0, Digits::Six).unwrap());
    }

    #[test]
    fn drift_reported() {
        let r = verify_code_detailed(CODES[1], RFC_SECRET, 2, 1, Digits::Six).unwrap();
        assert!(r.valid);
        assert_eq!(r.drift, -1);
        assert_eq!(r.matched_step, Some(1));

        let r = verify_code_detailed(CODES[4], RFC_SECRET, 2, 2, Digits::Six).unwrap();
        assert_eq!(r.drift, 2);
        assert_eq!(r.matched_step, Some(4));
    }

    #[test]
    fn steps_below_zero_skipped() {
        assert!(verify_code(CODES[0], RFC_SECRET, 0, 1, Digits::Six).unwrap());
        assert!(verify_code(CODES[1], RFC_SECRET, 0, 1, Digits::Six).unwrap());
        assert!(!verify_code(CODES[2], RFC_SECRET, 0, 1, Digits::Six).unwrap());
    }

    #[test]
    fn window_beyond_config_cap_still_verifies() {
        let far = compute_code(RFC_SECRET, 40, Digits::Six).unwrap();
        let r = verify_code_detailed(&far, RFC_SECRET, 90, 50, Digits::Six).unwrap();
        assert!(r.valid);
        assert_eq!(r.matched_step, Some(40));
        assert_eq!(r.drift, -50);
        assert!(OtpConfig::default().with_window(50).is_err());
    }

    // ── Malformed input ──────────────────────────────────────────

    #[test]
    fn wrong_length_is_false_not_error() {
        assert!(!verify_code("12345", RFC_SECRET, 1, 1, Digits::Six).unwrap());
        assert!(!verify_code("", RFC_SECRET, 1, 1, Digits::Six).unwrap());
        // A correct 6-digit code does not pass an 8-digit check.
        assert!(!verify_code(CODES[1], RFC_SECRET, 1, 1, Digits::Eight).unwrap());
    }

    #[test]
    fn invalid_secret_is_error_even_with_matching_code() {
        let err = verify_code(CODES[1], "gezdgnbvgy3tqojq", 1, 1, Digits::Six).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidSecret);
        let err = verify_code(CODES[1], "GEZDGNBVGY3TQOJ0", 1, 1, Digits::Six).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidSecret);
    }

    #[test]
    fn eight_digit_codes() {
        let code = compute_code(RFC_SECRET, 37_037_036, Digits::Eight).unwrap();
        assert!(verify_code(&code, RFC_SECRET, 37_037_037, 1, Digits::Eight).unwrap());
    }

    // ── Clock ────────────────────────────────────────────────────

    #[test]
    fn verify_now_uses_clock() {
        let config = OtpConfig::default();
        // T=59 → step 1.
        let clock = FixedClock::at(59);
        assert!(verify_code_now(CODES[0], RFC_SECRET, &config, &clock).unwrap());
        assert!(verify_code_now(CODES[2], RFC_SECRET, &config, &clock).unwrap());
        assert!(!verify_code_now(CODES[3], RFC_SECRET, &config, &clock).unwrap());
    }
}
