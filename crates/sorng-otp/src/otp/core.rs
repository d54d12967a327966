//! Core OTP generation — RFC 4226 (HOTP) and RFC 6238 (TOTP).
//!
//! HMAC-SHA1 over an 8-byte big-endian counter, dynamic truncation to
//! 31 bits and reduction to 6 or 8 decimal digits. Time steps are
//! `floor(unix / period)`.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::otp::clock::Clock;
use crate::otp::config::{validate_period, OtpConfig};
use crate::otp::encoding;
use crate::otp::types::{Digits, OtpError};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Raw HMAC-OTP (RFC 4226 §5.3)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute an HOTP code for the given raw key bytes and counter.
///
/// Only the low 32 bits of `counter` are used; the high half of the
/// packed message is always zero.
pub fn hotp_raw(key: &[u8], counter: u64, digits: Digits) -> Result<String, OtpError> {
    let digest = hmac_sha1(key, &pack_counter(counter))?;
    Ok(truncate(&digest, digits))
}

/// 8-byte big-endian message: four zero bytes then the 32-bit counter.
fn pack_counter(counter: u64) -> [u8; 8] {
    let mut msg = [0u8; 8];
    msg[4..].copy_from_slice(&(counter as u32).to_be_bytes());
    msg
}

fn hmac_sha1(key: &[u8], data: &[u8]) -> Result<[u8; 20], OtpError> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|e| {
        OtpError::invalid_secret("Secret rejected as HMAC key").with_detail(e.to_string())
    })?;
    mac.update(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Dynamic truncation per RFC 4226 §5.3.
fn truncate(digest: &[u8; 20], digits: Digits) -> String {
    let offset = (digest[19] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]) & 0x7fff_ffff;
    let code = binary % digits.modulus();
    format!("{:0>width$}", code, width = digits.count() as usize)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Code from a base-32 secret
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Derive the code for `secret` at `time_step`.
pub fn compute_code(secret: &str, time_step: u64, digits: Digits) -> Result<String, OtpError> {
    let key = decode_key(secret)?;
    hotp_raw(&key, time_step, digits)
}

/// Validate and decode a secret into HMAC key bytes.
pub(crate) fn decode_key(secret: &str) -> Result<Zeroizing<Vec<u8>>, OtpError> {
    encoding::decode(secret).map(Zeroizing::new)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOTP (time-based, RFC 6238)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute the time-step counter for a given unix timestamp.
///
/// `period` must be within `15..=60` seconds.
pub fn time_step_at(unix_seconds: u64, period: u32) -> Result<u64, OtpError> {
    validate_period(period)?;
    Ok(step_of(unix_seconds, period))
}

/// Seconds remaining until the step containing `unix_seconds` expires.
pub fn seconds_remaining_at(unix_seconds: u64, period: u32) -> Result<u32, OtpError> {
    validate_period(period)?;
    Ok(remaining_in(unix_seconds, period))
}

// Callers pass an already validated, non-zero period.
pub(crate) fn step_of(unix_seconds: u64, period: u32) -> u64 {
    unix_seconds / period as u64
}

pub(crate) fn remaining_in(unix_seconds: u64, period: u32) -> u32 {
    let p = period as u64;
    (p - (unix_seconds % p)) as u32
}

/// Generate the code at an explicit unix timestamp.
pub fn compute_code_at(
    secret: &str,
    unix_seconds: u64,
    config: &OtpConfig,
) -> Result<String, OtpError> {
    let step = step_of(unix_seconds, config.period());
    compute_code(secret, step, config.digits())
}

/// Generate the code for the step `clock` is currently in.
pub fn current_code(
    secret: &str,
    config: &OtpConfig,
    clock: &impl Clock,
) -> Result<String, OtpError> {
    compute_code_at(secret, clock.unix_time(), config)
}

/// Format an OTP code with a space in the middle (e.g. "123 456").
pub fn format_code_display(code: &str) -> String {
    if code.len() <= 4 || !code.is_ascii() {
        return code.to_string();
    }
    let mid = code.len() / 2;
    format!("{} {}", &code[..mid], &code[mid..])
}
