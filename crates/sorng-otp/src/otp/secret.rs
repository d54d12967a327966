//! Shared-secret generation.
//!
//! Each random byte contributes its low five bits as an index into the
//! Base-32 alphabet, so a secret of `n` characters is drawn from `n` random
//! bytes. This is deliberately *not* RFC 4648 encoding of the random bytes:
//! the key the engine later uses is the standard Base-32 decode of the
//! resulting string, and existing secrets depend on exactly this mapping.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::otp::config::{MAX_SECRET_LENGTH, MIN_SECRET_LENGTH};
use crate::otp::encoding::ALPHABET;
use crate::otp::types::OtpError;

/// Generate a secret of `byte_length` alphabet characters from the OS CSPRNG.
pub fn create_secret(byte_length: usize) -> Result<String, OtpError> {
    create_secret_with(&mut OsRng, byte_length)
}

/// Generate a secret drawing entropy from `rng`.
///
/// Fails with `InvalidParameter` before touching `rng` when `byte_length`
/// is outside `10..=80`, and with `RandomSourceUnavailable` if the source
/// cannot fill the buffer.
pub fn create_secret_with<R: RngCore + ?Sized>(
    rng: &mut R,
    byte_length: usize,
) -> Result<String, OtpError> {
    if !(MIN_SECRET_LENGTH..=MAX_SECRET_LENGTH).contains(&byte_length) {
        return Err(OtpError::invalid_parameter(format!(
            "secret length must be within {}..={} bytes, got {}",
            MIN_SECRET_LENGTH, MAX_SECRET_LENGTH, byte_length
        )));
    }

    let mut buf = Zeroizing::new(vec![0u8; byte_length]);
    rng.try_fill_bytes(&mut buf).map_err(|e| {
        log::warn!("OTP: random source failed while creating a secret: {}", e);
        OtpError::random_unavailable("Random source unavailable").with_detail(e.to_string())
    })?;

    let alphabet = ALPHABET.as_bytes();
    let secret: String = buf
        .iter()
        .map(|b| alphabet[(b & 31) as usize] as char)
        .collect();

    log::debug!("OTP: created {}-character secret", byte_length);
    Ok(secret)
}
