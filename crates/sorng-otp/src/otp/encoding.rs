//! Base-32 collaborator (RFC 4648 alphabet, unpadded).
//!
//! Secrets are carried as strings over the 32-character set `A-Z2-7`.
//! Decoding is strict: no padding, no lowercase, no separators.

use crate::otp::types::OtpError;
use crate::otp::verify::validate_secret;

/// The RFC 3548 / 4648 Base-32 alphabet.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const CODEC: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

/// The valid secret characters as a string slice.
pub fn alphabet() -> &'static str {
    ALPHABET
}

/// `true` if `c` belongs to the Base-32 alphabet.
pub fn is_alphabet_char(c: char) -> bool {
    matches!(c, 'A'..='Z' | '2'..='7')
}

/// Encode raw bytes to base-32 (no padding, uppercase).
pub fn encode(bytes: &[u8]) -> String {
    base32::encode(CODEC, bytes)
}

/// Decode an unpadded base-32 string into raw bytes.
///
/// The charset check is [`validate_secret`]'s, so an empty string is
/// rejected as well.
pub fn decode(s: &str) -> Result<Vec<u8>, OtpError> {
    validate_secret(s)?;
    base32::decode(CODEC, s).ok_or_else(|| OtpError::invalid_secret("Invalid base-32 secret"))
}
