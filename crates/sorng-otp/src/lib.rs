//! # SortOfRemote NG – OTP Core
//!
//! Stateless one-time password primitives shared by the authenticator
//! surfaces:
//!
//! - **Secrets** – Cryptographically random Base32-alphabet shared secrets
//! - **RFC 4226 / 6238** – HOTP truncation over HMAC-SHA1, TOTP time steps
//! - **Verification** – Constant-time comparison across a drift window
//! - **otpauth:// URIs** – Provisioning URI generation & parsing
//! - **Configuration** – Validated, immutable digits / period / window settings
//! - **Clock injection** – Deterministic time for tests and replay

pub mod otp;
