//! OTP crate: sub-modules.

pub mod types;
pub mod config;
pub mod clock;
pub mod encoding;
pub mod secret;
pub mod core;
pub mod verify;
pub mod uri;
pub mod service;

// Re-export top-level items for convenience.
pub use types::*;
pub use config::OtpConfig;
pub use clock::{Clock, FixedClock, SystemClock};
pub use service::Authenticator;
