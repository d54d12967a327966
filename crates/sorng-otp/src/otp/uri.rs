//! `otpauth://totp/` provisioning URIs per the Google Authenticator
//! key-URI format:
//! <https://github.com/google/google-authenticator/wiki/Key-Uri-Format>
//!
//! Format: `otpauth://totp/LABEL?secret=BASE32&issuer=ISSUER[&digits=8][&period=60]`
//!
//! `digits` and `period` are written only when they differ from 6 and 30.

use url::form_urlencoded;

use crate::otp::config::{DEFAULT_DIGITS, DEFAULT_PERIOD};
use crate::otp::types::*;
use crate::otp::verify::validate_secret;

const SCHEME: &str = "otpauth";
const TOTP_PREFIX: &str = "otpauth://totp/";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the provisioning URI for `params`.
///
/// The label goes into the path unchanged; query values are
/// form-urlencoded.
pub fn build_uri(params: &ProvisioningParams) -> Result<String, OtpError> {
    validate_secret(&params.secret)?;
    params.validate_period()?;

    let mut uri = format!(
        "{}{}?secret={}&issuer={}",
        TOTP_PREFIX,
        params.label,
        query_encode(&params.secret),
        query_encode(&params.issuer)
    );

    if params.digits != DEFAULT_DIGITS {
        uri.push_str(&format!("&digits={}", params.digits));
    }

    if params.period != DEFAULT_PERIOD {
        uri.push_str(&format!("&period={}", params.period));
    }

    Ok(uri)
}

fn query_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Parse
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse an `otpauth://totp/` URI back into provisioning parameters.
///
/// Missing `digits`/`period` take the defaults; present values are
/// validated like every other input. Unknown parameters are ignored.
pub fn parse_uri(uri: &str) -> Result<ProvisioningParams, OtpError> {
    let url = url::Url::parse(uri).map_err(|e| {
        OtpError::invalid_parameter("Invalid URI").with_detail(e.to_string())
    })?;

    if url.scheme() != SCHEME {
        return Err(OtpError::invalid_parameter(format!(
            "Expected scheme '{}', got '{}'",
            SCHEME,
            url.scheme()
        )));
    }

    if url.host_str() != Some("totp") {
        return Err(OtpError::invalid_parameter(format!(
            "Unsupported OTP type: {:?}",
            url.host_str()
        )));
    }

    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let label = percent_encoding::percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| OtpError::invalid_parameter("Label is not UTF-8").with_detail(e.to_string()))?
        .into_owned();

    let mut secret = None;
    let mut issuer = String::new();
    let mut digits = DEFAULT_DIGITS;
    let mut period = DEFAULT_PERIOD;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "secret" => secret = Some(value.into_owned()),
            "issuer" => issuer = value.into_owned(),
            "digits" => {
                let d = value.parse::<u8>().map_err(|_| {
                    OtpError::invalid_parameter(format!("Invalid digits value '{}'", value))
                })?;
                digits = Digits::try_from(d)?;
            }
            "period" => {
                period = value.parse::<u32>().map_err(|_| {
                    OtpError::invalid_parameter(format!("Invalid period value '{}'", value))
                })?;
            }
            _ => {}
        }
    }

    let secret =
        secret.ok_or_else(|| OtpError::invalid_parameter("Missing 'secret' parameter"))?;
    validate_secret(&secret)?;

    let params = ProvisioningParams::new(secret, label, issuer)
        .with_digits(digits)
        .with_period(period);
    params.validate_period()?;
    Ok(params)
}
