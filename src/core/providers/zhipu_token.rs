//! Signed access tokens for the Zhipu API
//!
//! Zhipu keys look like `id.secret`. Requests carry an HS256 token whose payload names the
//! key id and whose signature uses the secret. Timestamps are epoch milliseconds.

use super::unified_provider::ProviderError;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime in milliseconds
pub const TOKEN_TTL_MS: i64 = 3600 * 1000;

#[derive(Serialize)]
struct TokenHeader {
    alg: &'static str,
    sign_type: &'static str,
}

#[derive(Serialize)]
struct TokenPayload<'a> {
    api_key: &'a str,
    exp: i64,
    timestamp: i64,
}

/// Split an `id.secret` key; `None` if either half is missing
pub fn split_api_key(api_key: &str) -> Option<(&str, &str)> {
    let (id, secret) = api_key.split_once('.')?;
    if id.is_empty() || secret.is_empty() {
        return None;
    }
    Some((id, secret))
}

/// Build a token for `api_key` issued at `now_ms`
pub fn generate_token(api_key: &str, now_ms: i64) -> Result<String, ProviderError> {
    let (id, secret) = split_api_key(api_key).ok_or_else(|| {
        ProviderError::authentication("zhipu", "Invalid Zhipu API key format, expected id.secret")
    })?;

    let header = serde_json::to_vec(&TokenHeader {
        alg: "HS256",
        sign_type: "SIGN",
    })
    .map_err(|e| ProviderError::configuration("zhipu", e.to_string()))?;
    let payload = serde_json::to_vec(&TokenPayload {
        api_key: id,
        exp: now_ms + TOKEN_TTL_MS,
        timestamp: now_ms,
    })
    .map_err(|e| ProviderError::configuration("zhipu", e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ProviderError::configuration("zhipu", format!("HMAC key error: {}", e)))?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// Bearer value for a Zhipu credential: a signed token for `id.secret` keys, the key itself
/// otherwise
pub fn bearer_for(api_key: &str, now_ms: i64) -> Result<String, ProviderError> {
    if split_api_key(api_key).is_some() {
        generate_token(api_key, now_ms)
    } else {
        Ok(api_key.to_string())
    }
}
