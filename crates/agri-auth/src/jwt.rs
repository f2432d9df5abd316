use base64::Engine as _;

use crate::error::AuthError;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// The provider already verified the token when it issued it; this is only
/// used to learn when a stored access token stops being usable.
///
/// # Errors
///
/// Returns `AuthError::InvalidResponse` if the JWT format is invalid or the
/// `exp` claim is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<chrono::DateTime<chrono::Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidResponse("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidResponse(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidResponse(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::InvalidResponse("missing exp claim".into()))?;
    chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidResponse("invalid exp timestamp".into()))
}
