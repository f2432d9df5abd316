//! Object key derivation.
//!
//! Keys have the shape `{owner_id}/{unix_millis}_{suffix}.{ext}`: the owner
//! prefix is what the bucket's row-level policy matches against, the random
//! suffix keeps two picks taken in the same millisecond apart.

use crate::error::StorageError;
use crate::locator::ImageLocator;

pub const DEFAULT_EXTENSION: &str = "jpg";

const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derive a fresh storage key for `image` owned by `owner_id`.
///
/// # Errors
///
/// Returns `StorageError::Other` if the OS random source is unavailable.
pub fn object_key(owner_id: &str, image: &ImageLocator) -> Result<String, StorageError> {
    let suffix = random_suffix()?;
    Ok(format_key(
        owner_id,
        chrono::Utc::now().timestamp_millis(),
        &suffix,
        image,
    ))
}

#[must_use]
pub fn format_key(owner_id: &str, unix_millis: i64, suffix: &str, image: &ImageLocator) -> String {
    let ext = image
        .extension()
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("{owner_id}/{unix_millis}_{suffix}.{ext}")
}

fn random_suffix() -> Result<String, StorageError> {
    let mut bytes = [0u8; SUFFIX_LEN];
    getrandom::fill(&mut bytes)
        .map_err(|e| StorageError::Other(format!("random source unavailable: {e}")))?;
    Ok(bytes
        .iter()
        .map(|b| char::from(ALPHABET[usize::from(*b) % ALPHABET.len()]))
        .collect())
}

/// MIME type sent with the upload, from the key's extension.
#[must_use]
pub fn content_type(key: &str) -> &'static str {
    let ext = key.rsplit_once('.').map_or("", |(_, ext)| ext);
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "image/jpeg",
    }
}
