use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A device-local image reference as produced by a camera or gallery picker:
/// a plain filesystem path or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageLocator(String);

impl ImageLocator {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path, with any `file://` scheme and query string removed.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        let raw = self.0.strip_prefix("file://").unwrap_or(&self.0);
        PathBuf::from(strip_query(raw))
    }

    /// Last path segment without query string.
    #[must_use]
    pub fn file_name(&self) -> &str {
        let raw = strip_query(&self.0);
        raw.rsplit('/').next().unwrap_or(raw)
    }

    /// Lowercased extension of the file name, if it has a usable one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name().rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageLocator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ImageLocator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

fn strip_query(raw: &str) -> &str {
    raw.split(['?', '#']).next().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("file:///data/photos/IMG_001.JPG", Some("jpg"))]
    #[case("/tmp/seed.png?width=300", Some("png"))]
    #[case("photos/crop.heic#frag", Some("heic"))]
    #[case("/tmp/no_extension", None)]
    #[case("/tmp/.hidden", None)]
    #[case("/tmp/trailing.", None)]
    #[case("/tmp.d/photo", None)]
    fn extension_cases(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(ImageLocator::new(raw).extension().as_deref(), expected);
    }

    #[test]
    fn path_strips_scheme_and_query() {
        let locator = ImageLocator::new("file:///data/photos/a.jpg?x=1");
        assert_eq!(locator.path(), PathBuf::from("/data/photos/a.jpg"));
        assert_eq!(locator.file_name(), "a.jpg");
    }
}
