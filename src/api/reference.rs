use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{GalleryError, Result};

/// Resolve an image reference to the URL it is downloaded from.
///
/// Absolute http(s) URLs pass through untouched. Everything else is appended
/// to the base address with exactly one `/` in between, so a base with a path
/// prefix ("https://host/gallery") keeps it.
pub fn resolve(base: &Url, reference: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(reference) {
        if matches!(url.scheme(), "http" | "https") {
            return Ok(url);
        }
    }

    let root = base.as_str().trim_end_matches('/');
    let joined = if reference.starts_with('/') {
        format!("{root}{reference}")
    } else {
        format!("{root}/{reference}")
    };
    Url::parse(&joined).map_err(|e| GalleryError::InvalidUrl(format!("{joined}: {e}")))
}

/// Build an API endpoint below the base address from literal path segments.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| GalleryError::InvalidUrl(format!("{base} cannot be a base")))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// The filename the service deletes an image by: the trailing path segment
/// of the reference, without query string or fragment, percent-decoded so
/// that `endpoint` encodes it exactly once.
///
/// Returns `None` when that segment is empty ("/uploads/").
pub fn file_name(reference: &str) -> Option<String> {
    let path = reference
        .split(&['?', '#'][..])
        .next()
        .unwrap_or(reference);
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.is_empty() {
        None
    } else {
        Some(percent_decode_str(name).decode_utf8_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_relative_reference() {
        let url = resolve(&base("http://localhost:8000"), "/uploads/a.png").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/uploads/a.png");

        let url = resolve(&base("http://localhost:8000/"), "uploads/a.png").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/uploads/a.png");
    }

    #[test]
    fn test_resolve_keeps_base_prefix() {
        let url = resolve(&base("https://host/gallery/"), "/uploads/a.png").unwrap();
        assert_eq!(url.as_str(), "https://host/gallery/uploads/a.png");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let url = resolve(&base("http://localhost:8000"), "https://cdn/x.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn/x.png");
    }

    #[test]
    fn test_endpoint() {
        let url = endpoint(&base("http://localhost:8000"), &["api", "images"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/images");

        let url = endpoint(&base("https://host/gallery/"), &["api", "upload"]).unwrap();
        assert_eq!(url.as_str(), "https://host/gallery/api/upload");
    }

    #[test]
    fn test_endpoint_encodes_segment() {
        let url = endpoint(&base("http://localhost:8000"), &["api", "images", "my cat.png"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/images/my%20cat.png");

        let url = endpoint(&base("http://localhost:8000"), &["api", "images", "a?b.png"]).unwrap();
        assert_eq!(url.path(), "/api/images/a%3Fb.png");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/uploads/a.png").as_deref(), Some("a.png"));
        assert_eq!(file_name("a.png").as_deref(), Some("a.png"));
        assert_eq!(file_name("http://host/uploads/b.jpg?v=2#top").as_deref(), Some("b.jpg"));
        assert_eq!(file_name("/uploads/"), None);
        assert_eq!(file_name(""), None);
    }

    #[test]
    fn test_encoded_file_name_is_not_encoded_twice() {
        let base = base("http://localhost:8000");

        let name = file_name("/uploads/my%20cat.png").unwrap();
        assert_eq!(name, "my cat.png");
        let url = endpoint(&base, &["api", "images", &name]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/images/my%20cat.png");

        let name = file_name("/uploads/a%2Fb.png").unwrap();
        let url = endpoint(&base, &["api", "images", &name]).unwrap();
        assert_eq!(url.path(), "/api/images/a%2Fb.png");
    }
}
