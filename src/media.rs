//! Image URL resolution.
//!
//! The catalogue stores whatever URL the upload step produced: dev-machine
//! `localhost` URLs, relative `photos/...` paths, or public absolute URLs.
//! Both the card grid and the detail panel resolve through this one
//! function so the two views can never drift apart.

/// Resolve a stored image reference to a displayable URL.
///
/// Rules, first match wins:
/// - A `localhost` URL while serving from an `https` base is a stale dev
///   URL; rebuild it as `{api_base_url}/uploads/{suffix}` from whatever
///   follows the first `/uploads/`. Without that fragment the URL passes
///   through unchanged.
/// - A relative path is served from the thumbnail directory, so the first
///   `photos/` segment becomes `thumbnails/`.
/// - Anything else is already displayable.
///
/// Pure and idempotent: resolving an already-resolved URL is a no-op.
pub fn resolve_image_url(url: &str, api_base_url: &str) -> String {
    if url.contains("localhost") && api_base_url.starts_with("https") {
        match url.split_once("/uploads/") {
            Some((_, suffix)) => format!("{}/uploads/{}", api_base_url, suffix),
            None => url.to_string(),
        }
    } else if !url.starts_with("http") {
        url.replacen("photos/", "thumbnails/", 1)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROD_BASE: &str = "https://api.example.com";

    #[test]
    fn rewrites_stale_localhost_url_in_prod() {
        assert_eq!(
            resolve_image_url("http://localhost:1337/uploads/abc.jpg", PROD_BASE),
            "https://api.example.com/uploads/abc.jpg"
        );
    }

    #[test]
    fn localhost_without_uploads_fragment_passes_through() {
        assert_eq!(
            resolve_image_url("http://localhost:1337/static/abc.jpg", PROD_BASE),
            "http://localhost:1337/static/abc.jpg"
        );
    }

    #[test]
    fn localhost_is_kept_when_serving_from_dev_base() {
        assert_eq!(
            resolve_image_url("http://localhost:8001/uploads/abc.jpg", "http://localhost:8001"),
            "http://localhost:8001/uploads/abc.jpg"
        );
    }

    #[test]
    fn relative_path_switches_to_thumbnails() {
        assert_eq!(
            resolve_image_url("photos/leaf.jpg", PROD_BASE),
            "thumbnails/leaf.jpg"
        );
    }

    #[test]
    fn only_first_photos_segment_is_replaced() {
        assert_eq!(
            resolve_image_url("photos/photos/leaf.jpg", PROD_BASE),
            "thumbnails/photos/leaf.jpg"
        );
    }

    #[test]
    fn relative_path_without_photos_passes_through() {
        assert_eq!(
            resolve_image_url("uploads/leaf.jpg", PROD_BASE),
            "uploads/leaf.jpg"
        );
    }

    #[test]
    fn absolute_public_url_passes_through() {
        assert_eq!(
            resolve_image_url("https://cdn.example.com/rose.jpg", PROD_BASE),
            "https://cdn.example.com/rose.jpg"
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        for url in [
            "http://localhost:1337/uploads/abc.jpg",
            "photos/leaf.jpg",
            "https://cdn.example.com/rose.jpg",
            "uploads/leaf.jpg",
        ] {
            let once = resolve_image_url(url, PROD_BASE);
            let twice = resolve_image_url(&once, PROD_BASE);
            assert_eq!(once, twice, "resolving {} twice diverged", url);
        }
    }
}
