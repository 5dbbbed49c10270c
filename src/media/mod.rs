// src/media/mod.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Hosts serving display-ad creatives as plain images.
pub const AD_IMAGE_HOSTS: &[&str] = &["googlesyndication.com"];

pub const UNSUPPORTED_PLACEHOLDER: &str = "(不支援的素材連結)";

const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:/|v=)([a-zA-Z0-9_-]{11})").expect("video id pattern"));

/// What a creative-asset link points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaKind {
    Image { src: String },
    Video { id: String, embed_url: String },
    Unsupported,
}

/// Video id of a YouTube-style link: the `v` query parameter when present,
/// otherwise the first 11-character id after `/` or `v=`. Empty when neither
/// is found.
pub fn extract_video_id(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some((_, id)) = parsed.query_pairs().find(|(k, v)| k == "v" && !v.is_empty()) {
            return id.into_owned();
        }
    }
    VIDEO_ID
        .captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

/// Image by path extension or ad-serving host. Unparseable links are checked
/// as raw strings.
pub fn is_image_url(url: &str) -> bool {
    let (path, host) = match Url::parse(url) {
        Ok(u) => (
            u.path().to_ascii_lowercase(),
            u.host_str().unwrap_or("").to_ascii_lowercase(),
        ),
        Err(_) => {
            let raw = url.to_ascii_lowercase();
            (raw.clone(), raw)
        }
    };
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || AD_IMAGE_HOSTS.iter().any(|h| host.contains(h))
}

/// Image check first, then video id, else unsupported.
pub fn classify(url: &str) -> MediaKind {
    let url = url.trim();
    if url.is_empty() {
        return MediaKind::Unsupported;
    }
    if is_image_url(url) {
        return MediaKind::Image {
            src: url.to_string(),
        };
    }
    let id = extract_video_id(url);
    if id.chars().count() == VIDEO_ID_LEN {
        return MediaKind::Video {
            embed_url: embed_url(&id),
            id,
        };
    }
    MediaKind::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_link_and_watch_link_agree() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn query_parameter_wins_over_path() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PLxyz&v=abcdefghijk"),
            "abcdefghijk"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/AAAAAAAAAAA?v=BBBBBBBBBBB"),
            "BBBBBBBBBBB"
        );
    }

    #[test]
    fn falls_back_to_pattern_for_unparseable_links() {
        assert_eq!(extract_video_id("youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(extract_video_id("watch?v=dQw4w9WgXcQ&t=3"), "dQw4w9WgXcQ");
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn no_id_is_empty() {
        assert_eq!(extract_video_id(""), "");
        assert_eq!(extract_video_id("not a url"), "");
        assert_eq!(extract_video_id("https://example.com/short"), "");
    }

    #[test]
    fn image_by_extension_any_case() {
        for url in [
            "https://x.com/a.png",
            "https://x.com/a.JPG",
            "https://x.com/dir/photo.jpeg?w=200",
            "https://x.com/anim.gif",
            "https://x.com/b.WebP",
        ] {
            assert!(matches!(classify(url), MediaKind::Image { .. }), "{url}");
        }
    }

    #[test]
    fn image_by_ad_host() {
        let url = "https://tpc.googlesyndication.com/simgad/123456789";
        assert_eq!(
            classify(url),
            MediaKind::Image {
                src: url.to_string()
            }
        );
    }

    #[test]
    fn video_gets_embed_url() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            MediaKind::Video {
                id: "dQw4w9WgXcQ".to_string(),
                embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            }
        );
    }

    #[test]
    fn image_check_precedes_video_check() {
        assert!(matches!(
            classify("https://youtu.be/dQw4w9WgXcQ/thumb.png"),
            MediaKind::Image { .. }
        ));
    }

    #[test]
    fn wrong_length_query_id_is_unsupported() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=short"),
            MediaKind::Unsupported
        );
    }

    #[test]
    fn empty_and_unknown_links_are_unsupported() {
        assert_eq!(classify(""), MediaKind::Unsupported);
        assert_eq!(classify("  "), MediaKind::Unsupported);
        assert_eq!(classify("https://example.com/landing"), MediaKind::Unsupported);
    }
}
