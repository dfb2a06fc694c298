use crate::errors::ApiError;
use crate::video::types::VideoReference;
use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized URL shapes, compiled once. Each pattern anchors at the start
/// of the (trimmed) input, tolerates a missing scheme and the `www.`/`m.`
/// subdomains, and captures exactly 11 ID characters followed by a
/// delimiter or end of input so over-long IDs never match.
static VIDEO_URL_PATTERNS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    let shapes = [
        (r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?(?:[^#&\s]*&)*v=([A-Za-z0-9_-]{11})(?:[/?&#].*)?$", false),
        (r"^(?:https?://)?youtu\.be/([A-Za-z0-9_-]{11})(?:[/?&#].*)?$", false),
        (r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/shorts/([A-Za-z0-9_-]{11})(?:[/?&#].*)?$", true),
        (r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/embed/([A-Za-z0-9_-]{11})(?:[/?&#].*)?$", false),
        // legacy Flash-era path, still seen in old embeds
        (r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/v/([A-Za-z0-9_-]{11})(?:[/?&#].*)?$", false),
    ];

    shapes
        .iter()
        .map(|(pattern, is_short)| {
            let re = Regex::new(&format!("(?i){pattern}"))
                .expect("failed to compile video URL regex");
            (re, *is_short)
        })
        .collect()
});

/// Parse an arbitrary input string into a [`VideoReference`].
///
/// Hosts match case-insensitively and the scheme may be omitted. Query
/// parameters or path segments after the ID are ignored. Anything that
/// matches none of the shapes, or carries an ID that is not exactly 11
/// characters of `[A-Za-z0-9_-]`, is rejected.
pub fn parse_video_url(input: &str) -> Result<VideoReference, ApiError> {
    let trimmed = input.trim();

    for (pattern, is_short) in VIDEO_URL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(trimmed) {
            let video_id = caps
                .get(1)
                .map(|m| m.as_str().to_owned())
                .expect("video URL regex has a capture group");
            return Ok(VideoReference {
                video_id,
                is_short: *is_short,
            });
        }
    }

    Err(ApiError::InvalidUrl(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> VideoReference {
        parse_video_url(input).expect("expected URL to parse")
    }

    fn assert_invalid(input: &str) {
        match parse_video_url(input) {
            Err(ApiError::InvalidUrl(_)) => {}
            other => panic!("expected InvalidUrl for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_watch_url() {
        let video = parse_ok("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert!(!video.is_short);
    }

    #[test]
    fn test_short_link() {
        let video = parse_ok("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert!(!video.is_short);
    }

    #[test]
    fn test_shorts_url_sets_flag() {
        let video = parse_ok("https://www.youtube.com/shorts/dQw4w9WgXcQ");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert!(video.is_short);
    }

    #[test]
    fn test_embed_url() {
        let video = parse_ok("https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert!(!video.is_short);
    }

    #[test]
    fn test_legacy_v_url() {
        let video = parse_ok("https://www.youtube.com/v/dQw4w9WgXcQ");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert!(!video.is_short);
    }

    #[test]
    fn test_scheme_optional() {
        assert_eq!(parse_ok("youtube.com/watch?v=dQw4w9WgXcQ").video_id, "dQw4w9WgXcQ");
        assert_eq!(parse_ok("youtu.be/dQw4w9WgXcQ").video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_http_scheme_accepted() {
        assert_eq!(
            parse_ok("http://www.youtube.com/watch?v=dQw4w9WgXcQ").video_id,
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_host_case_insensitive() {
        assert_eq!(
            parse_ok("https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ").video_id,
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_mobile_host() {
        assert_eq!(
            parse_ok("https://m.youtube.com/watch?v=dQw4w9WgXcQ").video_id,
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_id_case_preserved() {
        assert_eq!(parse_ok("https://youtu.be/DqW4w9wGxCq").video_id, "DqW4w9wGxCq");
    }

    #[test]
    fn test_extra_query_params_ignored() {
        let video = parse_ok("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30s&list=PLx");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_params_before_id() {
        let video = parse_ok("https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(parse_ok("https://youtu.be/dQw4w9WgXcQ/").video_id, "dQw4w9WgXcQ");
        assert_eq!(
            parse_ok("https://www.youtube.com/shorts/dQw4w9WgXcQ/").video_id,
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_trailing_query_after_path_id() {
        let video = parse_ok("https://www.youtube.com/shorts/dQw4w9WgXcQ?feature=share");
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert!(video.is_short);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            parse_ok("  https://youtu.be/dQw4w9WgXcQ \n").video_id,
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_not_a_url() {
        assert_invalid("not a url");
        assert_invalid("");
    }

    #[test]
    fn test_other_hosts_rejected() {
        assert_invalid("https://vimeo.com/123");
        assert_invalid("https://example.com/watch?v=dQw4w9WgXcQ");
        // lookalike host must not pass as youtube.com
        assert_invalid("https://notyoutube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_id_too_short() {
        assert_invalid("https://www.youtube.com/watch?v=short");
        assert_invalid("https://youtu.be/abc");
    }

    #[test]
    fn test_id_too_long() {
        assert_invalid("https://www.youtube.com/watch?v=dQw4w9WgXcQx");
        assert_invalid("https://youtu.be/dQw4w9WgXcQx");
    }

    #[test]
    fn test_id_bad_charset() {
        assert_invalid("https://www.youtube.com/watch?v=dQw4w9WgXc!");
    }

    #[test]
    fn test_channel_url_rejected() {
        assert_invalid("https://www.youtube.com/@somechannel");
        assert_invalid("https://www.youtube.com/playlist?list=PLx");
    }
}
