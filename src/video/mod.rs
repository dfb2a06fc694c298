pub mod extractor;
pub mod normalize;
pub mod types;
pub mod url;

pub use extractor::MetadataExtractor;
pub use types::{VideoMetadata, VideoReference};

use crate::errors::ApiError;

/// Main entry point: resolve a raw URL into normalized video metadata.
///
/// A linear pipeline: parse the URL, hand the reference to the extractor,
/// reshape whatever came back. Either of the first two steps failing
/// short-circuits; the normalizer only ever sees a successful bag.
pub fn fetch_video(
    input: &str,
    extractor: &dyn MetadataExtractor,
) -> Result<VideoMetadata, ApiError> {
    let video = url::parse_video_url(input)?;
    log::debug!(
        "extractor={} video_id={} is_short={}",
        extractor.name(),
        video.video_id,
        video.is_short
    );
    let raw = extractor.fetch(&video)?;
    Ok(normalize::normalize_metadata(&raw, &video))
}
