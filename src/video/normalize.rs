use crate::video::types::{
    ChannelInfo, ContentDetails, Snippet, Statistics, Thumbnail, VideoMetadata, VideoReference,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;

/// Resolution names YouTube uses for its thumbnail ladder, keyed by width.
/// Extractor output that lists thumbnails as an array is bucketed onto
/// these names; entries with other widths are skipped, never renamed.
const THUMBNAIL_LADDER: [(u64, &str); 5] = [
    (120, "default"),
    (320, "medium"),
    (480, "high"),
    (640, "standard"),
    (1280, "maxres"),
];

/// Map a raw extractor bag into the fixed [`VideoMetadata`] shape.
///
/// Pure and infallible: every field access has a default, so an empty bag
/// still yields a response with `video_id`/`is_short` populated and every
/// other leaf absent. Malformed values degrade field-by-field instead of
/// failing the whole response.
pub fn normalize_metadata(raw: &Value, video: &VideoReference) -> VideoMetadata {
    let channel_id = get_string(raw, "channel_id");
    let channel_url = get_string(raw, "channel_url")
        .or_else(|| channel_id.as_deref().map(channel_url_for));
    let channel_title = get_string(raw, "channel").or_else(|| get_string(raw, "uploader"));
    let title = get_string(raw, "title");
    let description = get_string(raw, "description");

    let snippet = Snippet {
        published_at: published_at(raw),
        channel_id: channel_id.clone(),
        channel_url: channel_url.clone(),
        title,
        description,
        thumbnails: thumbnails(raw),
        channel_title: channel_title.clone(),
        tags: tags(raw),
    };

    let statistics = Statistics {
        view_count: counter(raw, "view_count"),
        like_count: counter(raw, "like_count"),
        comment_count: counter(raw, "comment_count"),
    };

    let (duration, duration_seconds) = duration(raw);
    let content_details = ContentDetails {
        duration,
        duration_seconds,
        definition: definition(raw),
        captions_available: captions_available(raw),
    };

    let channel = ChannelInfo {
        id: channel_id,
        title: channel_title,
        subscriber_count: counter(raw, "channel_follower_count"),
        url: channel_url,
    };

    VideoMetadata {
        video_id: video.video_id.clone(),
        is_short: video.is_short,
        snippet,
        statistics,
        content_details,
        channel,
    }
}

fn channel_url_for(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

fn get_string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Counters arrive as JSON numbers from the extractor but are reported as
/// decimal strings, matching YouTube's own wire convention. A counter the
/// extractor did not report stays absent.
fn counter(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// The extractor reports upload dates as `YYYYMMDD`; reshape into an
/// ISO-8601 timestamp. Values that don't parse are passed through raw.
fn published_at(raw: &Value) -> Option<String> {
    let upload_date = get_string(raw, "upload_date")?;
    match NaiveDate::parse_from_str(&upload_date, "%Y%m%d") {
        Ok(date) => Some(format!("{}T00:00:00Z", date.format("%Y-%m-%d"))),
        Err(_) => Some(upload_date),
    }
}

/// Duration from the raw bag, in both representations.
///
/// A numeric value is a seconds count and gets formatted into the ISO-8601
/// form; a string value is kept verbatim and parsed. The seconds total is 0
/// exactly when the duration is absent or unparseable.
fn duration(raw: &Value) -> (Option<String>, u64) {
    match raw.get("duration") {
        Some(Value::Number(n)) => {
            let secs = n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(0);
            (Some(format_duration(secs)), secs)
        }
        Some(Value::String(s)) => (Some(s.clone()), parse_duration_seconds(s).unwrap_or(0)),
        _ => (None, 0),
    }
}

/// Render a seconds count as `PT[nH][nM][nS]`.
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "PT0S".to_owned();
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || (hours == 0 && minutes == 0) {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

/// Parse the `PT[nH][nM][nS]` grammar into a seconds total.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let rest = raw.strip_prefix("PT")?;
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let n: u64 = digits.parse().ok()?;
        digits.clear();
        total = total.checked_add(match ch {
            'H' => n.checked_mul(3600)?,
            'M' => n.checked_mul(60)?,
            'S' => n,
            _ => return None,
        })?;
    }
    // trailing digits without a unit letter
    if !digits.is_empty() {
        return None;
    }
    Some(total)
}

fn definition(raw: &Value) -> Option<String> {
    let height = raw.get("height").and_then(Value::as_u64)?;
    Some(if height >= 720 { "hd" } else { "sd" }.to_owned())
}

/// `Some(true)` when the extractor reports any manual or automatic caption
/// track, `Some(false)` when it reports the keys empty, absent when it
/// reported neither key at all.
fn captions_available(raw: &Value) -> Option<bool> {
    let subtitles = raw.get("subtitles");
    let automatic = raw.get("automatic_captions");
    if subtitles.is_none() && automatic.is_none() {
        return None;
    }
    Some(has_tracks(subtitles) || has_tracks(automatic))
}

fn has_tracks(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_object)
        .map(|tracks| !tracks.is_empty())
        .unwrap_or(false)
}

fn tags(raw: &Value) -> Vec<String> {
    raw.get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Copy the thumbnail entries the extractor reported. Object form copies
/// by key; the extractor's array form is keyed by the conventional ladder
/// names. Missing resolutions are never filled in.
fn thumbnails(raw: &Value) -> BTreeMap<String, Thumbnail> {
    let mut out = BTreeMap::new();

    match raw.get("thumbnails") {
        Some(Value::Object(entries)) => {
            for (name, entry) in entries {
                if let Some(thumb) = thumbnail_entry(entry) {
                    out.insert(name.clone(), thumb);
                }
            }
        }
        Some(Value::Array(entries)) => {
            for entry in entries {
                let Some(thumb) = thumbnail_entry(entry) else {
                    continue;
                };
                let Some(width) = entry.get("width").and_then(Value::as_u64) else {
                    continue;
                };
                if let Some((_, name)) = THUMBNAIL_LADDER.iter().find(|(w, _)| *w == width) {
                    out.insert((*name).to_owned(), thumb);
                }
            }
        }
        _ => {}
    }

    out
}

fn thumbnail_entry(entry: &Value) -> Option<Thumbnail> {
    let url = entry.get("url").and_then(Value::as_str)?.to_owned();
    Some(Thumbnail {
        url,
        width: entry.get("width").and_then(Value::as_u64).map(|w| w as u32),
        height: entry.get("height").and_then(Value::as_u64).map(|h| h as u32),
    })
}
