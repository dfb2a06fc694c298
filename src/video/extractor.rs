use crate::config::ExtractorConfig;
use crate::video::types::VideoReference;
use serde_json::Value;
use std::process::Command;

/// Error types for metadata extraction, distinguishing videos the upstream
/// refuses to serve from failures of the extractor itself.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// The collaborator reports the video private, removed, or blocked
    #[error("video unavailable: {0}")]
    Unavailable(String),
    /// The collaborator could not be run or produced no usable output
    #[error("extraction failed: {0}")]
    Upstream(String),
}

/// A metadata extraction strategy. The real implementation shells out to
/// an external program; tests swap in a deterministic double.
pub trait MetadataExtractor: Send + Sync {
    /// Fetch the raw metadata bag for a video. No field interpretation
    /// happens here; the full structure is passed onward.
    fn fetch(&self, video: &VideoReference) -> Result<Value, ExtractError>;

    /// Get the name of this extractor for logging/debugging
    fn name(&self) -> &'static str;
}

/// Shells out to `yt-dlp`, which owns all scraping, retry, and timeout
/// policy. One JSON document on stdout per invocation.
pub struct YtDlpExtractor {
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Map the collaborator's stderr onto the error taxonomy. yt-dlp
    /// reports the cause as `ERROR: [youtube] <id>: <reason>`.
    fn classify_failure(stderr: &str) -> ExtractError {
        let cause = stderr
            .lines()
            .filter(|line| line.contains("ERROR"))
            .last()
            .unwrap_or(stderr)
            .trim();

        let lowered = cause.to_lowercase();
        let unavailable = ["private", "unavailable", "removed", "not available", "confirm your age"]
            .iter()
            .any(|marker| lowered.contains(marker));

        if unavailable {
            ExtractError::Unavailable(cause.to_owned())
        } else if cause.is_empty() {
            ExtractError::Upstream("extractor exited with an error".to_owned())
        } else {
            ExtractError::Upstream(cause.to_owned())
        }
    }
}

impl MetadataExtractor for YtDlpExtractor {
    fn fetch(&self, video: &VideoReference) -> Result<Value, ExtractError> {
        let url = video.canonical_url();

        let mut cmd = Command::new(&self.config.program);
        cmd.arg("--dump-single-json")
            .arg("--skip-download")
            .arg("--no-warnings")
            .arg("--socket-timeout")
            .arg(self.config.socket_timeout_secs.to_string())
            .arg("--user-agent")
            .arg(&self.config.user_agent)
            .arg("--add-headers")
            .arg("Accept-Language:en-US,en;q=0.9");
        if !self.config.player_clients.is_empty() {
            cmd.arg("--extractor-args").arg(format!(
                "youtube:player_client={}",
                self.config.player_clients.join(",")
            ));
        }
        cmd.arg(&url);

        log::debug!("extractor={} url={url}", self.name());

        let output = cmd.output().map_err(|err| {
            ExtractError::Upstream(format!("failed to run {}: {err}", self.config.program))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = Self::classify_failure(&stderr);
            log::warn!("extractor={} outcome=error err={err}", self.name());
            return Err(err);
        }

        serde_json::from_slice(&output.stdout).map_err(|err| {
            ExtractError::Upstream(format!("unreadable extractor output: {err}"))
        })
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
