use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Extractor binary looked up on PATH
const DEFAULT_PROGRAM: &str = "yt-dlp";
/// Socket timeout handed to the extractor, in seconds
const DEFAULT_SOCKET_TIMEOUT_SECS: u64 = 20;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Where the HTTP service binds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Knobs passed through to the external extractor process
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Program name or path of the extractor binary
    #[serde(default = "default_program")]
    pub program: String,

    /// Socket timeout in seconds; the extractor owns all timeout policy
    #[serde(default = "default_socket_timeout_secs")]
    pub socket_timeout_secs: u64,

    /// Innertube clients to impersonate, tried in order
    #[serde(default = "default_player_clients")]
    pub player_clients: Vec<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            socket_timeout_secs: DEFAULT_SOCKET_TIMEOUT_SECS,
            player_clients: default_player_clients(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_socket_timeout_secs() -> u64 {
    DEFAULT_SOCKET_TIMEOUT_SECS
}

fn default_player_clients() -> Vec<String> {
    vec!["android".to_string(), "web".to_string()]
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Config {
    fn validate(&mut self) {
        if self.extractor.socket_timeout_secs == 0 {
            self.extractor.socket_timeout_secs = 1
        }

        if self.extractor.program.trim().is_empty() {
            self.extractor.program = DEFAULT_PROGRAM.to_string()
        }
    }

    /// Load from a YAML file, or fall back to defaults when no path is
    /// given. A named file that doesn't exist is an error; a missing key
    /// inside the file is not.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_yml::from_str(&raw)?
            }
            None => Self::default(),
        };
        config.validate();
        Ok(config)
    }
}
