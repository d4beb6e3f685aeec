use serde::Deserialize;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_lookup_timeout() -> u64 {
    30u64
}

fn default_socket_timeout() -> u64 {
    60u64
}

fn default_search_page_size() -> usize {
    40
}

fn default_yt_dlp_binary() -> String {
    "yt-dlp".to_string()
}

fn default_search_user_agent() -> String {
    "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Mobile Safari/537.36".to_string()
}

fn default_video_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    /// Caller-side deadline for one lookup, in seconds.
    #[serde(default = "default_lookup_timeout")]
    pub(crate) lookup_timeout: u64,
    /// Socket timeout passed through to yt-dlp, in seconds.
    #[serde(default = "default_socket_timeout")]
    pub(crate) socket_timeout: u64,
    #[serde(default = "default_search_page_size")]
    pub(crate) search_page_size: usize,
    #[serde(default = "default_yt_dlp_binary")]
    pub(crate) yt_dlp_binary: String,
    #[serde(default = "default_search_user_agent")]
    pub(crate) search_user_agent: String,
    #[serde(default = "default_video_user_agent")]
    pub(crate) video_user_agent: String,
    /// Pre-existing cookie file shared across lookups. When unset, a fresh
    /// cookie file is generated per lookup and removed afterwards.
    #[serde(default)]
    pub(crate) cookies_file: Option<String>,
    /// Netscape-format cookie text for generated cookie files.
    #[serde(default)]
    pub(crate) youtube_cookies: Option<String>,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }
}
