mod parser;


use crate::{SearchResults, VideoDetail};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

pub use parser::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("unable to run yt-dlp: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Extraction(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Clone, Debug)]
pub struct YtDlpOptions {
    pub binary: PathBuf,
    /// Socket timeout passed through to yt-dlp, in seconds.
    pub socket_timeout_secs: u64,
    /// Number of search candidates requested per query. The platform has no
    /// native pagination honored here, so the count is fixed up front.
    pub search_page_size: usize,
    pub search_user_agent: String,
    pub video_user_agent: String,
}

/// Client for the yt-dlp command line extractor.
///
/// Both operations are synchronous and may block for tens of seconds on
/// network I/O, which is why callers run them on a dedicated worker thread
/// rather than on a request-serving thread.
pub struct YtDlpClient {
    options: YtDlpOptions,
}

impl YtDlpClient {
    pub fn new(options: YtDlpOptions) -> Self {
        Self { options }
    }

    pub fn search(
        &self,
        keyword: &str,
        cookie_file: &Path,
    ) -> Result<SearchResults, ProviderError> {
        let target = format!("ytsearch{}:{}", self.options.search_page_size, keyword);
        let stdout = self.run(&target, &self.options.search_user_agent, cookie_file, true)?;

        Ok(parser::parse_search_results(&stdout)?)
    }

    pub fn video_details(
        &self,
        video_id: &str,
        cookie_file: &Path,
    ) -> Result<VideoDetail, ProviderError> {
        let stdout = self.run(video_id, &self.options.video_user_agent, cookie_file, false)?;

        Ok(parser::parse_video_details(&stdout)?)
    }

    fn run(
        &self,
        target: &str,
        user_agent: &str,
        cookie_file: &Path,
        flat: bool,
    ) -> Result<Vec<u8>, ProviderError> {
        let mut command = Command::new(&self.options.binary);
        command
            .arg("--dump-single-json")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--cookies")
            .arg(cookie_file)
            .arg("--user-agent")
            .arg(user_agent)
            .arg("--socket-timeout")
            .arg(self.options.socket_timeout_secs.to_string());

        if flat {
            command.arg("--flat-playlist");
        }

        // "--" keeps user-supplied targets from being read as options.
        command.arg("--").arg(target);

        debug!(%target, "Running yt-dlp");

        let output = command.output()?;

        if !output.status.success() {
            return Err(ProviderError::Extraction(extraction_message(&output)));
        }

        Ok(output.stdout)
    }
}

fn extraction_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);

    stderr
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix("ERROR:"))
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("yt-dlp exited with {}", output.status))
}
