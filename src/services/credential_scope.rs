use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Fallback cookie material for anonymous lookups, in Netscape cookie file
/// format as expected by yt-dlp's `--cookies` option.
pub(crate) const DEFAULT_YOUTUBE_COOKIES: &str = "\
# Netscape HTTP Cookie File

# Domain, Include Subdomains, Path, Secure, Expiry, Name, Value

.youtube.com\tTRUE\t/\tFALSE\t0\tPREF\ttz=UTC
.youtube.com\tTRUE\t/\tTRUE\t0\tVISITOR_INFO1_LIVE\tXR0xd-RHxkM
.youtube.com\tTRUE\t/\tTRUE\t0\tVISITOR_PRIVACY_METADATA\tCgJVUxIEGgAgJg%3D%3D
.youtube.com\tTRUE\t/\tTRUE\t0\t__Secure-ROLLOUT_TOKEN\tCMnsvMX91un_CRDE3JzWlYyPAxiQx_vWlYyPAw%3D%3D
.youtube.com\tTRUE\t/\tTRUE\t0\tYSC\twk_oCT5BVFM
.youtube.com\tTRUE\t/\tTRUE\t0\tGPS\t1
";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ScopeError {
    #[error("unable to create cookie file: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) trait CredentialScopeManager: Send + Sync {
    fn acquire(&self) -> Result<CredentialScope, ScopeError>;
}

/// Disposable credential artifact owned by exactly one in-flight lookup.
pub(crate) struct CredentialScope {
    path: PathBuf,
    backing: Backing,
}

enum Backing {
    Ephemeral(NamedTempFile),
    Shared,
}

impl CredentialScope {
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the artifact. Removal is best-effort: a failure is logged and
    /// never replaces the lookup's own outcome. Dropping an unreleased scope
    /// removes the artifact as well, so the panic path is covered.
    pub(crate) fn release(self) {
        match self.backing {
            Backing::Ephemeral(file) => {
                if let Err(error) = file.close() {
                    warn!(?error, "Unable to remove generated cookie file");
                }
            }
            Backing::Shared => {}
        }
    }
}

/// Generates a fresh cookie file per lookup and removes it on release.
pub(crate) struct EphemeralCookieFile {
    cookie_text: String,
    dir: Option<PathBuf>,
}

impl EphemeralCookieFile {
    pub(crate) fn new(cookie_text: String) -> Self {
        Self {
            cookie_text,
            dir: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_in(dir: PathBuf, cookie_text: String) -> Self {
        Self {
            cookie_text,
            dir: Some(dir),
        }
    }
}

impl CredentialScopeManager for EphemeralCookieFile {
    fn acquire(&self) -> Result<CredentialScope, ScopeError> {
        let mut file = match &self.dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        file.write_all(self.cookie_text.as_bytes())?;
        file.flush()?;

        debug!(path = %file.path().display(), "Generated cookie file");

        Ok(CredentialScope {
            path: file.path().to_path_buf(),
            backing: Backing::Ephemeral(file),
        })
    }
}

/// Points every lookup at one pre-existing cookie file; release removes
/// nothing since the file is not owned by the lookup.
pub(crate) struct SharedCookieFile {
    path: PathBuf,
}

impl SharedCookieFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialScopeManager for SharedCookieFile {
    fn acquire(&self) -> Result<CredentialScope, ScopeError> {
        Ok(CredentialScope {
            path: self.path.clone(),
            backing: Backing::Shared,
        })
    }
}
