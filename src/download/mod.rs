//! Streaming download of docker client binaries into the install store.
//!
//! A download resolves the platform, requests
//! `<base>/builds/<Platform>/x86_64/docker-<version>` over HTTPS with the
//! [`redirect`] policy enforced per hop, and streams the body to a hidden temporary
//! file in the store. Only a complete body is renamed onto the install entry, so a
//! failed or interrupted download never makes a version look installed.
//!
//! Failures map onto distinct [`DkenvError`] variants: an unknown OS is
//! [`DkenvError::UnsupportedPlatform`], a non-2xx answer is
//! [`DkenvError::VersionNotFound`], redirect violations are
//! [`DkenvError::TooManyRedirects`] / [`DkenvError::InsecureRedirect`], and transport
//! problems are [`DkenvError::Network`]. Nothing is retried.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dkenv::download::Downloader;
//! use dkenv::store::InstallStore;
//! use dkenv::version::Version;
//!
//! # async fn example() -> dkenv::core::Result<()> {
//! let downloader = Downloader::new(InstallStore::new("/home/me/.dkenv"))?;
//! let path = downloader.fetch(&Version::parse("1.9.1")?).await?;
//! println!("Installed {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod redirect;

use crate::constants::{DEFAULT_DOWNLOAD_BASE_URL, DOWNLOAD_ARCH};
use crate::core::{DkenvError, Result};
use crate::store::InstallStore;
use crate::utils::platform::Platform;
use crate::utils::progress::{ObservedStream, ProgressBar};
use crate::version::Version;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Fetches docker binaries and materializes them in an [`InstallStore`].
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
    store: InstallStore,
    base_url: String,
    platform: Option<Platform>,
    show_progress: bool,
}

impl Downloader {
    /// Create a downloader for the official origin.
    ///
    /// # Errors
    ///
    /// [`DkenvError::Network`] if the HTTP client cannot be initialised.
    pub fn new(store: InstallStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(redirect::policy())
            .user_agent(concat!("dkenv/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| DkenvError::Network {
                url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            store,
            base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            platform: None,
            show_progress: true,
        })
    }

    /// Serve builds from another origin (a mirror, or a local server in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Pin the platform instead of detecting it from the running OS.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Toggle the terminal progress bar.
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &InstallStore {
        &self.store
    }

    /// Download URL for `version` on `platform`.
    #[must_use]
    pub fn download_url(&self, platform: Platform, version: &Version) -> String {
        format!(
            "{}/builds/{}/{}/{}",
            self.base_url,
            platform,
            DOWNLOAD_ARCH,
            version.entry_name()
        )
    }

    /// Download `version` and install it as `docker-<version>` in the store.
    ///
    /// Returns the path of the new install entry. The active symlink is not touched.
    pub async fn fetch(&self, version: &Version) -> Result<PathBuf> {
        let platform = match self.platform {
            Some(platform) => platform,
            None => Platform::current()?,
        };
        let url = self.download_url(platform, version);

        debug!("Requesting {}", url);
        let response = self.client.get(&url).send().await.map_err(|e| classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DkenvError::VersionNotFound {
                version: version.to_string(),
                status: status.as_u16(),
            });
        }

        let dest = self.store.entry_path(version);
        let temp = self.store.temp_path(version);

        if let Err(e) = self.write_body(response, &url, version, &temp).await {
            discard_partial(&temp).await;
            return Err(e);
        }

        if let Err(e) = tokio::fs::rename(&temp, &dest).await {
            discard_partial(&temp).await;
            return Err(DkenvError::fs("move download into place", &dest, e));
        }

        info!("Downloaded docker {} to {}", version, dest.display());
        Ok(dest)
    }

    async fn write_body(
        &self,
        response: reqwest::Response,
        url: &str,
        version: &Version,
        temp: &Path,
    ) -> Result<()> {
        let total = response.content_length();
        let mut file = tokio::fs::File::create(temp)
            .await
            .map_err(|e| DkenvError::fs("create temporary download file", temp, e))?;

        let bar = ProgressBar::new_download(total.unwrap_or(0), self.show_progress);
        bar.set_prefix(version.entry_name());

        let mut body =
            ObservedStream::new(Box::pin(response.bytes_stream()), total, |progress| {
                debug!("Transferred {} percent", progress.percent as u64);
                bar.set_position(progress.transferred);
            });

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| classify(url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DkenvError::fs("write download", temp, e))?;
        }
        let written = body.transferred();
        drop(body);
        bar.finish_and_clear();

        file.flush().await.map_err(|e| DkenvError::fs("flush download", temp, e))?;
        file.sync_all().await.map_err(|e| DkenvError::fs("sync download", temp, e))?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(temp, std::fs::Permissions::from_mode(0o755))
                .await
                .map_err(|e| DkenvError::fs("mark download executable", temp, e))?;
        }

        debug!("Wrote {} bytes to {}", written, temp.display());
        Ok(())
    }
}

/// Map a client error to a redirect violation when the policy caused it.
fn classify(url: &str, error: reqwest::Error) -> DkenvError {
    match redirect::violation_in(&error) {
        Some(violation) => violation.into(),
        None => DkenvError::Network {
            url: url.to_string(),
            source: error,
        },
    }
}

async fn discard_partial(temp: &Path) {
    match tokio::fs::remove_file(temp).await {
        Ok(()) => debug!("Removed partial download {}", temp.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial download {}: {}", temp.display(), e),
    }
}
