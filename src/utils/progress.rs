//! Download progress tracking and terminal progress bars
//!
//! Progress reporting is split in two so that the throttling logic can be tested
//! without a network or a terminal:
//!
//! - [`ObservedStream`] wraps any fallible byte-chunk [`Stream`], forwards every item
//!   unchanged, and calls a callback with a [`Progress`] snapshot whenever the
//!   cumulative percentage has advanced by more than [`REPORT_STEP_PERCENT`] points
//!   since the last report
//! - [`ProgressBar`] is a thin `indicatif` wrapper the downloader drives from that
//!   callback
//!
//! # Environment Variables
//!
//! - `DKENV_NO_PROGRESS`: set to any value to hide progress bars
//!
//! # Examples
//!
//! ```rust
//! use dkenv::utils::progress::ObservedStream;
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let chunks = futures::stream::iter(vec![
//!     Ok::<_, std::io::Error>(vec![0u8; 50]),
//!     Ok(vec![0u8; 50]),
//! ]);
//! let mut observed = ObservedStream::new(chunks, Some(100), |p| {
//!     println!("{} of {:?} bytes", p.transferred, p.total);
//! });
//! while let Some(chunk) = observed.next().await {
//!     let _ = chunk;
//! }
//! # }
//! ```

use futures::Stream;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::pin::Pin;
use std::task::{Context, Poll, ready};

/// Minimum percentage advance between two progress reports.
pub const REPORT_STEP_PERCENT: u64 = 2;

/// Checks if progress bars should be disabled.
fn is_progress_disabled() -> bool {
    std::env::var("DKENV_NO_PROGRESS").is_ok()
}

/// Snapshot handed to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Bytes transferred so far.
    pub transferred: u64,
    /// Declared content length, if the source announced one.
    pub total: Option<u64>,
    /// `transferred / total` as a percentage.
    pub percent: f64,
}

/// Throttles progress notifications to steps of more than [`REPORT_STEP_PERCENT`].
///
/// Without a known, non-zero total no percentage can be computed and nothing is
/// reported. The first and final states are not flushed explicitly.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: Option<u64>,
    transferred: u64,
    last_reported: u64,
}

impl ProgressTracker {
    #[must_use]
    pub const fn new(total: Option<u64>) -> Self {
        Self {
            total,
            transferred: 0,
            last_reported: 0,
        }
    }

    /// Account for `bytes` more bytes; returns a snapshot when one is due.
    pub fn record(&mut self, bytes: u64) -> Option<Progress> {
        if bytes == 0 {
            return None;
        }
        self.transferred += bytes;

        let total = self.total.filter(|t| *t > 0)?;

        // Integer comparison keeps the step boundary exact
        let advanced = u128::from(self.transferred - self.last_reported) * 100;
        if advanced > u128::from(REPORT_STEP_PERCENT) * u128::from(total) {
            self.last_reported = self.transferred;
            Some(Progress {
                transferred: self.transferred,
                total: self.total,
                percent: self.transferred as f64 * 100.0 / total as f64,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn transferred(&self) -> u64 {
        self.transferred
    }
}

/// A byte-chunk stream that reports progress as it is consumed.
pub struct ObservedStream<S, F> {
    inner: S,
    tracker: ProgressTracker,
    on_progress: F,
}

impl<S, F: FnMut(Progress)> ObservedStream<S, F> {
    pub fn new(inner: S, total: Option<u64>, on_progress: F) -> Self {
        Self {
            inner,
            tracker: ProgressTracker::new(total),
            on_progress,
        }
    }

    /// Bytes forwarded so far.
    pub fn transferred(&self) -> u64 {
        self.tracker.transferred()
    }
}

impl<S, B, E, F> Stream for ObservedStream<S, F>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    F: FnMut(Progress) + Unpin,
{
    type Item = Result<B, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        let item = ready!(Pin::new(&mut this.inner).poll_next(cx));

        if let Some(Ok(chunk)) = &item
            && let Some(progress) = this.tracker.record(chunk.as_ref().len() as u64)
        {
            (this.on_progress)(progress);
        }

        Poll::Ready(item)
    }
}

/// A progress bar with consistent styling that hides itself when disabled.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a byte-count download bar of `len` bytes.
    ///
    /// The bar is hidden when `visible` is false or `DKENV_NO_PROGRESS` is set.
    #[must_use]
    pub fn new_download(len: u64, visible: bool) -> Self {
        let bar = if !visible || is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(download_style());
            bar
        };
        Self {
            inner: bar,
        }
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .map(|style| style.progress_chars("━╸━"))
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
}
