//! Image preload cache.
//!
//! Every URL moves through `Idle -> Loading -> Loaded | Error` exactly once.
//! The first caller for a URL spawns the fetch; later callers subscribe to
//! its outcome instead of fetching again. Terminal states are never left.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::domain::entities::{ImageHandle, LoadStatus};
use crate::domain::errors::{FetchError, ImageLoadFailure};
use crate::domain::ports::ImageFetcherPort;

/// Result of preloading one URL.
pub type PreloadResult = Result<ImageHandle, ImageLoadFailure>;

type OutcomeReceiver = watch::Receiver<Option<PreloadResult>>;

enum Slot {
    Loading(OutcomeReceiver),
    Loaded(ImageHandle),
    Failed(ImageLoadFailure),
}

impl Slot {
    const fn status(&self) -> LoadStatus {
        match self {
            Self::Loading(_) => LoadStatus::Loading,
            Self::Loaded(_) => LoadStatus::Loaded,
            Self::Failed(_) => LoadStatus::Error,
        }
    }
}

#[derive(Default)]
struct PreloadState {
    slots: Mutex<HashMap<String, Slot>>,
    fetches_started: AtomicU64,
}

/// Outcome of one URL within a batch.
#[derive(Debug, Clone)]
pub struct PreloadOutcome {
    /// URL that was preloaded.
    pub url: String,
    /// Decoded image or the recorded failure.
    pub result: PreloadResult,
}

impl PreloadOutcome {
    /// Returns true if the image loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Loaded/failed counts of a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images that loaded.
    pub loaded: usize,
    /// Images that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Counts the outcomes of a best-effort batch.
    #[must_use]
    pub fn from_outcomes(outcomes: &[PreloadOutcome]) -> Self {
        let loaded = outcomes.iter().filter(|o| o.is_loaded()).count();
        Self {
            loaded,
            failed: outcomes.len() - loaded,
        }
    }

    /// Number of URLs in the batch.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.loaded + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} images warmed ({} failed)",
            self.loaded,
            self.total(),
            self.failed
        )
    }
}

/// Snapshot of the cache contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadStats {
    /// URLs with a fetch in flight.
    pub loading: usize,
    /// URLs holding a decoded image.
    pub loaded: usize,
    /// URLs whose fetch failed.
    pub failed: usize,
    /// Network fetches started since creation.
    pub fetches_started: u64,
}

impl std::fmt::Display for PreloadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Preload cache: {} loaded, {} loading, {} failed ({} fetches)",
            self.loaded, self.loading, self.failed, self.fetches_started
        )
    }
}

/// Preload cache keyed by URL with in-flight de-duplication.
///
/// Clones share the same cache. Entries live as long as the last clone;
/// there is no eviction and no retry.
#[derive(Clone)]
pub struct ImagePreloader {
    fetcher: Arc<dyn ImageFetcherPort>,
    state: Arc<PreloadState>,
}

impl std::fmt::Debug for ImagePreloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePreloader")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl ImagePreloader {
    /// Creates an empty cache backed by `fetcher`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcherPort>) -> Self {
        Self {
            fetcher,
            state: Arc::new(PreloadState::default()),
        }
    }

    /// Preloads `url`, fetching it only if no earlier call has.
    ///
    /// The fetch runs on its own task, so dropping the returned future
    /// does not cancel it; the outcome still lands in the cache.
    ///
    /// # Errors
    /// Returns the URL's terminal failure, shared by every caller.
    pub async fn preload(&self, url: &str) -> PreloadResult {
        let mut rx = {
            let mut slots = self.state.slots.lock();
            match slots.get(url) {
                Some(Slot::Loaded(handle)) => {
                    trace!(url = %url, "Preload cache hit");
                    return Ok(handle.clone());
                }
                Some(Slot::Failed(failure)) => {
                    trace!(url = %url, "Preload previously failed");
                    return Err(failure.clone());
                }
                Some(Slot::Loading(rx)) => {
                    trace!(url = %url, "Joining in-flight preload");
                    rx.clone()
                }
                None => {
                    let (tx, rx) = watch::channel(None);
                    slots.insert(url.to_string(), Slot::Loading(rx.clone()));
                    self.spawn_fetch(url.to_string(), tx);
                    rx
                }
            }
        };

        let outcome = rx.wait_for(Option::is_some).await.map(|v| v.clone());

        match outcome {
            Ok(Some(result)) => result,
            Ok(None) | Err(_) => self.record_lost_fetch(url),
        }
    }

    /// Settles a URL whose fetch task ended without reporting.
    fn record_lost_fetch(&self, url: &str) -> PreloadResult {
        let mut slots = self.state.slots.lock();
        match slots.get(url) {
            Some(Slot::Loaded(handle)) => Ok(handle.clone()),
            Some(Slot::Failed(failure)) => Err(failure.clone()),
            Some(Slot::Loading(_)) | None => {
                let failure = ImageLoadFailure::new(
                    url,
                    FetchError::TaskFailed("preload task dropped".to_string()),
                );
                slots.insert(url.to_string(), Slot::Failed(failure.clone()));
                Err(failure)
            }
        }
    }

    fn spawn_fetch(&self, url: String, tx: watch::Sender<Option<PreloadResult>>) {
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        state.fetches_started.fetch_add(1, Ordering::Relaxed);

        tokio::spawn(async move {
            debug!(url = %url, "Fetching image for preload");

            let fetched = match AssertUnwindSafe(fetcher.fetch(&url)).catch_unwind().await {
                Ok(fetched) => fetched,
                Err(_) => {
                    warn!(url = %url, "Image fetcher panicked");
                    Err(FetchError::TaskFailed("image fetch panicked".to_string()))
                }
            };
            let result = fetched
                .map(ImageHandle::new)
                .map_err(|e| ImageLoadFailure::new(url.clone(), e));

            let slot = match &result {
                Ok(handle) => {
                    debug!(url = %url, width = handle.width(), height = handle.height(), "Image preloaded");
                    Slot::Loaded(handle.clone())
                }
                Err(failure) => {
                    debug!(url = %url, error = %failure.source, "Image preload failed");
                    Slot::Failed(failure.clone())
                }
            };
            state.slots.lock().insert(url, slot);

            tx.send_replace(Some(result));
        });
    }

    /// Preloads every URL concurrently and reports each outcome in input
    /// order. Never fails as a whole.
    pub async fn preload_all(&self, urls: &[String]) -> Vec<PreloadOutcome> {
        join_all(urls.iter().map(|url| async move {
            PreloadOutcome {
                url: url.clone(),
                result: self.preload(url).await,
            }
        }))
        .await
    }

    /// Preloads every URL, then fails with the first failure in input order.
    ///
    /// A failure does not cut the other preloads short.
    ///
    /// # Errors
    /// Returns the first URL's failure if any preload failed.
    pub async fn try_preload_all(&self, urls: &[String]) -> Result<Vec<ImageHandle>, ImageLoadFailure> {
        self.preload_all(urls)
            .await
            .into_iter()
            .map(|outcome| outcome.result)
            .collect()
    }

    /// Returns the current status of `url`; `Idle` if never requested.
    #[must_use]
    pub fn status(&self, url: &str) -> LoadStatus {
        self.state
            .slots
            .lock()
            .get(url)
            .map_or(LoadStatus::Idle, Slot::status)
    }

    /// Returns true if `url` holds a decoded image.
    #[must_use]
    pub fn is_preloaded(&self, url: &str) -> bool {
        self.status(url).is_loaded()
    }

    /// Returns the decoded image if `url` is loaded.
    #[must_use]
    pub fn cached(&self, url: &str) -> Option<ImageHandle> {
        match self.state.slots.lock().get(url) {
            Some(Slot::Loaded(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Number of URLs ever requested.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.slots.lock().len()
    }

    /// Returns true if no URL has been requested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts the cache entries by state.
    #[must_use]
    pub fn stats(&self) -> PreloadStats {
        let slots = self.state.slots.lock();
        let mut stats = PreloadStats {
            fetches_started: self.state.fetches_started.load(Ordering::Relaxed),
            ..PreloadStats::default()
        };
        for slot in slots.values() {
            match slot.status() {
                LoadStatus::Loading => stats.loading += 1,
                LoadStatus::Loaded => stats.loaded += 1,
                LoadStatus::Error => stats.failed += 1,
                LoadStatus::Idle => {}
            }
        }
        stats
    }
}
