//! View bindings that warm post images in the background.
//!
//! A binding is keyed by the id list and image size it was last given.
//! Re-binding a value-equal key is a no-op; a new key aborts the previous
//! background driver. Aborting a driver never cancels fetches already in
//! flight; those still land in the shared preload cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::services::image_urls::{ImageSize, ImageUrlBuilder};
use crate::domain::entities::PostId;
use crate::domain::errors::ImageLoadFailure;
use crate::infrastructure::images::{BatchSummary, ImagePreloader};

#[derive(Debug, Clone, PartialEq, Eq)]
struct BindingKey {
    ids: Vec<i64>,
    size: ImageSize,
}

impl BindingKey {
    fn new(ids: &[i64], size: ImageSize) -> Self {
        Self {
            ids: ids.to_vec(),
            size,
        }
    }
}

fn seeds(ids: &[PostId]) -> Vec<i64> {
    ids.iter().map(|id| id.as_seed()).collect()
}

fn log_failure(failure: &ImageLoadFailure) {
    warn!(url = %failure.url, error = %failure.source, "Failed to preload image");
}

/// Fire-and-forget preloading for a changing id list.
pub struct PreloadBinding {
    preloader: ImagePreloader,
    urls: ImageUrlBuilder,
    key: Option<BindingKey>,
    task: Option<JoinHandle<BatchSummary>>,
}

impl PreloadBinding {
    /// Creates an idle binding over the shared cache.
    #[must_use]
    pub const fn new(preloader: ImagePreloader, urls: ImageUrlBuilder) -> Self {
        Self {
            preloader,
            urls,
            key: None,
            task: None,
        }
    }

    /// Binds a new id list. Returns true if a background preload started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn update(&mut self, ids: &[i64], size: ImageSize) -> bool {
        let key = BindingKey::new(ids, size);
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.key = Some(key);

        if let Some(task) = self.task.take() {
            task.abort();
        }
        if ids.is_empty() {
            return false;
        }

        let urls = self.urls.build_all(ids, size);
        let preloader = self.preloader.clone();
        debug!(count = urls.len(), %size, "Preloading images in background");

        self.task = Some(tokio::spawn(async move {
            let outcomes = preloader.preload_all(&urls).await;
            for outcome in &outcomes {
                if let Err(failure) = &outcome.result {
                    log_failure(failure);
                }
            }
            BatchSummary::from_outcomes(&outcomes)
        }));
        true
    }

    /// Binds the images of the given posts.
    pub fn update_posts(&mut self, ids: &[PostId], size: ImageSize) -> bool {
        self.update(&seeds(ids), size)
    }

    /// Waits for the current background preload, if any.
    pub async fn settle(&mut self) -> Option<BatchSummary> {
        let task = self.task.take()?;
        task.await.ok()
    }
}

impl Drop for PreloadBinding {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Aggregate progress of a bound id list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadProgress {
    /// URLs that reached a terminal state, successful or not.
    pub loaded: usize,
    /// URLs requested by the current id list.
    pub total: usize,
}

impl PreloadProgress {
    /// Returns true once every URL is loaded or failed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }

    /// Completion rounded to the nearest whole percent.
    #[must_use]
    pub const fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        (self.loaded * 200 + self.total) / (self.total * 2)
    }
}

/// Preloading that reports how many images have finished.
///
/// Every requested URL counts once when it reaches a terminal state,
/// whether the cache already held it or a new fetch was needed.
pub struct ProgressBinding {
    preloader: ImagePreloader,
    urls: ImageUrlBuilder,
    key: Option<BindingKey>,
    task: Option<JoinHandle<()>>,
    generation: Arc<AtomicU64>,
    progress: Arc<watch::Sender<PreloadProgress>>,
}

impl ProgressBinding {
    /// Creates an idle binding that reports no work.
    #[must_use]
    pub fn new(preloader: ImagePreloader, urls: ImageUrlBuilder) -> Self {
        let (progress, _) = watch::channel(PreloadProgress::default());
        Self {
            preloader,
            urls,
            key: None,
            task: None,
            generation: Arc::new(AtomicU64::new(0)),
            progress: Arc::new(progress),
        }
    }

    /// Binds a new id list and resets progress. Returns true if the key changed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn update(&mut self, ids: &[i64], size: ImageSize) -> bool {
        let key = BindingKey::new(ids, size);
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.key = Some(key);

        if let Some(task) = self.task.take() {
            task.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress.send_replace(PreloadProgress {
            loaded: 0,
            total: ids.len(),
        });
        if ids.is_empty() {
            return true;
        }

        let urls = self.urls.build_all(ids, size);
        let preloader = self.preloader.clone();
        let current = Arc::clone(&self.generation);
        let progress = Arc::clone(&self.progress);

        self.task = Some(tokio::spawn(async move {
            let mut pending: FuturesUnordered<_> = urls
                .into_iter()
                .map(|url| {
                    let preloader = preloader.clone();
                    async move { preloader.preload(&url).await }
                })
                .collect();

            while let Some(result) = pending.next().await {
                if let Err(failure) = &result {
                    log_failure(failure);
                }
                progress.send_if_modified(|p| {
                    if current.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    p.loaded += 1;
                    true
                });
            }
        }));
        true
    }

    /// Binds the images of the given posts.
    pub fn update_posts(&mut self, ids: &[PostId], size: ImageSize) -> bool {
        self.update(&seeds(ids), size)
    }

    /// Current progress snapshot.
    #[must_use]
    pub fn progress(&self) -> PreloadProgress {
        *self.progress.borrow()
    }

    /// Receives every progress change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PreloadProgress> {
        self.progress.subscribe()
    }

    /// Waits until every bound URL reached a terminal state.
    pub async fn wait_complete(&self) -> PreloadProgress {
        let mut rx = self.subscribe();
        let result = rx.wait_for(PreloadProgress::is_complete).await.map(|p| *p);
        result.unwrap_or_else(|_| self.progress())
    }
}

impl Drop for ProgressBinding {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LoadStatus;
    use crate::domain::ports::mocks::MockImageFetcher;
    use std::time::Duration;
    use test_case::test_case;

    fn setup(fetcher: MockImageFetcher) -> (Arc<MockImageFetcher>, ImagePreloader) {
        let fetcher = Arc::new(fetcher);
        let preloader = ImagePreloader::new(fetcher.clone());
        (fetcher, preloader)
    }

    fn card_url(id: i64) -> String {
        ImageUrlBuilder::default().build(id, ImageSize::CARD)
    }

    #[tokio::test]
    async fn test_value_equal_ids_do_not_retrigger() {
        let (fetcher, preloader) = setup(MockImageFetcher::new());
        let mut binding = PreloadBinding::new(preloader, ImageUrlBuilder::default());

        assert!(binding.update(&[1, 2, 3], ImageSize::CARD));
        binding.settle().await;

        assert!(!binding.update(&[1, 2, 3], ImageSize::CARD));
        assert!(binding.settle().await.is_none());
        assert_eq!(fetcher.total_calls(), 3);
    }

    #[tokio::test]
    async fn test_changed_ids_only_fetch_new_urls() {
        let (fetcher, preloader) = setup(MockImageFetcher::new());
        let mut binding = PreloadBinding::new(preloader, ImageUrlBuilder::default());

        binding.update(&[1, 2], ImageSize::CARD);
        binding.settle().await;
        assert!(binding.update(&[2, 3], ImageSize::CARD));
        let summary = binding.settle().await;

        assert_eq!(summary, Some(BatchSummary { loaded: 2, failed: 0 }));
        assert_eq!(fetcher.total_calls(), 3);
        assert_eq!(fetcher.calls_for(&card_url(2)), 1);
    }

    #[tokio::test]
    async fn test_size_is_part_of_the_key() {
        let (fetcher, preloader) = setup(MockImageFetcher::new());
        let mut binding = PreloadBinding::new(preloader, ImageUrlBuilder::default());

        binding.update(&[1], ImageSize::CARD);
        binding.settle().await;
        assert!(binding.update(&[1], ImageSize::COVER));
        binding.settle().await;

        assert_eq!(fetcher.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_ids_start_nothing() {
        let (fetcher, preloader) = setup(MockImageFetcher::new());
        let mut binding = PreloadBinding::new(preloader, ImageUrlBuilder::default());

        assert!(!binding.update(&[], ImageSize::CARD));
        assert!(binding.settle().await.is_none());
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_failures_are_downgraded() {
        let (_, preloader) = setup(MockImageFetcher::new().failing_on(card_url(2)));
        let mut binding = PreloadBinding::new(preloader.clone(), ImageUrlBuilder::default());

        binding.update_posts(&[PostId(1), PostId(2)], ImageSize::CARD);
        let summary = binding.settle().await;

        assert_eq!(summary, Some(BatchSummary { loaded: 1, failed: 1 }));
        assert_eq!(preloader.status(&card_url(2)), LoadStatus::Error);
    }

    #[tokio::test]
    async fn test_update_does_not_wait_for_fetches() {
        let (_, preloader) = setup(MockImageFetcher::new().hanging_on(card_url(1)));
        let mut binding = PreloadBinding::new(preloader.clone(), ImageUrlBuilder::default());

        assert!(binding.update(&[1], ImageSize::CARD));
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(preloader.status(&card_url(1)), LoadStatus::Loading);
    }

    #[tokio::test]
    async fn test_dropped_binding_lets_fetches_finish() {
        let (fetcher, preloader) =
            setup(MockImageFetcher::new().with_delay(Duration::from_millis(30)));
        let mut binding = PreloadBinding::new(preloader.clone(), ImageUrlBuilder::default());

        binding.update(&[1], ImageSize::CARD);
        tokio::time::sleep(Duration::from_millis(5)).await;
        drop(binding);

        assert!(preloader.preload(&card_url(1)).await.is_ok());
        assert_eq!(fetcher.calls_for(&card_url(1)), 1);
    }

    #[test_case(0, 0, 100 ; "nothing_requested")]
    #[test_case(0, 3, 0 ; "none_done")]
    #[test_case(1, 3, 33 ; "one_third")]
    #[test_case(2, 3, 67 ; "two_thirds_rounds_up")]
    #[test_case(1, 8, 13 ; "half_rounds_up")]
    #[test_case(3, 3, 100 ; "done")]
    fn test_progress_percent(loaded: usize, total: usize, expected: usize) {
        assert_eq!(PreloadProgress { loaded, total }.percent(), expected);
    }

    #[tokio::test]
    async fn test_progress_counts_failures_as_done() {
        let (_, preloader) = setup(MockImageFetcher::new().failing_on(card_url(2)));
        let mut binding = ProgressBinding::new(preloader, ImageUrlBuilder::default());

        binding.update(&[1, 2, 3], ImageSize::CARD);
        let progress = binding.wait_complete().await;

        assert_eq!(progress, PreloadProgress { loaded: 3, total: 3 });
        assert_eq!(progress.percent(), 100);
    }

    #[tokio::test]
    async fn test_progress_counts_warm_entries() {
        let (fetcher, preloader) = setup(MockImageFetcher::new());
        assert!(preloader.preload(&card_url(1)).await.is_ok());
        let mut binding = ProgressBinding::new(preloader, ImageUrlBuilder::default());

        binding.update(&[1, 2], ImageSize::CARD);
        let progress = binding.wait_complete().await;

        assert_eq!(progress, PreloadProgress { loaded: 2, total: 2 });
        assert_eq!(fetcher.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_progress_resets_on_new_ids() {
        let (_, preloader) = setup(MockImageFetcher::new().hanging_on(card_url(1)));
        let mut binding = ProgressBinding::new(preloader, ImageUrlBuilder::default());

        binding.update(&[1], ImageSize::CARD);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(binding.progress(), PreloadProgress { loaded: 0, total: 1 });

        assert!(binding.update(&[2, 3], ImageSize::CARD));
        let progress = binding.wait_complete().await;

        assert_eq!(progress, PreloadProgress { loaded: 2, total: 2 });
    }

    #[tokio::test]
    async fn test_progress_for_empty_ids_is_complete() {
        let (_, preloader) = setup(MockImageFetcher::new());
        let mut binding = ProgressBinding::new(preloader, ImageUrlBuilder::default());

        binding.update(&[], ImageSize::CARD);

        assert!(binding.progress().is_complete());
        assert_eq!(binding.wait_complete().await.total, 0);
    }
}
