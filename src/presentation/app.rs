//! Command dispatcher.

use std::io::Write;
use std::sync::Arc;

use color_eyre::Result;
use tracing::{debug, info, warn};

use crate::application::services::image_urls::{ImageSize, ImageUrlBuilder};
use crate::application::services::pagination::LayoutWidth;
use crate::application::use_cases::{
    AuthorDirectoryUseCase, AuthorProfileUseCase, HomeFeedUseCase, PostDetailUseCase,
};
use crate::application::ProfileTab;
use crate::domain::entities::{PostId, UserId};
use crate::domain::ports::BlogDataPort;
use crate::infrastructure::config::{AppConfig, Command};
use crate::infrastructure::images::{BatchSummary, ImagePreloader};
use crate::presentation::binding::{PreloadBinding, PreloadProgress, ProgressBinding};
use crate::presentation::views;

/// Runs CLI commands against the blog data and the shared image preloader.
pub struct App {
    home_feed: HomeFeedUseCase,
    post_detail: PostDetailUseCase,
    author_directory: AuthorDirectoryUseCase,
    author_profile: AuthorProfileUseCase,
    preloader: ImagePreloader,
    urls: ImageUrlBuilder,
    layout: LayoutWidth,
    preload_enabled: bool,
    warm_up: bool,
}

impl App {
    /// Builds the use cases over `data_port` and configures preloading from `config`.
    #[must_use]
    pub fn new(
        data_port: Arc<dyn BlogDataPort>,
        preloader: ImagePreloader,
        config: &AppConfig,
    ) -> Self {
        let urls = ImageUrlBuilder::new(config.images.service_url.clone());

        Self {
            home_feed: HomeFeedUseCase::new(data_port.clone(), urls.clone()),
            post_detail: PostDetailUseCase::new(data_port.clone(), urls.clone()),
            author_directory: AuthorDirectoryUseCase::new(data_port.clone()),
            author_profile: AuthorProfileUseCase::new(data_port, urls.clone()),
            preloader,
            urls,
            layout: config.ui.layout,
            preload_enabled: config.images.preload,
            warm_up: config.images.warm_up,
        }
    }

    /// Runs one command and writes the page to `out`.
    ///
    /// # Errors
    /// Returns error if the blog data cannot be loaded or `out` fails.
    pub async fn run(&self, command: Command, out: &mut impl Write) -> Result<()> {
        debug!(?command, "Running command");

        match command {
            Command::Home { page } => self.show_home(page, out).await,
            Command::Post { id } => self.show_post(PostId(id), out).await,
            Command::Users => self.show_authors(out).await,
            Command::User { id, tab } => self.show_author(UserId(id), tab, out).await,
            Command::Preload { ids, width, height } => {
                self.warm(&ids, ImageSize::new(width, height), out).await
            }
        }
    }

    fn binding(&self) -> PreloadBinding {
        PreloadBinding::new(self.preloader.clone(), self.urls.clone())
    }

    async fn show_home(&self, page: usize, out: &mut impl Write) -> Result<()> {
        let feed = self.home_feed.execute(page, self.layout).await?;

        if self.preload_enabled && self.warm_up && !feed.is_empty() {
            let mut warm_up = ProgressBinding::new(self.preloader.clone(), self.urls.clone());
            warm_up.update_posts(&feed.warm_up_ids, ImageSize::CARD);
            let progress = report_progress(&warm_up, out).await?;
            info!(
                loaded = progress.loaded,
                total = progress.total,
                "Startup warm-up finished"
            );
            writeln!(out)?;
        }

        let mut binding = self.binding();
        if self.preload_enabled {
            binding.update_posts(&feed.preload_ids, ImageSize::CARD);
        }
        views::render_home(out, &feed)?;

        self.finish(binding, out).await
    }

    async fn show_post(&self, id: PostId, out: &mut impl Write) -> Result<()> {
        let detail = self.post_detail.execute(id).await?;
        views::render_post(out, &detail)?;
        writeln!(out)?;

        let url = &detail.cover_url;
        if self.preload_enabled
            && let Err(failure) = self.preloader.preload(url).await
        {
            warn!(url = %failure.url, error = %failure.source, "Cover image unavailable");
        }
        views::render_image_status(
            out,
            "Cover",
            url,
            self.preloader.status(url),
            self.preloader.cached(url).as_ref(),
        )?;
        Ok(())
    }

    async fn show_authors(&self, out: &mut impl Write) -> Result<()> {
        let authors = self.author_directory.execute().await?;
        views::render_authors(out, &authors)?;
        Ok(())
    }

    async fn show_author(&self, id: UserId, tab: ProfileTab, out: &mut impl Write) -> Result<()> {
        let profile = self.author_profile.execute(id).await?;

        let mut binding = self.binding();
        if self.preload_enabled {
            binding.update_posts(&profile.post_ids(), ImageSize::CARD);
        }
        views::render_profile(out, &profile, tab)?;

        self.finish(binding, out).await
    }

    async fn warm(&self, ids: &[i64], size: ImageSize, out: &mut impl Write) -> Result<()> {
        let mut binding = ProgressBinding::new(self.preloader.clone(), self.urls.clone());
        binding.update(ids, size);
        report_progress(&binding, out).await?;

        let urls = self.urls.build_all(ids, size);
        let loaded = urls.iter().filter(|url| self.preloader.is_preloaded(url)).count();
        let summary = BatchSummary {
            loaded,
            failed: urls.len() - loaded,
        };
        info!(%summary, %size, "Preload finished");
        writeln!(out, "Done: {summary}")?;
        writeln!(out, "{}", self.preloader.stats())?;
        Ok(())
    }

    async fn finish(&self, mut binding: PreloadBinding, out: &mut impl Write) -> Result<()> {
        if let Some(summary) = binding.settle().await {
            info!(%summary, "Background preload finished");
            writeln!(out)?;
            writeln!(out, "Images: {summary}")?;
        }
        debug!(stats = %self.preloader.stats(), "Preload cache state");
        Ok(())
    }
}

/// Renders each progress change until `binding` completes.
async fn report_progress(
    binding: &ProgressBinding,
    out: &mut impl Write,
) -> Result<PreloadProgress> {
    let mut rx = binding.subscribe();
    loop {
        let progress = *rx.borrow_and_update();
        views::render_progress(out, progress)?;
        if progress.is_complete() || rx.changed().await.is_err() {
            return Ok(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Comment, Post, User};
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::{MockBlogDataPort, MockImageFetcher};

    fn data_port() -> MockBlogDataPort {
        let mut mock = MockBlogDataPort::new();
        mock.expect_fetch_posts().returning(|| {
            Ok(vec![
                Post::new(1, 1, "sunt aut facere", "quia et suscipit"),
                Post::new(2, 1, "qui est esse", "est rerum tempore"),
                Post::new(3, 2, "ea molestias", "et iusto sed"),
            ])
        });
        mock.expect_fetch_users().returning(|| {
            Ok(vec![
                User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz"),
                User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv"),
            ])
        });
        mock
    }

    fn app(mock: MockBlogDataPort, fetcher: &Arc<MockImageFetcher>, preload: bool) -> App {
        let mut config = AppConfig::default();
        config.images.preload = preload;
        app_with_config(mock, fetcher, &config)
    }

    fn app_with_config(
        mock: MockBlogDataPort,
        fetcher: &Arc<MockImageFetcher>,
        config: &AppConfig,
    ) -> App {
        let preloader = ImagePreloader::new(fetcher.clone());
        App::new(Arc::new(mock), preloader, config)
    }

    async fn run(app: &App, command: Command) -> Result<String> {
        let mut out = Vec::new();
        app.run(command, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn test_home_warms_visible_images() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(data_port(), &fetcher, true);

        let text = run(&app, Command::Home { page: 1 }).await.unwrap();

        assert!(text.contains("[1] sunt aut facere"));
        assert!(text.contains("avatar: https://i.pravatar.cc/300?img=1"));
        assert!(text.contains("Images: 3 of 3 images warmed (0 failed)"));
        assert_eq!(fetcher.total_calls(), 3);
    }

    #[tokio::test]
    async fn test_home_warms_leading_posts_before_feed() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(data_port(), &fetcher, true);

        let text = run(&app, Command::Home { page: 1 }).await.unwrap();

        assert!(text.starts_with("Loading images... 0 of 3 (0%)\n"));
        let done = text.find("Loading images... 3 of 3 (100%)").unwrap();
        let featured = text.find("sunt aut facere").unwrap();
        assert!(done < featured);
        let urls = ImageUrlBuilder::default();
        for id in 1..=3 {
            assert_eq!(fetcher.calls_for(&urls.build(id, ImageSize::CARD)), 1);
        }
    }

    #[tokio::test]
    async fn test_home_warm_up_caps_at_ten_posts() {
        let mut mock = MockBlogDataPort::new();
        mock.expect_fetch_posts().returning(|| {
            Ok((1..=12)
                .map(|i| Post::new(i, 1, format!("post {i}"), ""))
                .collect())
        });
        mock.expect_fetch_users()
            .returning(|| Ok(vec![User::new(1, "Leanne Graham", "Bret", "")]));
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(mock, &fetcher, true);

        let text = run(&app, Command::Home { page: 1 }).await.unwrap();

        assert!(text.starts_with("Loading images... 0 of 10 (0%)\n"));
        assert!(text.contains("Loading images... 10 of 10 (100%)\n"));
        assert!(!text.contains("of 12 ("));
    }

    #[tokio::test]
    async fn test_home_warm_up_can_be_disabled() {
        let mut config = AppConfig::default();
        config.images.warm_up = false;
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app_with_config(data_port(), &fetcher, &config);

        let text = run(&app, Command::Home { page: 1 }).await.unwrap();

        assert!(!text.contains("Loading images"));
        assert!(text.starts_with("Featured"));
        assert!(text.contains("Images: 3 of 3 images warmed (0 failed)"));
    }

    #[tokio::test]
    async fn test_home_without_preload() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(data_port(), &fetcher, false);

        let text = run(&app, Command::Home { page: 1 }).await.unwrap();

        assert!(!text.contains("Images:"));
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_post_reports_cover() {
        let mut mock = MockBlogDataPort::new();
        mock.expect_fetch_post()
            .returning(|id| Ok(Post::new(id.0, 1, "sunt aut facere", "quia")));
        mock.expect_fetch_post_comments()
            .returning(|id| Ok(vec![Comment::new(1, id.0, "id labore", "a@b.c", "great")]));
        mock.expect_fetch_user()
            .returning(|id| Ok(User::new(id.0, "Leanne Graham", "Bret", "")));
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(mock, &fetcher, true);

        let text = run(&app, Command::Post { id: 1 }).await.unwrap();

        assert!(text.contains("Comments (1)"));
        assert!(text.contains("avatar: https://i.pravatar.cc/300?img=1"));
        assert!(text.ends_with(
            "Cover: loaded 4x2 (https://picsum.photos/seed/post-1/1200/600)\n"
        ));
    }

    #[tokio::test]
    async fn test_missing_post_is_an_error() {
        let mut mock = MockBlogDataPort::new();
        mock.expect_fetch_post().returning(|_| Err(ApiError::NotFound));
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(mock, &fetcher, true);

        assert!(run(&app, Command::Post { id: 999 }).await.is_err());
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_preload_reports_progress_and_failures() {
        let urls = ImageUrlBuilder::default();
        let fetcher = Arc::new(
            MockImageFetcher::new().failing_on(urls.build(2, ImageSize::CARD)),
        );
        let app = app(MockBlogDataPort::new(), &fetcher, true);

        let command = Command::Preload {
            ids: vec![1, 2],
            width: 400,
            height: 200,
        };
        let text = run(&app, command).await.unwrap();

        assert!(text.starts_with("Loading images... 0 of 2 (0%)\n"));
        assert!(text.contains("Loading images... 2 of 2 (100%)\n"));
        assert!(text.contains("Done: 1 of 2 images warmed (1 failed)\n"));
        assert!(text.contains("Preload cache: 1 loaded, 0 loading, 1 failed (2 fetches)"));
    }

    #[tokio::test]
    async fn test_authors_list_shows_avatars() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(data_port(), &fetcher, true);

        let text = run(&app, Command::Users).await.unwrap();

        assert!(text.contains("https://i.pravatar.cc/300?img=1"));
        assert!(text.contains("https://i.pravatar.cc/300?img=2"));
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_user_posts_tab() {
        let mut mock = data_port();
        mock.expect_fetch_user()
            .returning(|id| Ok(User::new(id.0, "Ervin Howell", "Antonette", "")));
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app(mock, &fetcher, true);

        let command = Command::User {
            id: 2,
            tab: ProfileTab::Posts,
        };
        let text = run(&app, command).await.unwrap();

        assert!(text.contains("[3] ea molestias"));
        assert!(text.contains("pravatar"));
        assert!(text.contains("Images: 1 of 1 images warmed (0 failed)"));
    }
}
