//! Executes the effects returned by dashboard operations.
//!
//! Each effect runs on its own tokio task and reports back with at most one
//! `AppEvent`. A send failure means the event loop is gone, which is only
//! the case during shutdown.
//!
//! Theme writes are the exception: they go through a single writer task so
//! the file always ends on the last toggle.

use std::sync::Arc;
use std::time::Duration;

use talentforge_core::news::NewsClient;
use talentforge_core::{
    Clipboard, Effect, Geolocator, LocationError, PositionOptions, PreferenceStore, ThemeMode,
    Timer,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use crate::tui::AppEvent;

pub struct Runtime {
    tx: UnboundedSender<AppEvent>,
    news: NewsClient,
    clipboard: Arc<dyn Clipboard>,
    geolocator: Arc<dyn Geolocator>,
    theme_writer: Option<ThemeWriter>,
}

struct ThemeWriter {
    tx: UnboundedSender<ThemeMode>,
    task: JoinHandle<()>,
}

impl ThemeWriter {
    fn spawn(store: PreferenceStore) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<ThemeMode>();
        let task = tokio::spawn(async move {
            while let Some(mut mode) = rx.recv().await {
                // Only the newest queued toggle needs to reach the disk
                while let Ok(next) = rx.try_recv() {
                    mode = next;
                }
                let store = store.clone();
                match tokio::task::spawn_blocking(move || store.write(mode)).await {
                    Ok(Ok(())) => tracing::debug!(theme = mode.as_str(), "theme saved"),
                    Ok(Err(err)) => tracing::warn!("failed to save theme preference: {err:#}"),
                    Err(err) => tracing::warn!("theme writer task failed: {err}"),
                }
            }
        });
        Self { tx, task }
    }
}

impl Runtime {
    pub fn new(
        tx: UnboundedSender<AppEvent>,
        news: NewsClient,
        clipboard: Arc<dyn Clipboard>,
        geolocator: Arc<dyn Geolocator>,
        preferences: Option<PreferenceStore>,
    ) -> Self {
        Self {
            tx,
            news,
            clipboard,
            geolocator,
            theme_writer: preferences.map(ThemeWriter::spawn),
        }
    }

    /// Wait for queued theme writes to land.
    pub async fn shutdown(self) {
        let Some(ThemeWriter { tx, task }) = self.theme_writer else {
            return;
        };
        drop(tx);
        if let Err(err) = task.await {
            tracing::warn!("theme writer did not finish: {err}");
        }
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            tracing::debug!(?effect, "executing effect");
            match effect {
                Effect::Schedule { after, timer } => self.schedule(after, timer),
                Effect::FetchNews => self.fetch_news(),
                Effect::CopyToClipboard { text } => self.copy(text),
                Effect::Locate(options) => self.locate(options),
                Effect::PersistTheme(mode) => self.persist_theme(mode),
            }
        }
    }

    fn schedule(&self, after: Duration, timer: Timer) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(AppEvent::Timer(timer));
        });
    }

    fn fetch_news(&self) {
        let tx = self.tx.clone();
        let news = self.news.clone();
        tokio::spawn(async move {
            let result = news.fetch_latest().await;
            let _ = tx.send(AppEvent::News(result));
        });
    }

    fn copy(&self, text: String) {
        let tx = self.tx.clone();
        let clipboard = Arc::clone(&self.clipboard);
        tokio::spawn(async move {
            let result = clipboard.write_text(&text).await;
            let _ = tx.send(AppEvent::Copied(result));
        });
    }

    fn locate(&self, options: PositionOptions) {
        let tx = self.tx.clone();
        let geolocator = Arc::clone(&self.geolocator);
        tokio::spawn(async move {
            let result =
                match tokio::time::timeout(options.timeout, geolocator.current_position(options))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(LocationError::Timeout),
                };
            let _ = tx.send(AppEvent::Position(result));
        });
    }

    fn persist_theme(&self, mode: ThemeMode) {
        let Some(writer) = &self.theme_writer else {
            tracing::warn!("no preference store, theme not saved");
            return;
        };
        if writer.tx.send(mode).is_err() {
            tracing::warn!("theme writer stopped, theme not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use talentforge_core::{ClipboardError, Position};
    use tokio::sync::mpsc;

    use super::*;

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Never answers, like an ignored permission prompt.
    struct SilentGeolocator;

    #[async_trait]
    impl Geolocator for SilentGeolocator {
        fn is_supported(&self) -> bool {
            true
        }

        async fn current_position(&self, _: PositionOptions) -> Result<Position, LocationError> {
            std::future::pending().await
        }
    }

    fn runtime(
        clipboard: Arc<dyn Clipboard>,
        preferences: Option<PreferenceStore>,
    ) -> (Runtime, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runtime = Runtime::new(
            tx,
            NewsClient::new("http://127.0.0.1:9/news", "test"),
            clipboard,
            Arc::new(SilentGeolocator),
            preferences,
        );
        (runtime, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (runtime, mut rx) = runtime(Arc::new(RecordingClipboard::default()), None);
        let start = tokio::time::Instant::now();
        runtime.execute(vec![Effect::schedule(
            Duration::from_millis(1000),
            Timer::VerifyScroll,
        )]);

        match rx.recv().await {
            Some(AppEvent::Timer(Timer::VerifyScroll)) => {}
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_arrive_in_deadline_order() {
        let (runtime, mut rx) = runtime(Arc::new(RecordingClipboard::default()), None);
        runtime.execute(vec![
            Effect::schedule(Duration::from_millis(800), Timer::ShowDemoWeather { located: false }),
            Effect::schedule(Duration::from_millis(100), Timer::VerifyScroll),
        ]);

        assert!(matches!(rx.recv().await, Some(AppEvent::Timer(Timer::VerifyScroll))));
        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::Timer(Timer::ShowDemoWeather { located: false }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_locate_times_out() {
        let (runtime, mut rx) = runtime(Arc::new(RecordingClipboard::default()), None);
        runtime.execute(vec![Effect::Locate(PositionOptions::default())]);

        match rx.recv().await {
            Some(AppEvent::Position(Err(LocationError::Timeout))) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_copy_reports_result() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let (runtime, mut rx) = runtime(clipboard.clone(), None);
        runtime.execute(vec![Effect::CopyToClipboard {
            text: "reply".to_string(),
        }]);

        assert!(matches!(rx.recv().await, Some(AppEvent::Copied(Ok(())))));
        assert_eq!(*clipboard.copied.lock().unwrap(), vec!["reply".to_string()]);
    }

    #[tokio::test]
    async fn test_unreachable_news_reports_error() {
        let (runtime, mut rx) = runtime(Arc::new(RecordingClipboard::default()), None);
        runtime.execute(vec![Effect::FetchNews]);

        assert!(matches!(rx.recv().await, Some(AppEvent::News(Err(_)))));
    }

    #[tokio::test]
    async fn test_persist_theme_writes_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        let (runtime, _rx) = runtime(Arc::new(RecordingClipboard::default()), Some(store.clone()));

        runtime.execute(vec![Effect::PersistTheme(ThemeMode::Light)]);

        // The write runs on the blocking pool.
        for _ in 0..50 {
            if store.read() == ThemeMode::Light {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("theme was not persisted");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rapid_theme_toggles_keep_the_last_one() {
        let toggles = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Light, ThemeMode::Dark];

        for round in 0..25 {
            let dir = tempfile::tempdir().unwrap();
            let store = PreferenceStore::new(dir.path().join("preferences.json"));
            let (runtime, _rx) =
                runtime(Arc::new(RecordingClipboard::default()), Some(store.clone()));

            // Odd rounds end on light
            let count = if round % 2 == 0 { 4 } else { 3 };
            let effects = toggles[..count].iter().map(|m| Effect::PersistTheme(*m)).collect();
            runtime.execute(effects);
            runtime.shutdown().await;

            assert_eq!(store.read(), toggles[count - 1], "round {round}");
        }
    }
}
