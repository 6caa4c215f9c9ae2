//! Shared test doubles.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use keymeter_core::{
    ApiKey, EndpointSchema, NoticeLevel, Notifier, Presentation, StatusIndicator, UsageSnapshot,
};
use keymeter_fetch::{FetchError, UsageSource};
use keymeter_monitor::UsageMonitor;
use keymeter_store::{ConfigResolver, Settings, SettingsStore};

type Responder = Box<dyn Fn(usize) -> Result<UsageSnapshot, FetchError> + Send + Sync>;

/// A source that answers from a closure and counts calls.
pub struct MockSource {
    calls: AtomicUsize,
    delay: Option<Duration>,
    respond: Responder,
}

impl MockSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(usize) -> Result<UsageSnapshot, FetchError> + Send + Sync + 'static,
    {
        Self {
            calls: AtomicUsize::new(0),
            delay: None,
            respond: Box::new(respond),
        }
    }

    pub fn ok() -> Self {
        Self::new(|_| Ok(snapshot(200.0, 4.9884)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsageSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    async fn fetch(
        &self,
        _key: &ApiKey,
        _schema: EndpointSchema,
    ) -> Result<UsageSnapshot, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(call)
    }
}

/// Records every indicator update.
#[derive(Default)]
pub struct RecordingIndicator {
    updates: Mutex<Vec<Presentation>>,
}

impl RecordingIndicator {
    pub fn last(&self) -> Option<Presentation> {
        self.updates.lock().unwrap().last().cloned()
    }

    pub fn texts(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.short_text.clone())
            .collect()
    }
}

impl StatusIndicator for RecordingIndicator {
    fn update(&self, presentation: &Presentation) {
        self.updates.lock().unwrap().push(presentation.clone());
    }
}

/// Records every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn snapshot(limit: f64, used: f64) -> UsageSnapshot {
    UsageSnapshot::new(EndpointSchema::KeyInfo, Some(limit), used, None).unwrap()
}

pub fn settings_with_key(interval: Option<i64>) -> Settings {
    Settings {
        api_key: Some("sk-or-v1-test".to_string()),
        refresh_interval_minutes: interval,
        ..Settings::default()
    }
}

/// A monitor wired to test doubles. The environment is always empty.
pub struct Harness {
    pub monitor: UsageMonitor,
    pub settings: Arc<SettingsStore>,
    pub source: Arc<MockSource>,
    pub indicator: Arc<RecordingIndicator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub async fn new(settings: Settings, source: MockSource) -> Self {
        let store = SettingsStore::new(PathBuf::from("/nonexistent/keymeter/settings.json"));
        store.update(|s| *s = settings).await;
        let store = Arc::new(store);

        let source = Arc::new(source);
        let indicator = Arc::new(RecordingIndicator::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let monitor = UsageMonitor::new(
            ConfigResolver::with_env(Arc::clone(&store), |_| None),
            Arc::clone(&source) as Arc<dyn UsageSource>,
            Arc::clone(&indicator) as Arc<dyn StatusIndicator>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );

        Self {
            monitor,
            settings: store,
            source,
            indicator,
            notifier,
        }
    }
}
