//! Refresh pipeline and host callback tests.

mod common;

use std::sync::Arc;

use common::{Harness, MockSource, settings_with_key, snapshot};
use keymeter_core::{DisplayState, NoticeLevel, Notifier, StatusIndicator};
use keymeter_fetch::{FetchError, UsageSource};
use keymeter_monitor::{SchedulerState, UsageMonitor};
use keymeter_providers::KeyInfoClient;
use keymeter_store::{ConfigResolver, Settings, SettingsStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_no_key_skips_network() {
    let h = Harness::new(Settings::default(), MockSource::ok()).await;

    let state = h.monitor.trigger_now(false).await;

    assert_eq!(state, DisplayState::NoKey);
    assert_eq!(h.source.calls(), 0);
    assert_eq!(h.indicator.last().unwrap().short_text, "💵 no key");
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_manual_no_key_warns() {
    let h = Harness::new(Settings::default(), MockSource::ok()).await;

    h.monitor.trigger_now(true).await;

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, NoticeLevel::Warning);
}

#[tokio::test]
async fn test_ready_renders_key_schema_example() {
    let h = Harness::new(settings_with_key(None), MockSource::ok()).await;

    let state = h.monitor.trigger_now(false).await;

    assert!(state.is_ready());
    assert_eq!(h.source.calls(), 1);
    assert_eq!(
        h.indicator.texts(),
        vec!["💵 ...".to_string(), "💵 195.0/200$".to_string()]
    );
    assert_eq!(h.monitor.display().current(), state);
}

#[tokio::test]
async fn test_repeat_refresh_shows_fetching_text() {
    let h = Harness::new(settings_with_key(Some(0)), MockSource::ok()).await;

    h.monitor.activate().await;
    h.monitor.trigger_now(false).await;

    let texts = h.indicator.texts();
    assert_eq!(texts.iter().filter(|t| *t == "💵 loading...").count(), 1);
    assert_eq!(texts.iter().filter(|t| *t == "💵 ...").count(), 2);
    assert_eq!(texts.last().unwrap(), "💵 195.0/200$");
}

#[tokio::test]
async fn test_silent_refresh_never_notifies() {
    let h = Harness::new(
        settings_with_key(None),
        MockSource::new(|_| Err(FetchError::Network("connection reset".to_string()))),
    )
    .await;

    h.monitor.trigger_now(false).await;

    assert!(h.notifier.notices().is_empty());
    assert_eq!(h.indicator.last().unwrap().short_text, "🚨 error");
}

#[tokio::test]
async fn test_manual_success_notifies_info() {
    let h = Harness::new(settings_with_key(None), MockSource::ok()).await;

    h.monitor.trigger_now(true).await;

    assert_eq!(
        h.notifier.notices(),
        vec![(
            NoticeLevel::Info,
            "OpenRouter remaining: 195.0 / 200 (used 5.0)".to_string()
        )]
    );
}

#[tokio::test]
async fn test_protocol_error_replaces_ready() {
    let source = MockSource::new(|call| {
        if call == 0 {
            Ok(snapshot(50.0, 10.0))
        } else {
            Err(FetchError::Protocol("'data' field missing".to_string()))
        }
    });
    let h = Harness::new(settings_with_key(None), source).await;

    assert!(h.monitor.trigger_now(false).await.is_ready());
    let state = h.monitor.trigger_now(true).await;

    let message = state.error_message().unwrap();
    assert!(message.contains("'data' field missing"));
    assert_eq!(h.monitor.display().current(), state);

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, NoticeLevel::Error);
    assert!(notices[0].1.starts_with("OpenRouter Usage error: "));
}

#[tokio::test]
async fn test_low_credit_threshold_from_settings() {
    let settings = Settings {
        low_credit_threshold: Some(195.0),
        ..settings_with_key(None)
    };
    let h = Harness::new(settings, MockSource::new(|_| Ok(snapshot(200.0, 5.0)))).await;

    h.monitor.trigger_now(false).await;

    let presentation = h.indicator.last().unwrap();
    assert!(presentation.alert);
    assert_eq!(presentation.short_text, "🚨 195.0/200$");
}

#[tokio::test]
async fn test_activate_renders_loading_then_refreshes() {
    let h = Harness::new(settings_with_key(Some(0)), MockSource::ok()).await;

    let state = h.monitor.activate().await;

    assert!(state.is_ready());
    assert_eq!(
        h.indicator.texts(),
        vec![
            "💵 loading...".to_string(),
            "💵 ...".to_string(),
            "💵 195.0/200$".to_string()
        ]
    );
    assert_eq!(h.monitor.scheduler_state(), SchedulerState::Idle);
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_config_change_picks_up_new_key() {
    let h = Harness::new(Settings::default(), MockSource::ok()).await;
    assert_eq!(h.monitor.activate().await, DisplayState::NoKey);

    h.settings.set_api_key(Some("sk-or-v1-new".to_string())).await;
    let state = h.monitor.on_config_changed().await;

    assert!(state.is_ready());
    assert_eq!(h.source.calls(), 1);
    h.monitor.shutdown();
}

#[tokio::test]
async fn test_config_change_disables_timer() {
    let h = Harness::new(settings_with_key(Some(5)), MockSource::ok()).await;
    h.monitor.activate().await;
    assert!(matches!(
        h.monitor.scheduler_state(),
        SchedulerState::Scheduled { .. }
    ));

    h.settings.set_refresh_interval(Some(0)).await;
    h.monitor.on_config_changed().await;

    assert_eq!(h.monitor.scheduler_state(), SchedulerState::Idle);
}

// ============================================================================
// Against a real HTTP client
// ============================================================================

async fn http_monitor(server: &MockServer) -> (UsageMonitor, Arc<common::RecordingIndicator>) {
    let store = SettingsStore::new("/nonexistent/keymeter/settings.json".into());
    store.update(|s| *s = settings_with_key(Some(0))).await;
    let indicator = Arc::new(common::RecordingIndicator::default());
    let client = KeyInfoClient::with_base_url(server.uri()).unwrap();

    let monitor = UsageMonitor::new(
        ConfigResolver::with_env(Arc::new(store), |_| None),
        Arc::new(client) as Arc<dyn UsageSource>,
        Arc::clone(&indicator) as Arc<dyn StatusIndicator>,
        Arc::new(common::RecordingNotifier::default()) as Arc<dyn Notifier>,
    );
    (monitor, indicator)
}

#[tokio::test]
async fn test_http_401_becomes_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/credits"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":{"message":"User not found.","code":401}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (monitor, indicator) = http_monitor(&server).await;
    let state = monitor.trigger_now(false).await;

    assert!(state.error_message().unwrap().contains("401"));
    let presentation = indicator.last().unwrap();
    assert_eq!(presentation.short_text, "🚨 error");
    assert!(presentation.tooltip.contains("401"));
}

#[tokio::test]
async fn test_http_missing_data_becomes_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok": true}"#))
        .mount(&server)
        .await;

    let (monitor, _) = http_monitor(&server).await;
    let state = monitor.trigger_now(false).await;

    assert!(matches!(state, DisplayState::Error(_)));
}

#[tokio::test]
async fn test_http_credits_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data": {"total_credits": 20, "total_usage": 0.04}}"#,
        ))
        .mount(&server)
        .await;

    let (monitor, indicator) = http_monitor(&server).await;
    monitor.trigger_now(false).await;

    assert_eq!(indicator.last().unwrap().short_text, "💵 19.9/20$");
}
