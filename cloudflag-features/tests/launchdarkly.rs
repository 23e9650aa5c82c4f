//! LaunchDarkly SDK integration (requires the `launchdarkly` feature)

#![cfg(feature = "launchdarkly")]

use cloudflag_features::*;
use cloudflag_testing::RecordingLogger;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_offline_client_returns_default() {
    let service = FlagService::new("sdk-00000000-0000-0000-0000-000000000000", None)
        .unwrap()
        .with_factory(Arc::new(LaunchDarklyFactory::new().offline(true)));

    let client = service.client().expect("offline client builds inside a runtime");
    for _ in 0..50 {
        if client.initialized() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(service.get_feature_flag("Test", false), Ok(false));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_online_create_waits_at_most_start_wait() {
    let factory = LaunchDarklyFactory::new().start_wait(Duration::from_millis(300));

    let started = Instant::now();
    let client = factory.create("sdk-00000000-0000-0000-0000-000000000000");

    assert!(client.is_ok());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_current_thread_runtime_skips_start_wait() {
    let factory = LaunchDarklyFactory::new().start_wait(Duration::from_secs(30));

    let started = Instant::now();
    let client = factory.create("sdk-00000000-0000-0000-0000-000000000000");

    assert!(client.is_ok());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_outside_runtime_logs_and_reports_uninitialized() {
    let logger = RecordingLogger::new();
    let service = FlagService::new("sdk-0000", Some(Arc::new(logger.clone())))
        .unwrap()
        .with_factory(Arc::new(LaunchDarklyFactory::new().offline(true)));

    assert!(matches!(
        service.get_feature_flag("Test", false),
        Err(FeatureFlagError::InvalidOperation(_))
    ));
    assert_eq!(logger.count(), 1);
}
