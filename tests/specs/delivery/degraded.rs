use crate::prelude::*;
use inbox_core::AppState;
use inbox_engine::DeliveryMode;

#[tokio::test]
async fn push_keeps_working_without_realtime() {
    let dir = tempfile::tempdir().unwrap();
    let device = Device::boot(dir.path());
    device.realtime.fail_connect("gateway timeout");

    assert!(device.sign_in(7).await);
    assert_eq!(device.manager.delivery_mode(), DeliveryMode::PushOnly);
    assert!(device.push.deliver(push_payload(1, 7)));

    assert!(wait_for(|| device.manager.len() == 1).await);
    assert!(!device.events().contains(&"error".to_string()));
}

#[tokio::test]
async fn offline_start_recovers_on_foreground() {
    let dir = tempfile::tempdir().unwrap();
    let device = Device::boot(dir.path());
    device.push.fail_initialize("no play services");
    device.realtime.fail_connect("offline");

    assert!(!device.sign_in(7).await);
    assert_eq!(device.manager.delivery_mode(), DeliveryMode::CacheOnly);
    assert_eq!(device.events(), vec!["error".to_string()]);

    device.realtime.allow_connect();
    device.app.transition(AppState::Background);
    device.app.transition(AppState::Active);

    assert!(wait_for(|| device.manager.delivery_mode() == DeliveryMode::RealtimeOnly).await);
    assert!(device.realtime.emit_notification(realtime_payload(1, 7)));
    assert!(wait_for(|| device.manager.len() == 1).await);
}
