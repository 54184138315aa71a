use crate::prelude::*;
use inbox_engine::Lifecycle;

#[tokio::test]
async fn sign_in_then_out() {
    let dir = tempfile::tempdir().unwrap();
    let device = Device::boot(dir.path());

    assert!(device.sign_in(7).await);
    assert_eq!(device.manager.lifecycle(), Lifecycle::Ready);
    assert!(device.push.deliver(push_payload(1, 7)));
    assert!(wait_for(|| device.manager.len() == 1).await);

    device.manager.disconnect().await;

    assert_eq!(device.manager.lifecycle(), Lifecycle::Disconnected);
    assert!(device.manager.list().is_empty());
    assert!(!device.manager.mark_as_read(id(1)));
}

#[tokio::test]
async fn switching_accounts_never_mixes_inboxes() {
    let dir = tempfile::tempdir().unwrap();
    let device = Device::boot(dir.path());

    assert!(device.sign_in(7).await);
    assert!(device.push.deliver(push_payload(1, 7)));
    assert!(wait_for(|| device.manager.len() == 1).await);

    assert!(device.sign_in(8).await);
    // Addressed to the previous account
    assert!(device.realtime.emit_notification(realtime_payload(2, 7)));
    assert!(device.realtime.emit_notification(realtime_payload(3, 8)));
    assert!(wait_for(|| device.manager.len() == 1).await);

    similar_asserts::assert_eq!(device.ids(), vec![3]);
}
