use crate::prelude::*;

#[tokio::test]
async fn same_notification_on_both_channels_appears_once() {
    let dir = tempfile::tempdir().unwrap();
    let device = Device::boot(dir.path());
    assert!(device.sign_in(7).await);

    assert!(device.realtime.emit_notification(realtime_payload(1, 7)));
    assert!(device.push.deliver(push_payload(1, 7)));
    assert!(device.push.deliver(push_payload(2, 7)));
    assert!(wait_for(|| device.manager.len() == 2).await);

    similar_asserts::assert_eq!(
        device.events(),
        vec!["new:1", "count:1", "new:2", "count:2"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    let record = device.manager.get(id(1)).unwrap();
    assert_eq!(record.kind, "order");
    assert_eq!(record.priority.as_str(), "high");
}

#[tokio::test]
async fn reads_converge_across_channels() {
    let dir = tempfile::tempdir().unwrap();
    let device = Device::boot(dir.path());
    assert!(device.sign_in(7).await);
    for id in 1..=3 {
        assert!(device.push.deliver(push_payload(id, 7)));
    }
    assert!(wait_for(|| device.manager.unread_count() == 3).await);
    device.clear_events();

    // Local optimistic read, then the server confirms it and reads another
    assert!(device.manager.mark_as_read(id(1)));
    assert!(device.realtime.emit(inbox_core::ChannelEvent::NotificationRead {
        id: id(1),
        read_at: None,
    }));
    assert!(device.realtime.emit(inbox_core::ChannelEvent::NotificationRead {
        id: id(2),
        read_at: None,
    }));
    assert!(wait_for(|| device.manager.unread_count() == 1).await);

    similar_asserts::assert_eq!(
        device.events(),
        vec!["read:1", "count:2", "read:2", "count:1"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );

    assert!(device.manager.mark_all_as_read());
    assert_eq!(device.manager.unread_count(), 0);
    assert_eq!(device.events().last().map(String::as_str), Some("count:0"));
}
