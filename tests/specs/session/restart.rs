use crate::prelude::*;

#[tokio::test]
async fn inbox_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let device = Device::boot(dir.path());
        assert!(device.sign_in(7).await);
        for id in 1..=3 {
            assert!(device.push.deliver(push_payload(id, 7)));
        }
        assert!(wait_for(|| device.manager.len() == 3).await);
        assert!(device.manager.mark_as_read(id(2)));
        assert!(device.manager.flush_cache().await);
    }

    let device = Device::boot(dir.path());
    assert!(device.sign_in(7).await);

    similar_asserts::assert_eq!(device.ids(), vec![3, 2, 1]);
    assert_eq!(device.manager.unread_count(), 2);
    assert!(device.manager.get(id(2)).unwrap().is_read);
    assert_eq!(device.events(), vec!["count:2".to_string()]);
}

#[tokio::test]
async fn another_account_does_not_inherit_cache() {
    let dir = tempfile::tempdir().unwrap();
    {
        let device = Device::boot(dir.path());
        assert!(device.sign_in(7).await);
        assert!(device.push.deliver(push_payload(1, 7)));
        assert!(wait_for(|| device.manager.len() == 1).await);
        assert!(device.manager.flush_cache().await);
    }

    let device = Device::boot(dir.path());
    assert!(device.sign_in(8).await);

    assert!(device.manager.list().is_empty());
}

#[tokio::test]
async fn damaged_cache_file_is_set_aside() {
    let dir = tempfile::tempdir().unwrap();
    let cache_file = dir.path().join("notifications_cache_7.json");
    std::fs::write(&cache_file, "{\"v\":1,").unwrap();

    let device = Device::boot(dir.path());
    assert!(device.sign_in(7).await);

    assert!(device.manager.list().is_empty());
    assert!(!cache_file.exists());
    assert!(dir.path().join("notifications_cache_7.bak").exists());
}
