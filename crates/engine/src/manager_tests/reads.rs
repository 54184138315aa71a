// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn mark_as_read_is_idempotent() {
    let ctx = ready().await;
    ctx.manager.handle_event(push_event(1)).await;
    ctx.observer.clear();

    assert!(ctx.manager.mark_as_read(id(1)));
    let first = ctx.manager.get(id(1)).unwrap().read_at;
    ctx.clock.advance(Duration::from_secs(60));
    assert!(ctx.manager.mark_as_read(id(1)));

    assert_eq!(ctx.manager.get(id(1)).unwrap().read_at, first);
    assert_eq!(
        ctx.observer.notifications(),
        vec![Observed::Read(id(1)), Observed::Count(0)]
    );
}

#[tokio::test]
async fn mark_as_read_unknown_id_returns_false() {
    let ctx = ready().await;
    ctx.observer.clear();

    assert!(!ctx.manager.mark_as_read(id(404)));
    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn mark_all_fires_single_count() {
    let ctx = ready().await;
    for n in 1..=3 {
        ctx.manager.handle_event(push_event(n)).await;
    }
    ctx.observer.clear();

    assert!(ctx.manager.mark_all_as_read());

    assert_eq!(ctx.observer.notifications(), vec![Observed::Count(0)]);
    assert!(ctx.manager.list().iter().all(|r| r.is_read));
}

#[tokio::test]
async fn mark_all_with_nothing_unread_is_quiet() {
    let ctx = ready().await;
    ctx.observer.clear();

    assert!(ctx.manager.mark_all_as_read());
    assert!(ctx.observer.all().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let ctx = ready().await;
    for n in [2, 3, 1] {
        ctx.manager.handle_event(push_event(n)).await;
    }
    ctx.manager.mark_as_read(id(3));

    assert_eq!(ids(&ctx.manager.list()), vec![3, 2, 1]);
    assert_eq!(ids(&ctx.manager.list_unread()), vec![2, 1]);
}

#[tokio::test]
async fn reentrant_subscriber_sees_ordered_events() {
    let ctx = ready().await;
    let manager = ctx.manager.clone();
    ctx.manager.set_callbacks(Callbacks::new().on_new_notification(move |record| {
        manager.mark_as_read(record.id);
    }));
    ctx.observer.clear();

    ctx.manager.handle_event(push_event(1)).await;

    assert_eq!(
        ctx.observer.notifications(),
        vec![
            Observed::Count(1),
            Observed::Read(id(1)),
            Observed::Count(0),
        ]
    );
    assert_eq!(ctx.manager.unread_count(), 0);
}

#[tokio::test]
async fn panicking_subscriber_is_isolated() {
    let ctx = ready().await;
    let calls = Arc::new(AtomicUsize::new(0));
    ctx.manager.set_callbacks(Callbacks::new().on_new_notification({
        let calls = calls.clone();
        move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            panic!("subscriber bug");
        }
    }));
    ctx.observer.clear();

    ctx.manager.handle_event(push_event(1)).await;
    ctx.manager.handle_event(push_event(2)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(ctx.manager.unread_count(), 2);
    assert_eq!(
        ctx.observer.notifications(),
        vec![Observed::Count(1), Observed::Count(2)]
    );
}
