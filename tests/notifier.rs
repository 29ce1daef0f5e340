//! Change notification tests for the docking engine

mod common;

use std::thread;
use std::time::Duration;

use common::{add, test_engine, three_pane_engine};
use workbench::layout::SplitDirection;
use workbench::notify::{ChangeNotifier, Versioned};

#[derive(Debug, Clone, PartialEq)]
struct Bump(u64);

impl Versioned for Bump {
    fn version(&self) -> u64 {
        self.0
    }
}

#[test]
fn test_snapshots_arrive_in_version_order() {
    let mut engine = test_engine();
    let sub = engine.subscribe();

    let a = add(&mut engine, None, "explorer", SplitDirection::Horizontal);
    let b = add(&mut engine, Some(&a), "console", SplitDirection::Vertical);
    engine.resize(&b, 0.5).unwrap();
    engine.close_window(&a).unwrap();

    let versions: Vec<u64> = sub.drain().iter().map(|s| s.version).collect();
    assert_eq!(versions, vec![1, 2, 3, 4]);
}

#[test]
fn test_late_subscriber_sees_only_new_changes() {
    let (mut engine, a, _, _) = three_pane_engine();
    let sub = engine.subscribe();
    assert!(sub.try_recv().is_none());

    engine.close_window(&a).unwrap();
    let snapshot = sub.try_recv().unwrap();
    assert_eq!(snapshot.version, engine.version());
    assert_eq!(snapshot.rects.len(), 2);
}

#[test]
fn test_latest_skips_intermediate_snapshots() {
    let (mut engine, _, b, c) = three_pane_engine();
    let sub = engine.subscribe();
    engine.resize(&b, 0.5).unwrap();
    engine.resize(&c, 0.5).unwrap();

    let latest = sub.latest().unwrap();
    assert_eq!(latest.version, engine.version());
    assert!(sub.try_recv().is_none());
}

#[test]
fn test_shutdown_and_restart_keep_version_floor() {
    let (mut engine, a, b, _) = three_pane_engine();
    let before = engine.subscribe();

    engine.notifier_mut().shutdown();
    assert!(!engine.notifier_mut().is_running());
    engine.resize(&a, 0.5).unwrap();
    assert!(before.is_disconnected());

    engine.notifier_mut().restart();
    assert!(engine.notifier_mut().is_running());
    let after = engine.subscribe();
    engine.resize(&b, 0.5).unwrap();

    let snapshot = after.try_recv().unwrap();
    assert_eq!(snapshot.version, engine.version());
    assert!(snapshot.version > 3);
}

#[test]
fn test_restart_drops_replayed_versions() {
    let mut notifier = ChangeNotifier::new();
    notifier.emit(Bump(4));
    notifier.shutdown();
    notifier.restart();

    let sub = notifier.subscribe();
    assert_eq!(notifier.emit(Bump(4)), 0);
    assert_eq!(notifier.emit(Bump(5)), 1);
    assert_eq!(sub.drain(), vec![Bump(5)]);
    assert_eq!(notifier.last_version(), Some(5));
}

#[test]
fn test_subscriber_on_another_thread() {
    let mut engine = test_engine();
    let sub = engine.subscribe();

    let reader = thread::spawn(move || {
        let mut versions = Vec::new();
        while versions.len() < 3 {
            match sub.recv_timeout(Duration::from_secs(5)) {
                Some(snapshot) => versions.push(snapshot.version),
                None => break,
            }
        }
        versions
    });

    let a = add(&mut engine, None, "explorer", SplitDirection::Horizontal);
    let b = add(&mut engine, Some(&a), "console", SplitDirection::Horizontal);
    engine.close_window(&b).unwrap();

    assert_eq!(reader.join().unwrap(), vec![1, 2, 3]);
}
