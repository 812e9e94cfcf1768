//! The manager under concurrent writers, readers and feed consumers.

mod common;

use acl_core::actions::for_pages;
use acl_core::{AclValue, Verdict};
use acl_store::{AclManager, Change, FeedError};
use common::{init_tracing, Recorder};
use std::sync::Arc;
use std::thread;

const WRITERS: usize = 8;
const PER_WRITER: usize = 50;

#[test]
fn test_concurrent_writers_linearized() {
    init_tracing();
    let manager = Arc::new(AclManager::new());
    let (recorder, _) = Recorder::attach(&manager);

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let manager = manager.clone();
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    manager
                        .store_entry(
                            &format!("P.Page{i}"),
                            for_pages::READ_PAGE,
                            &format!("U.writer{w}"),
                            AclValue::Grant,
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.total_entries(), WRITERS * PER_WRITER);

    let events = recorder.events();
    assert_eq!(events.len(), WRITERS * PER_WRITER);
    assert!(events.iter().all(|e| e.change == Change::EntryStored));
    let sequences: Vec<u64> = events.iter().map(|e| e.sequence).collect();
    let expected: Vec<u64> = (1..=(WRITERS * PER_WRITER) as u64).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn test_same_key_contention_leaves_one_entry() {
    init_tracing();
    let manager = Arc::new(AclManager::new());

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let manager = manager.clone();
            thread::spawn(move || {
                let value = if w % 2 == 0 {
                    AclValue::Grant
                } else {
                    AclValue::Deny
                };
                for _ in 0..PER_WRITER {
                    manager
                        .store_entry("P.Main", for_pages::READ_PAGE, "U.alice", value)
                        .unwrap();
                    manager
                        .authorize("P.Main", for_pages::READ_PAGE, "U.alice", &["G.Users"])
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.total_entries(), 1);
    let verdict = manager
        .authorize("P.Main", for_pages::READ_PAGE, "U.alice", &["G.Users"])
        .unwrap();
    assert_ne!(verdict, Verdict::Unknown);
}

#[tokio::test]
async fn test_feed_sees_events_from_writer_threads() {
    init_tracing();
    let manager = Arc::new(AclManager::new());
    let mut feed = manager.watch();

    let writer = {
        let manager = manager.clone();
        thread::spawn(move || {
            for i in 0..PER_WRITER {
                manager
                    .store_entry(
                        &format!("P.Page{i}"),
                        for_pages::READ_PAGE,
                        "U.alice",
                        AclValue::Grant,
                    )
                    .unwrap();
            }
            manager.delete_entries_for_subject("U.alice").unwrap();
        })
    };

    let mut last = 0;
    loop {
        let event = feed.recv().await.unwrap();
        assert_eq!(event.sequence, last + 1);
        last = event.sequence;
        if event.change == Change::EntryDeleted {
            assert_eq!(event.entries.len(), PER_WRITER);
            break;
        }
    }
    writer.join().unwrap();

    assert_eq!(last, PER_WRITER as u64 + 1);
    assert_eq!(feed.try_recv().unwrap_err(), FeedError::Empty);
}
