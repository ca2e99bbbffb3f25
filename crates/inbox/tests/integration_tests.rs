//! Integration tests for the inbox crate
//!
//! These tests drive the store the way the inbox screens do: select a
//! thread, edit a draft, stage files, send, navigate.

use std::collections::HashMap;
use std::sync::Arc;

use inbox::models::{
    AttachmentKind, Channel, Classification, Contact, PendingAttachment, Thread, ThreadId, Urgency,
};
use inbox::query::{get_active_thread_detail, get_thread_messages, list_threads};
use inbox::storage::{FileBlobResolver, InMemoryInboxStore, InboxStore};
use inbox::{InboxSeed, MobileView};
use tempfile::TempDir;

/// Helper to create test threads
fn make_thread(id: &str, name: &str) -> Thread {
    Thread::new(
        ThreadId::new(id),
        Contact::new(name, format!("https://avatars.example/{}.svg", id), "Client"),
        Channel::Email,
        Some(format!("Subject {}", id)),
        "Latest preview".to_string(),
        "10:12 AM".to_string(),
        Classification::Sales,
        Urgency::High,
        true,
        "Thanks, will do.".to_string(),
    )
}

/// Two threads "1" and "2" with empty ledgers
fn two_thread_store() -> InMemoryInboxStore {
    let seed = InboxSeed::new(
        vec![make_thread("1", "Killan"), make_thread("2", "Design Team")],
        HashMap::new(),
    );
    InMemoryInboxStore::with_object_urls(seed).unwrap()
}

fn file(name: &str, mime: &str) -> PendingAttachment {
    PendingAttachment::new(name, mime, name.as_bytes().to_vec())
}

#[test]
fn test_draft_attach_send_scenario() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");
    let t2 = ThreadId::new("2");

    store.set_draft(&t1, "Hello").unwrap();
    store.add_attachments(&t1, vec![file("a.png", "image/png")]).unwrap();
    store.send_message(&t1, "Hello").unwrap();

    let messages = store.get_messages(&t1).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "Hello");
    assert!(messages[0].is_me);
    assert_eq!(messages[0].sender_id, "me");
    assert_eq!(messages[0].attachments.len(), 1);
    assert_eq!(messages[0].attachments[0].kind, AttachmentKind::Image);
    assert_eq!(messages[0].attachments[0].name, "a.png");

    assert!(store.get_messages(&t2).unwrap().is_empty());
    assert_eq!(store.get_draft(&t1).unwrap(), "");
    assert!(store.get_attachments(&t1).unwrap().is_empty());
}

#[test]
fn test_ledger_is_append_only() {
    let store = InMemoryInboxStore::with_object_urls(InboxSeed::builtin()).unwrap();
    let t1 = ThreadId::new("1");

    let before = store.get_messages(&t1).unwrap();
    assert_eq!(before.len(), 2);

    for i in 0..4 {
        store.send_message(&t1, &format!("reply {}", i)).unwrap().unwrap();
        let now = store.get_messages(&t1).unwrap();
        assert_eq!(now.len(), before.len() + i + 1);
        // Earlier messages keep their positions
        assert_eq!(&now[..before.len()], &before[..]);
    }

    let texts: Vec<_> = store
        .get_messages(&t1)
        .unwrap()
        .into_iter()
        .skip(2)
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, vec!["reply 0", "reply 1", "reply 2", "reply 3"]);
}

#[test]
fn test_send_clears_staging_together() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");

    store.set_is_editing_draft(true).unwrap();
    store.set_draft(&t1, "See attached").unwrap();
    store
        .add_attachments(&t1, vec![file("a.png", "image/png"), file("b.txt", "text/plain")])
        .unwrap();

    store.send_message(&t1, "See attached").unwrap().unwrap();

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.draft(&t1), "");
    assert!(snapshot.pending(&t1).is_empty());
    assert!(!snapshot.is_editing_draft);
    assert_eq!(snapshot.messages(&t1).len(), 1);
}

#[test]
fn test_empty_send_is_noop() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");
    store.set_draft(&t1, "unsent").unwrap();

    let result = store.send_message(&t1, "").unwrap();
    assert!(result.is_none());
    assert!(store.get_messages(&t1).unwrap().is_empty());
    assert_eq!(store.get_draft(&t1).unwrap(), "unsent");
    assert!(store.get_attachments(&t1).unwrap().is_empty());
}

#[test]
fn test_selection_side_effects() {
    let store = InMemoryInboxStore::with_object_urls(InboxSeed::builtin()).unwrap();

    for thread in store.list_threads().unwrap() {
        store.set_is_editing_draft(true).unwrap();
        store.go_back().unwrap();

        store.set_active_thread_id(&thread.id).unwrap();

        assert_eq!(store.get_active_thread().unwrap().id, thread.id);
        assert!(!store.is_editing_draft().unwrap());
        assert_eq!(store.mobile_view().unwrap(), MobileView::Thread);
    }
}

#[test]
fn test_unknown_selection_falls_back() {
    let store = two_thread_store();
    let ghost = ThreadId::new("ghost");

    store.set_active_thread_id(&ghost).unwrap();

    assert_eq!(store.active_thread_id().unwrap(), ghost);
    assert_eq!(store.get_active_thread().unwrap().id, ThreadId::new("1"));
    assert!(store.get_messages(&ghost).unwrap().is_empty());
    assert_eq!(store.mobile_view().unwrap(), MobileView::Thread);
}

#[test]
fn test_attachment_kind_derivation() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");

    store.add_attachments(&t1, vec![file("x.png", "image/png")]).unwrap();
    let msg = store.send_message(&t1, "").unwrap().unwrap();
    assert_eq!(msg.attachments.len(), 1);
    assert_eq!(msg.attachments[0].kind, AttachmentKind::Image);

    store.add_attachments(&t1, vec![file("notes.txt", "text/plain")]).unwrap();
    let msg = store.send_message(&t1, "").unwrap().unwrap();
    assert_eq!(msg.attachments[0].kind, AttachmentKind::File);
}

#[test]
fn test_staging_is_per_thread() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");
    let t2 = ThreadId::new("2");

    store.set_draft(&t2, "B's draft").unwrap();
    store.add_attachments(&t2, vec![file("b.pdf", "application/pdf")]).unwrap();

    store.set_draft(&t1, "A's draft").unwrap();
    store.add_attachments(&t1, vec![file("a.png", "image/png")]).unwrap();
    store.remove_attachment(&t1, 0).unwrap();
    store.send_message(&t1, "A's draft").unwrap().unwrap();

    assert_eq!(store.get_draft(&t2).unwrap(), "B's draft");
    let staged = store.get_attachments(&t2).unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].name, "b.pdf");
}

#[test]
fn test_attachments_keep_call_order_without_dedup() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");

    store.add_attachments(&t1, vec![file("a.png", "image/png")]).unwrap();
    store
        .add_attachments(&t1, vec![file("b.txt", "text/plain"), file("a.png", "image/png")])
        .unwrap();

    let names: Vec<_> = store
        .get_attachments(&t1)
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["a.png", "b.txt", "a.png"]);

    let msg = store.send_message(&t1, "").unwrap().unwrap();
    let sent: Vec<_> = msg.attachments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(sent, vec!["a.png", "b.txt", "a.png"]);
}

#[test]
fn test_remove_attachment_out_of_range_is_ignored() {
    let store = two_thread_store();
    let t1 = ThreadId::new("1");
    store.add_attachments(&t1, vec![file("a.png", "image/png")]).unwrap();

    assert!(store.remove_attachment(&t1, 5).unwrap().is_none());
    assert!(store.remove_attachment(&ThreadId::new("2"), 0).unwrap().is_none());
    assert_eq!(store.get_attachments(&t1).unwrap().len(), 1);
}

#[test]
fn test_routing_round_trip() {
    let store = two_thread_store();
    assert_eq!(store.mobile_view().unwrap(), MobileView::List);

    store.set_active_thread_id(&ThreadId::new("2")).unwrap();
    for _ in 0..3 {
        store.set_mobile_view(MobileView::List).unwrap();
        store.set_mobile_view(MobileView::Thread).unwrap();
    }
    assert_eq!(store.mobile_view().unwrap(), MobileView::Thread);
}

#[test]
fn test_query_views_after_send() {
    let store = InMemoryInboxStore::with_object_urls(InboxSeed::builtin()).unwrap();
    let t3 = ThreadId::new("3");

    store.set_active_thread_id(&t3).unwrap();
    store.set_draft(&t3, "Payment processed").unwrap();
    store.send_message(&t3, "Payment processed").unwrap().unwrap();

    let detail = get_active_thread_detail(&store).unwrap().unwrap();
    assert_eq!(detail.thread.contact.name, "Ahmed Medi");
    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.draft, "");

    assert_eq!(get_thread_messages(&store, &t3).unwrap(), detail.messages);

    let summaries = list_threads(&store).unwrap();
    assert_eq!(summaries[2].message_count, 2);
    assert!(summaries[2].is_active);
    assert!(!summaries[2].has_draft);
}

#[test]
fn test_concurrent_senders_never_lose_messages() {
    let store = Arc::new(two_thread_store());
    let t1 = ThreadId::new("1");

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let store = Arc::clone(&store);
            let t1 = t1.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    store.send_message(&t1, &format!("{}-{}", n, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = store.get_messages(&t1).unwrap();
    assert_eq!(messages.len(), 100);

    let mut ids: Vec<_> = messages.iter().map(|m| m.id.clone().0).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_file_blob_resolver_end_to_end() {
    let dir = TempDir::new().unwrap();
    let resolver = FileBlobResolver::new(dir.path().join("attachments")).unwrap();
    let store = InMemoryInboxStore::new(InboxSeed::builtin(), Arc::new(resolver)).unwrap();
    let t2 = ThreadId::new("2");

    store
        .add_attachments(&t2, vec![file("asset.svg", "image/svg+xml")])
        .unwrap();
    let msg = store.send_message(&t2, "Here it is").unwrap().unwrap();

    let url = &msg.attachments[0].url;
    assert!(url.starts_with("file://"));
    assert_eq!(msg.attachments[0].kind, AttachmentKind::Image);
}
