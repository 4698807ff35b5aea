//! Tests for SetList view logic that doesn't need a window

use crate::model::SetItem;
use crate::services::{SaveResponse, ServiceEvent};

use super::SetList;

fn opener(name: &str, duration_seconds: u32) -> SetItem {
    SetItem::Opener {
        artist_id: "1".to_string(),
        artist_name: name.to_string(),
        duration_seconds,
    }
}

fn names(list: &SetList) -> Vec<&str> {
    list.show.items().iter().map(|i| i.display_name()).collect()
}

#[test]
fn test_move_row_reorders() {
    let mut list = SetList::new_for_test();
    for name in ["a", "b", "c", "d"] {
        list.show.append(opener(name, 60));
    }

    // Drag row 0 onto row 2
    list.move_row(0, 2);
    assert_eq!(names(&list), vec!["b", "c", "a", "d"]);

    // Drag row 3 onto row 0
    list.move_row(3, 0);
    assert_eq!(names(&list), vec!["d", "b", "c", "a"]);
}

#[test]
fn test_move_row_to_end() {
    let mut list = SetList::new_for_test();
    for name in ["a", "b", "c"] {
        list.show.append(opener(name, 60));
    }

    // Container drop targets the last position
    let end = list.show.len().saturating_sub(1);
    list.move_row(0, end);
    assert_eq!(names(&list), vec!["b", "c", "a"]);
}

#[test]
fn test_remove_row() {
    let mut list = SetList::new_for_test();
    list.show.append(opener("a", 60));
    list.show.append(opener("b", 60));

    list.remove_row(0);
    assert_eq!(names(&list), vec!["b"]);

    // Out of range is ignored
    list.remove_row(5);
    assert_eq!(names(&list), vec!["b"]);
}

#[test]
fn test_save_requires_label() {
    use crate::services::ServiceBridge;

    let mut list = SetList::new_for_test();
    list.show.append(opener("a", 60));
    list.show.set_label("   ".to_string());
    list.bridge = ServiceBridge::start("http://localhost:1").ok();
    assert!(list.bridge.is_some());

    list.request_save();

    // A whitespace-only label blocks the save before anything is dispatched
    assert!(!list.save_in_flight);
    assert!(list.pending_error_message.is_some());
    assert!(list.show.is_dirty());
}

#[test]
fn test_save_not_dispatched_without_changes() {
    let mut list = SetList::new_for_test();
    list.show.set_label("Launch Night".to_string());
    list.show.mark_saved(Some("launch-night".to_string()));

    assert!(!list.can_save());
    list.request_save();
    assert!(!list.save_in_flight);
}

#[test]
fn test_finish_save_success_clears_dirty_and_adopts_slug() {
    let mut list = SetList::new_for_test();
    list.show.set_label("Launch Night".to_string());
    list.show.append(opener("a", 60));
    list.save_in_flight = true;

    list.finish_save(Ok(SaveResponse {
        ok: true,
        slug: Some("launch-night".to_string()),
    }));

    assert!(!list.save_in_flight);
    assert!(!list.show.is_dirty());
    assert_eq!(list.show.slug(), Some("launch-night"));
    assert!(list.pending_error_message.is_none());
    // Saving is the terminal state for the editing session
    assert!(list.session_complete);
}

#[test]
fn test_finish_save_failure_keeps_show_dirty() {
    let mut list = SetList::new_for_test();
    list.show.set_label("Launch Night".to_string());
    list.show.append(opener("a", 60));
    list.save_in_flight = true;

    list.finish_save(Err("connection refused".to_string()));

    assert!(!list.save_in_flight);
    assert!(list.show.is_dirty());
    assert!(list.pending_error_message.is_some());
    assert!(!list.session_complete);
}

#[test]
fn test_finish_save_rejected_by_server() {
    let mut list = SetList::new_for_test();
    list.show.append(opener("a", 60));
    list.save_in_flight = true;

    list.finish_save(Ok(SaveResponse {
        ok: false,
        slug: None,
    }));

    assert!(list.show.is_dirty());
    assert!(list.pending_error_message.is_some());
}

#[test]
fn test_poll_service_events_applies_roster_and_save() {
    let mut list = SetList::new_for_test();
    list.show.append(opener("a", 60));
    list.save_in_flight = true;

    let tx = list.service_event_tx.clone();
    tx.send(ServiceEvent::RosterLoaded(Default::default())).unwrap();
    tx.send(ServiceEvent::SaveFinished(Ok(SaveResponse {
        ok: true,
        slug: Some("s".to_string()),
    })))
    .unwrap();

    assert!(list.poll_service_events());
    assert!(list.roster.is_some());
    assert!(!list.save_in_flight);
    assert!(!list.show.is_dirty());

    // Nothing left to drain
    assert!(!list.poll_service_events());
}

#[test]
fn test_poll_builder_updates_appends_items() {
    use crate::ui::components::BuilderUpdate;

    let mut list = SetList::new_for_test();
    let (tx, rx) = std::sync::mpsc::channel();
    list.builder_update_rx = Some(rx);

    tx.send(BuilderUpdate::ItemAdded(opener("a", 60))).unwrap();
    tx.send(BuilderUpdate::Closed).unwrap();

    assert!(list.poll_builder_updates());
    assert_eq!(names(&list), vec!["a"]);
    // Closed releases the channel so another builder can open
    assert!(list.builder_update_rx.is_none());
}
