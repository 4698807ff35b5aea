//! SetList component - The main application view
//!
//! This is the root view of the application, containing:
//! - Header with the editable show label and vibe selector
//! - The ordered set list with drag-and-drop reordering
//! - Status bar with totals and the Add Item / Save buttons

mod events;
mod render;
mod saving;
#[cfg(test)]
mod tests;

use gpui::{Context, FocusHandle, ScrollHandle};
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::model::Show;
use crate::services::{Roster, ServiceBridge, ServiceEvent};
use crate::ui::components::BuilderUpdate;

/// The main set list view
///
/// Handles:
/// - Displaying the ordered set items
/// - Internal drag-drop for reordering
/// - Label editing and vibe selection
/// - Dispatching saves and applying service results
pub struct SetList {
    /// The show being edited
    pub(crate) show: Show,
    /// Artist roster, fetched once at startup (None until loaded)
    pub(crate) roster: Option<Roster>,
    /// Error from the roster fetch, shown in place of the list controls
    pub(crate) roster_error: Option<String>,
    /// Whether we've subscribed to appearance changes
    pub(crate) appearance_subscription_set: bool,
    /// Whether we've subscribed to bounds changes (for saving window state)
    pub(crate) bounds_subscription_set: bool,
    /// Handle for scroll state
    pub(crate) scroll_handle: ScrollHandle,
    /// Focus handle for receiving actions (None in tests)
    pub(crate) focus_handle: Option<FocusHandle>,
    /// Handle to the background service thread (None in tests)
    pub(crate) bridge: Option<ServiceBridge>,
    /// Reply channel handed to every service command this view issues
    pub(crate) service_event_tx: Sender<ServiceEvent>,
    pub(crate) service_event_rx: Receiver<ServiceEvent>,
    /// Updates from an open Item Builder window
    pub(crate) builder_update_rx: Option<Receiver<BuilderUpdate>>,
    /// Whether a save request is in flight
    pub(crate) save_in_flight: bool,
    /// Whether the label is being edited inline
    pub(crate) editing_label: bool,
    /// Pending error dialog (title, message), shown from the render loop
    pub(crate) pending_error_message: Option<(String, String)>,
    /// Whether we need to grab initial focus (for menu items to work)
    pub(crate) needs_initial_focus: bool,
    /// Set after a successful save: the editing session is complete and the
    /// polling loop quits the app
    pub(crate) session_complete: bool,
}

impl SetList {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let (service_event_tx, service_event_rx) = channel();
        Self {
            show: Show::new(),
            roster: None,
            roster_error: None,
            appearance_subscription_set: false,
            bounds_subscription_set: false,
            scroll_handle: ScrollHandle::new(),
            focus_handle: Some(cx.focus_handle()),
            bridge: None,
            service_event_tx,
            service_event_rx,
            builder_update_rx: None,
            save_in_flight: false,
            editing_label: false,
            pending_error_message: None,
            needs_initial_focus: true,
            session_complete: false,
        }
    }

    /// Create a new SetList for testing (without GPUI context)
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let (service_event_tx, service_event_rx) = channel();
        Self {
            show: Show::new(),
            roster: None,
            roster_error: None,
            appearance_subscription_set: false,
            bounds_subscription_set: false,
            scroll_handle: ScrollHandle::new(),
            focus_handle: None,
            bridge: None,
            service_event_tx,
            service_event_rx,
            builder_update_rx: None,
            save_in_flight: false,
            editing_label: false,
            pending_error_message: None,
            needs_initial_focus: false,
            session_complete: false,
        }
    }

    /// Connect the background services and request the roster
    pub fn connect(&mut self, bridge: ServiceBridge, initial_slug: Option<String>) {
        bridge.fetch_roster(self.service_event_tx.clone());
        if let Some(slug) = initial_slug {
            bridge.load_show(slug, self.service_event_tx.clone());
        }
        self.bridge = Some(bridge);
    }

    /// Relocate the row at `from` so it ends up at `to`
    pub(crate) fn move_row(&mut self, from: usize, to: usize) {
        self.show.move_to(from, to);
    }

    pub(crate) fn remove_row(&mut self, index: usize) {
        self.show.remove_at(index);
    }
}
