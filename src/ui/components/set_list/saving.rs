//! Save flow for SetList
//!
//! A save serializes the whole show and hands it to the service thread;
//! exactly one request is in flight at a time. The result comes back as a
//! SaveFinished event on the polling loop.

use crate::services::{SaveResponse, WireShow};

use super::SetList;

impl SetList {
    /// Whether the Save button should be clickable
    pub(crate) fn can_save(&self) -> bool {
        self.show.is_dirty() && !self.save_in_flight && self.bridge.is_some()
    }

    /// Validate and dispatch a save request
    pub(crate) fn request_save(&mut self) {
        if !self.can_save() {
            return;
        }

        if self.show.label().trim().is_empty() {
            self.pending_error_message = Some((
                "Cannot save".to_string(),
                "Give the show a label before saving.".to_string(),
            ));
            return;
        }

        let bridge = match self.bridge.as_ref() {
            Some(bridge) => bridge,
            None => return,
        };

        let payload = WireShow::from_show(&self.show);
        bridge.save_show(payload, self.service_event_tx.clone());
        self.save_in_flight = true;
    }

    /// Apply the outcome of a save request
    ///
    /// On success the show adopts the server-assigned slug and the dirty
    /// flag clears; on failure the show stays dirty so the save can be
    /// retried.
    pub(crate) fn finish_save(&mut self, result: Result<SaveResponse, String>) {
        self.save_in_flight = false;

        match result {
            Ok(response) if response.ok => {
                log::info!("Show saved as {:?}", response.slug);
                self.show.mark_saved(response.slug);
                // Saving ends the editing session
                self.session_complete = true;
            }
            Ok(_) => {
                self.pending_error_message = Some((
                    "Save failed".to_string(),
                    "The server rejected the show.".to_string(),
                ));
            }
            Err(error) => {
                self.pending_error_message = Some(("Save failed".to_string(), error));
            }
        }
    }
}
