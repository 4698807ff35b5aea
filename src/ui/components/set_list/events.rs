//! Service and builder event handling for SetList
//!
//! Results from the background service thread and updates from an open
//! Item Builder window arrive on std::sync::mpsc channels; a timer loop
//! drains both on the UI thread.

use std::time::Duration;

use gpui::{AsyncApp, Context, Timer, WeakEntity};

use crate::services::{ServiceEvent, show_from_stored};
use crate::ui::components::BuilderUpdate;

use super::SetList;

impl SetList {
    /// Drain service events and apply them to the view state
    ///
    /// Returns true if any events were processed.
    pub(crate) fn poll_service_events(&mut self) -> bool {
        let mut events_processed = false;

        while let Ok(event) = self.service_event_rx.try_recv() {
            events_processed = true;

            match event {
                ServiceEvent::RosterLoaded(roster) => {
                    log::info!(
                        "Roster loaded: {} headliners, {} openers",
                        roster.headliners.len(),
                        roster.openers.len()
                    );
                    self.roster = Some(roster);
                    self.roster_error = None;
                }
                ServiceEvent::RosterFailed(error) => {
                    log::error!("Roster fetch failed: {}", error);
                    self.roster_error = Some(error);
                }
                ServiceEvent::ShowLoaded(stored) => {
                    log::info!("Loaded show {:?} for editing", stored.slug);
                    self.show = show_from_stored(*stored);
                }
                ServiceEvent::ShowLoadFailed(error) => {
                    self.pending_error_message =
                        Some(("Could not load show".to_string(), error));
                }
                ServiceEvent::SaveFinished(result) => {
                    self.finish_save(result);
                }
                ServiceEvent::SongsLoaded { .. } => {
                    // Song lookups reply to the Item Builder's own channel
                    log::debug!("Ignoring song lookup reply on the set list channel");
                }
            }
        }

        events_processed
    }

    /// Drain updates from an open Item Builder window
    ///
    /// Returns true if any updates were processed.
    pub(crate) fn poll_builder_updates(&mut self) -> bool {
        let rx = match self.builder_update_rx.as_ref() {
            Some(rx) => rx,
            None => return false,
        };

        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }

        let updates_processed = !updates.is_empty();
        for update in updates {
            match update {
                BuilderUpdate::ItemAdded(item) => {
                    log::debug!("Appending {} to the set", item.kind().label());
                    self.show.append(item);
                }
                BuilderUpdate::Closed => {
                    self.builder_update_rx = None;
                }
            }
        }

        updates_processed
    }

    /// Start a polling loop that drains service and builder events
    pub fn start_event_polling(cx: &mut Context<Self>) {
        cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                loop {
                    Timer::after(Duration::from_millis(100)).await;

                    let alive = this
                        .update(&mut async_cx, |this, cx| {
                            let had_events = this.poll_service_events();
                            let had_updates = this.poll_builder_updates();
                            if this.session_complete {
                                // A successful save ends the editing session
                                cx.quit();
                                return false;
                            }
                            if had_events || had_updates {
                                cx.notify();
                            }
                            true
                        })
                        .unwrap_or(false);

                    if !alive {
                        break;
                    }
                }
            }
        })
        .detach();
    }
}
