//! Background service bridge
//!
//! The UI never performs network I/O directly: a dedicated thread owns a
//! tokio runtime and the HTTP clients, takes commands over a channel, and
//! sends each result back on the reply channel the command carries. Replies
//! are polled by the windows on a timer, so all model mutation stays on the
//! UI thread.

use std::sync::mpsc::{self, Sender};
use std::thread;

use crate::builder::merge_catalogs;

use super::catalog::{HttpCatalog, Roster, Song};
use super::store::HttpShowStore;
use super::wire::{SaveResponse, StoredShow, WireShow};

/// Which song chooser a lookup belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Headliner,
    Collab,
}

/// Commands the UI sends to the service thread
pub enum ServiceCommand {
    FetchRoster {
        reply: Sender<ServiceEvent>,
    },
    FetchSongs {
        target: LookupTarget,
        artist_id: String,
        generation: u64,
        reply: Sender<ServiceEvent>,
    },
    FetchSongsUnion {
        target: LookupTarget,
        artist_ids: Vec<String>,
        generation: u64,
        reply: Sender<ServiceEvent>,
    },
    SaveShow {
        payload: WireShow,
        reply: Sender<ServiceEvent>,
    },
    LoadShow {
        slug: String,
        reply: Sender<ServiceEvent>,
    },
}

/// Results sent back to whichever window issued the command
pub enum ServiceEvent {
    RosterLoaded(Roster),
    RosterFailed(String),
    /// Songs for a chooser; failed lookups deliver an empty list so the
    /// chooser is simply left empty. The generation lets the receiver
    /// discard results that a newer selection has made stale.
    SongsLoaded {
        target: LookupTarget,
        generation: u64,
        songs: Vec<Song>,
    },
    ShowLoaded(Box<StoredShow>),
    ShowLoadFailed(String),
    SaveFinished(Result<SaveResponse, String>),
}

/// Cloneable handle to the service thread
#[derive(Clone)]
pub struct ServiceBridge {
    command_tx: Sender<ServiceCommand>,
}

impl ServiceBridge {
    /// Spawn the service thread with its own tokio runtime
    ///
    /// The thread exits once every handle has been dropped.
    pub fn start(base_url: &str) -> Result<Self, String> {
        let catalog =
            HttpCatalog::new(base_url).map_err(|e| format!("Catalog client: {}", e))?;
        let store =
            HttpShowStore::new(base_url).map_err(|e| format!("Show store client: {}", e))?;

        let (command_tx, command_rx) = mpsc::channel::<ServiceCommand>();

        thread::Builder::new()
            .name("services".to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        log::error!("Failed to create service runtime: {}", e);
                        return;
                    }
                };

                while let Ok(command) = command_rx.recv() {
                    let catalog = catalog.clone();
                    let store = store.clone();
                    rt.spawn(handle_command(command, catalog, store));
                }
                log::debug!("Service thread shutting down");
            })
            .map_err(|e| format!("Failed to spawn service thread: {}", e))?;

        Ok(Self { command_tx })
    }

    pub fn fetch_roster(&self, reply: Sender<ServiceEvent>) {
        let _ = self.command_tx.send(ServiceCommand::FetchRoster { reply });
    }

    pub fn fetch_songs(
        &self,
        target: LookupTarget,
        artist_id: String,
        generation: u64,
        reply: Sender<ServiceEvent>,
    ) {
        let _ = self.command_tx.send(ServiceCommand::FetchSongs {
            target,
            artist_id,
            generation,
            reply,
        });
    }

    pub fn fetch_songs_union(
        &self,
        target: LookupTarget,
        artist_ids: Vec<String>,
        generation: u64,
        reply: Sender<ServiceEvent>,
    ) {
        let _ = self.command_tx.send(ServiceCommand::FetchSongsUnion {
            target,
            artist_ids,
            generation,
            reply,
        });
    }

    pub fn save_show(&self, payload: WireShow, reply: Sender<ServiceEvent>) {
        let _ = self
            .command_tx
            .send(ServiceCommand::SaveShow { payload, reply });
    }

    pub fn load_show(&self, slug: String, reply: Sender<ServiceEvent>) {
        let _ = self.command_tx.send(ServiceCommand::LoadShow { slug, reply });
    }
}

async fn handle_command(command: ServiceCommand, catalog: HttpCatalog, store: HttpShowStore) {
    match command {
        ServiceCommand::FetchRoster { reply } => {
            let event = match catalog.roster().await {
                Ok(roster) => ServiceEvent::RosterLoaded(roster),
                Err(e) => {
                    log::error!("Roster fetch failed: {}", e);
                    ServiceEvent::RosterFailed(e.to_string())
                }
            };
            let _ = reply.send(event);
        }
        ServiceCommand::FetchSongs {
            target,
            artist_id,
            generation,
            reply,
        } => {
            let songs = catalog
                .songs_by_artist(&artist_id)
                .await
                .unwrap_or_else(|e| {
                    log::warn!("Song lookup for artist {} failed: {}", artist_id, e);
                    Vec::new()
                });
            let _ = reply.send(ServiceEvent::SongsLoaded {
                target,
                generation,
                songs,
            });
        }
        ServiceCommand::FetchSongsUnion {
            target,
            artist_ids,
            generation,
            reply,
        } => {
            // Fan out one lookup per artist, fan in once all of them are
            // done. A failed lookup contributes nothing to the union.
            let lookups = artist_ids.iter().map(|id| catalog.songs_by_artist(id));
            let results = futures::future::join_all(lookups).await;
            let catalogs: Vec<Vec<Song>> = results
                .into_iter()
                .zip(&artist_ids)
                .map(|(result, id)| {
                    result.unwrap_or_else(|e| {
                        log::warn!("Song lookup for artist {} failed: {}", id, e);
                        Vec::new()
                    })
                })
                .collect();
            let songs = merge_catalogs(catalogs);
            let _ = reply.send(ServiceEvent::SongsLoaded {
                target,
                generation,
                songs,
            });
        }
        ServiceCommand::SaveShow { payload, reply } => {
            let result = store
                .save_show(&payload)
                .await
                .map_err(|e| e.to_string());
            if let Err(ref e) = result {
                log::error!("Save failed: {}", e);
            }
            let _ = reply.send(ServiceEvent::SaveFinished(result));
        }
        ServiceCommand::LoadShow { slug, reply } => {
            let event = match store.fetch_show(&slug).await {
                Ok(stored) => ServiceEvent::ShowLoaded(Box::new(stored)),
                Err(e) => {
                    log::error!("Failed to load show {}: {}", slug, e);
                    ServiceEvent::ShowLoadFailed(e.to_string())
                }
            };
            let _ = reply.send(event);
        }
    }
}
