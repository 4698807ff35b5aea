//! Generation-tagged song chooser
//!
//! Artist selection changes dispatch asynchronous catalog lookups whose
//! results can arrive in any order. Each chooser keeps a monotonically
//! increasing generation; a lookup captures the generation at dispatch time
//! and its result is applied only if that generation is still current, so
//! the most recently initiated lookup always wins regardless of arrival
//! order.

use std::collections::HashSet;

use crate::services::Song;

/// Where the chooser is in the lookup cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserState {
    /// No artist selected, nothing to choose from
    Idle,
    /// A lookup is in flight; the chooser is disabled and cleared
    Loading,
    /// Lookup complete; may be empty if the lookup failed or the catalog
    /// has no songs
    Ready(Vec<Song>),
}

#[derive(Debug)]
pub struct SongChooser {
    generation: u64,
    state: ChooserState,
    selected: Option<String>,
}

impl SongChooser {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: ChooserState::Idle,
            selected: None,
        }
    }

    /// Begin a new lookup cycle; returns the generation the dispatched
    /// lookup must carry. Clears any previous songs and selection.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = ChooserState::Loading;
        self.selected = None;
        self.generation
    }

    /// Return to the idle state (no artist selected). Bumps the generation
    /// so any in-flight lookup is discarded on arrival.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ChooserState::Idle;
        self.selected = None;
    }

    /// Apply a lookup result if its generation is still current
    ///
    /// Returns true when the result was installed, false when it was stale
    /// and discarded.
    pub fn apply(&mut self, generation: u64, songs: Vec<Song>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale song lookup (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }
        self.state = ChooserState::Ready(songs);
        true
    }

    pub fn state(&self) -> &ChooserState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ChooserState::Loading
    }

    /// The chooser accepts a selection only once populated
    pub fn is_enabled(&self) -> bool {
        matches!(&self.state, ChooserState::Ready(songs) if !songs.is_empty())
    }

    pub fn songs(&self) -> &[Song] {
        match &self.state {
            ChooserState::Ready(songs) => songs,
            _ => &[],
        }
    }

    /// Select a song by id; ignored unless the id is currently on offer
    pub fn select(&mut self, song_id: &str) {
        if self.songs().iter().any(|s| s.id == song_id) {
            self.selected = Some(song_id.to_string());
        }
    }

    pub fn selected_song(&self) -> Option<&Song> {
        let selected = self.selected.as_deref()?;
        self.songs().iter().find(|s| s.id == selected)
    }
}

impl Default for SongChooser {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge per-artist catalogs into a distinct union
///
/// Duplicates collapse on song id; first occurrence order is kept.
pub fn merge_catalogs(catalogs: Vec<Vec<Song>>) -> Vec<Song> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for songs in catalogs {
        for song in songs {
            if seen.insert(song.id.clone()) {
                merged.push(song);
            }
        }
    }
    merged
}
