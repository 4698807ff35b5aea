//! Item draft state machine
//!
//! Backs the Item Builder window. The draft keeps independent state for
//! every item kind so switching the kind selector back and forth never
//! loses what the user already entered; only `build` collapses the draft
//! into a finished item, and only for the active kind.

use crate::model::{ItemKind, MAX_MINUTES, SetItem, clamp_minutes, minutes_to_seconds};
use crate::services::{Artist, Song};

use super::chooser::SongChooser;

#[derive(Debug, Default)]
pub struct ItemDraft {
    kind: ItemKind,

    opener_artist: Option<Artist>,
    opener_minutes: u32,

    headliner_artist: Option<Artist>,
    headliner_songs: SongChooser,

    collab_artists: Vec<Artist>,
    collab_songs: SongChooser,

    break_minutes: u32,
    intermission_minutes: u32,

    talking_artist: Option<Artist>,
}

impl ItemDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Switch the active kind; state for every other kind is retained
    pub fn set_kind(&mut self, kind: ItemKind) {
        self.kind = kind;
    }

    // --- Opener ---

    pub fn opener_artist(&self) -> Option<&Artist> {
        self.opener_artist.as_ref()
    }

    pub fn set_opener_artist(&mut self, artist: Option<Artist>) {
        self.opener_artist = artist;
    }

    pub fn opener_minutes(&self) -> u32 {
        self.opener_minutes
    }

    pub fn set_opener_minutes(&mut self, minutes: u32) {
        self.opener_minutes = clamp_minutes(minutes);
    }

    // --- Headliner ---

    pub fn headliner_artist(&self) -> Option<&Artist> {
        self.headliner_artist.as_ref()
    }

    pub fn headliner_songs(&self) -> &SongChooser {
        &self.headliner_songs
    }

    /// Change the headliner artist. Returns the generation a song lookup
    /// for the new artist must carry, or None when the selection cleared.
    pub fn select_headliner_artist(&mut self, artist: Option<Artist>) -> Option<u64> {
        self.headliner_artist = artist;
        match self.headliner_artist {
            Some(_) => Some(self.headliner_songs.begin()),
            None => {
                self.headliner_songs.reset();
                None
            }
        }
    }

    pub fn apply_headliner_songs(&mut self, generation: u64, songs: Vec<Song>) -> bool {
        self.headliner_songs.apply(generation, songs)
    }

    pub fn select_headliner_song(&mut self, song_id: &str) {
        self.headliner_songs.select(song_id);
    }

    // --- Collaboration ---

    pub fn collab_artists(&self) -> &[Artist] {
        &self.collab_artists
    }

    pub fn has_collab_artist(&self, artist_id: &str) -> bool {
        self.collab_artists.iter().any(|a| a.id == artist_id)
    }

    pub fn collab_songs(&self) -> &SongChooser {
        &self.collab_songs
    }

    /// Toggle an artist in or out of the collaboration roster
    ///
    /// Any change to the roster invalidates the current song list. Returns
    /// the generation plus the artist ids a union lookup must cover, or
    /// None when the roster became empty.
    pub fn toggle_collab_artist(&mut self, artist: Artist) -> Option<(u64, Vec<String>)> {
        if let Some(pos) = self.collab_artists.iter().position(|a| a.id == artist.id) {
            self.collab_artists.remove(pos);
        } else {
            self.collab_artists.push(artist);
        }

        if self.collab_artists.is_empty() {
            self.collab_songs.reset();
            return None;
        }
        let generation = self.collab_songs.begin();
        let ids = self.collab_artists.iter().map(|a| a.id.clone()).collect();
        Some((generation, ids))
    }

    pub fn apply_collab_songs(&mut self, generation: u64, songs: Vec<Song>) -> bool {
        self.collab_songs.apply(generation, songs)
    }

    pub fn select_collab_song(&mut self, song_id: &str) {
        self.collab_songs.select(song_id);
    }

    // --- Break / Intermission ---

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.break_minutes = clamp_minutes(minutes);
    }

    pub fn intermission_minutes(&self) -> u32 {
        self.intermission_minutes
    }

    pub fn set_intermission_minutes(&mut self, minutes: u32) {
        self.intermission_minutes = clamp_minutes(minutes);
    }

    /// The minutes field for the active kind, if it has one
    pub fn active_minutes(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Opener => Some(self.opener_minutes),
            ItemKind::Break => Some(self.break_minutes),
            ItemKind::Intermission => Some(self.intermission_minutes),
            _ => None,
        }
    }

    pub fn set_active_minutes(&mut self, minutes: u32) {
        match self.kind {
            ItemKind::Opener => self.set_opener_minutes(minutes),
            ItemKind::Break => self.set_break_minutes(minutes),
            ItemKind::Intermission => self.set_intermission_minutes(minutes),
            _ => {}
        }
    }

    pub fn step_active_minutes(&mut self, delta: i64) {
        if let Some(current) = self.active_minutes() {
            let next = (current as i64 + delta).clamp(0, MAX_MINUTES as i64) as u32;
            self.set_active_minutes(next);
        }
    }

    // --- Talking segment ---

    pub fn talking_artist(&self) -> Option<&Artist> {
        self.talking_artist.as_ref()
    }

    pub fn set_talking_artist(&mut self, artist: Option<Artist>) {
        self.talking_artist = artist;
    }

    /// Collapse the draft into a finished item, if the active kind's
    /// requirements are met
    ///
    /// Requirements per kind:
    /// - Opener: an artist (a zero-minute slot is allowed)
    /// - Headliner: an artist and a chosen song
    /// - Collaboration: at least two artists and a chosen song
    /// - Break / Intermission: always buildable
    /// - Talking segment: an artist
    pub fn build(&self) -> Option<SetItem> {
        match self.kind {
            ItemKind::Opener => {
                let artist = self.opener_artist.as_ref()?;
                Some(SetItem::Opener {
                    artist_id: artist.id.clone(),
                    artist_name: artist.name.clone(),
                    duration_seconds: minutes_to_seconds(self.opener_minutes),
                })
            }
            ItemKind::Headliner => {
                let artist = self.headliner_artist.as_ref()?;
                let song = self.headliner_songs.selected_song()?;
                Some(SetItem::Headliner {
                    artist_id: artist.id.clone(),
                    artist_name: artist.name.clone(),
                    song_id: song.id.clone(),
                    song_title: song.title.clone(),
                    duration_seconds: song.duration_seconds,
                })
            }
            ItemKind::Collab => {
                if self.collab_artists.len() < 2 {
                    return None;
                }
                let song = self.collab_songs.selected_song()?;
                Some(SetItem::Collab {
                    song_id: song.id.clone(),
                    song_title: song.title.clone(),
                    duration_seconds: song.duration_seconds,
                })
            }
            ItemKind::Break => Some(SetItem::Break {
                duration_seconds: minutes_to_seconds(self.break_minutes),
            }),
            ItemKind::Intermission => Some(SetItem::Intermission {
                duration_seconds: minutes_to_seconds(self.intermission_minutes),
            }),
            ItemKind::Talking => {
                let artist = self.talking_artist.as_ref()?;
                Some(SetItem::Talking {
                    artist_id: artist.id.clone(),
                    artist_name: artist.name.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: id.into(),
            name: name.into(),
        }
    }

    fn song(id: &str, title: &str, duration_seconds: u32) -> Song {
        Song {
            id: id.into(),
            title: title.into(),
            duration_seconds,
        }
    }

    #[test]
    fn test_incomplete_drafts_do_not_build() {
        let mut draft = ItemDraft::new();

        draft.set_kind(ItemKind::Opener);
        assert!(draft.build().is_none());

        draft.set_kind(ItemKind::Headliner);
        assert!(draft.build().is_none());

        draft.set_kind(ItemKind::Talking);
        assert!(draft.build().is_none());
    }

    #[test]
    fn test_breaks_always_build() {
        let mut draft = ItemDraft::new();

        draft.set_kind(ItemKind::Break);
        assert!(matches!(
            draft.build(),
            Some(SetItem::Break { duration_seconds: 0 })
        ));

        draft.set_kind(ItemKind::Intermission);
        draft.set_active_minutes(15);
        assert!(matches!(
            draft.build(),
            Some(SetItem::Intermission {
                duration_seconds: 900
            })
        ));
    }

    #[test]
    fn test_opener_builds_with_zero_minutes() {
        let mut draft = ItemDraft::new();
        draft.set_kind(ItemKind::Opener);
        draft.set_opener_artist(Some(artist("7", "DJ Flux")));

        let item = draft.build().unwrap();
        assert_eq!(item.duration_seconds(), 0);
        assert_eq!(item.display_name(), "DJ Flux");
    }

    #[test]
    fn test_headliner_requires_song_selection() {
        let mut draft = ItemDraft::new();
        draft.set_kind(ItemKind::Headliner);

        let generation = draft
            .select_headliner_artist(Some(artist("3", "Nova")))
            .unwrap();
        assert!(draft.build().is_none());

        draft.apply_headliner_songs(generation, vec![song("41", "Midnight", 212)]);
        assert!(draft.build().is_none());

        draft.select_headliner_song("41");
        let item = draft.build().unwrap();
        assert_eq!(item.song_label(), "Midnight");
        assert_eq!(item.duration_seconds(), 212);
    }

    #[test]
    fn test_collab_requires_two_artists() {
        let mut draft = ItemDraft::new();
        draft.set_kind(ItemKind::Collab);

        let (generation, ids) = draft.toggle_collab_artist(artist("1", "Nova")).unwrap();
        assert_eq!(ids, vec!["1".to_string()]);
        draft.apply_collab_songs(generation, vec![song("9", "Duet", 300)]);
        draft.select_collab_song("9");

        // One artist and a chosen song is still not a collaboration
        assert!(draft.build().is_none());

        let (generation, ids) = draft.toggle_collab_artist(artist("2", "Flux")).unwrap();
        assert_eq!(ids.len(), 2);
        draft.apply_collab_songs(generation, vec![song("9", "Duet", 300)]);
        draft.select_collab_song("9");
        assert!(draft.build().is_some());
    }

    #[test]
    fn test_collab_roster_change_invalidates_selection() {
        let mut draft = ItemDraft::new();
        draft.set_kind(ItemKind::Collab);

        let (g1, _) = draft.toggle_collab_artist(artist("1", "Nova")).unwrap();
        draft.toggle_collab_artist(artist("2", "Flux"));
        draft.toggle_collab_artist(artist("3", "Echo"));

        // The first lookup is stale after two more roster changes
        assert!(!draft.apply_collab_songs(g1, vec![song("9", "Duet", 300)]));
        assert!(draft.collab_songs().songs().is_empty());
    }

    #[test]
    fn test_removing_last_collab_artist_resets_chooser() {
        let mut draft = ItemDraft::new();
        let (generation, _) = draft.toggle_collab_artist(artist("1", "Nova")).unwrap();
        draft.apply_collab_songs(generation, vec![song("9", "Duet", 300)]);

        assert!(draft.toggle_collab_artist(artist("1", "Nova")).is_none());
        assert!(draft.collab_artists().is_empty());
        assert!(!draft.collab_songs().is_enabled());
    }

    #[test]
    fn test_kind_switch_preserves_other_kinds() {
        let mut draft = ItemDraft::new();

        draft.set_kind(ItemKind::Opener);
        draft.set_opener_artist(Some(artist("7", "DJ Flux")));
        draft.set_active_minutes(20);

        draft.set_kind(ItemKind::Break);
        draft.set_active_minutes(5);

        draft.set_kind(ItemKind::Opener);
        assert_eq!(draft.opener_minutes(), 20);
        let item = draft.build().unwrap();
        assert_eq!(item.duration_seconds(), 1200);

        draft.set_kind(ItemKind::Break);
        assert_eq!(draft.break_minutes(), 5);
    }

    #[test]
    fn test_minutes_clamped() {
        let mut draft = ItemDraft::new();
        draft.set_kind(ItemKind::Break);
        draft.set_active_minutes(1_000_000);
        assert_eq!(draft.break_minutes(), MAX_MINUTES);

        draft.step_active_minutes(-20_000);
        assert_eq!(draft.break_minutes(), 0);
    }
}
