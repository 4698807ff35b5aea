//! SetItem - one row in a show's ordered set list
//!
//! Items are a sum type: each kind carries exactly the fields it needs, so a
//! headliner without a song or a break with an artist cannot be represented.
//! The only fallible construction points are the Item Builder modal and wire
//! decoding of stored shows.

/// The closed set of row kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItemKind {
    #[default]
    Opener,
    Headliner,
    Collab,
    Break,
    Intermission,
    Talking,
}

/// All kinds, in the order the modal's kind selector presents them
pub const ALL_KINDS: [ItemKind; 6] = [
    ItemKind::Opener,
    ItemKind::Headliner,
    ItemKind::Collab,
    ItemKind::Break,
    ItemKind::Intermission,
    ItemKind::Talking,
];

impl ItemKind {
    /// Wire tag used in save payloads and stored rows
    pub fn as_wire(&self) -> &'static str {
        match self {
            ItemKind::Opener => "OPENER",
            ItemKind::Headliner => "HEADLINER",
            ItemKind::Collab => "COLLAB",
            ItemKind::Break => "BREAK",
            ItemKind::Intermission => "INTERMISSION",
            ItemKind::Talking => "TALKING",
        }
    }

    /// Parse a wire tag; unknown tags are rejected
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "OPENER" => Some(ItemKind::Opener),
            "HEADLINER" => Some(ItemKind::Headliner),
            "COLLAB" => Some(ItemKind::Collab),
            "BREAK" => Some(ItemKind::Break),
            "INTERMISSION" => Some(ItemKind::Intermission),
            "TALKING" => Some(ItemKind::Talking),
            _ => None,
        }
    }

    /// Human-readable label for the kind selector
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Opener => "Opener",
            ItemKind::Headliner => "Headliner",
            ItemKind::Collab => "Collaboration",
            ItemKind::Break => "Break",
            ItemKind::Intermission => "Intermission",
            ItemKind::Talking => "Talking",
        }
    }
}

/// One entry in the ordered set list
#[derive(Debug, Clone, PartialEq)]
pub enum SetItem {
    /// An opening act performing for a fixed number of minutes
    Opener {
        artist_id: String,
        artist_name: String,
        duration_seconds: u32,
    },
    /// A headliner performing one song from their catalog
    Headliner {
        artist_id: String,
        artist_name: String,
        song_id: String,
        song_title: String,
        duration_seconds: u32,
    },
    /// A collaboration song; only the song is persisted
    Collab {
        song_id: String,
        song_title: String,
        duration_seconds: u32,
    },
    Break {
        duration_seconds: u32,
    },
    Intermission {
        duration_seconds: u32,
    },
    /// A talking segment; no fixed duration
    Talking {
        artist_id: String,
        artist_name: String,
    },
}

impl SetItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            SetItem::Opener { .. } => ItemKind::Opener,
            SetItem::Headliner { .. } => ItemKind::Headliner,
            SetItem::Collab { .. } => ItemKind::Collab,
            SetItem::Break { .. } => ItemKind::Break,
            SetItem::Intermission { .. } => ItemKind::Intermission,
            SetItem::Talking { .. } => ItemKind::Talking,
        }
    }

    /// Duration contributed to the show total
    pub fn duration_seconds(&self) -> u32 {
        match self {
            SetItem::Opener {
                duration_seconds, ..
            }
            | SetItem::Headliner {
                duration_seconds, ..
            }
            | SetItem::Collab {
                duration_seconds, ..
            }
            | SetItem::Break { duration_seconds }
            | SetItem::Intermission { duration_seconds } => *duration_seconds,
            SetItem::Talking { .. } => 0,
        }
    }

    /// Label shown in the row's name column, fixed at creation time
    pub fn display_name(&self) -> &str {
        match self {
            SetItem::Opener { artist_name, .. }
            | SetItem::Headliner { artist_name, .. }
            | SetItem::Talking { artist_name, .. } => artist_name,
            SetItem::Collab { .. } => "Collaboration",
            SetItem::Break { .. } => "Break",
            SetItem::Intermission { .. } => "Intermission",
        }
    }

    /// Label shown in the row's song column
    pub fn song_label(&self) -> &str {
        match self {
            SetItem::Opener { .. } => "Opener",
            SetItem::Headliner { song_title, .. } | SetItem::Collab { song_title, .. } => {
                song_title
            }
            SetItem::Break { .. } => "Break",
            SetItem::Intermission { .. } => "Intermission",
            SetItem::Talking { .. } => "Talking",
        }
    }

    pub fn artist_id(&self) -> Option<&str> {
        match self {
            SetItem::Opener { artist_id, .. }
            | SetItem::Headliner { artist_id, .. }
            | SetItem::Talking { artist_id, .. } => Some(artist_id),
            SetItem::Collab { .. } | SetItem::Break { .. } | SetItem::Intermission { .. } => None,
        }
    }

    pub fn song_id(&self) -> Option<&str> {
        match self {
            SetItem::Headliner { song_id, .. } | SetItem::Collab { song_id, .. } => Some(song_id),
            _ => None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn headliner() -> SetItem {
        SetItem::Headliner {
            artist_id: "7".into(),
            artist_name: "Nova Reign".into(),
            song_id: "41".into(),
            song_title: "Afterglow".into(),
            duration_seconds: 212,
        }
    }

    #[test]
    fn test_kind_wire_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(ItemKind::from_wire(kind.as_wire()), Some(kind));
        }
        assert_eq!(ItemKind::from_wire("ENCORE"), None);
        assert_eq!(ItemKind::from_wire("opener"), None);
    }

    #[test]
    fn test_display_name_per_kind() {
        assert_eq!(headliner().display_name(), "Nova Reign");
        assert_eq!(
            SetItem::Break {
                duration_seconds: 300
            }
            .display_name(),
            "Break"
        );
        assert_eq!(
            SetItem::Intermission {
                duration_seconds: 0
            }
            .display_name(),
            "Intermission"
        );
        assert_eq!(
            SetItem::Collab {
                song_id: "9".into(),
                song_title: "Duet".into(),
                duration_seconds: 180,
            }
            .display_name(),
            "Collaboration"
        );
    }

    #[test]
    fn test_talking_has_zero_duration() {
        let talking = SetItem::Talking {
            artist_id: "3".into(),
            artist_name: "MC Host".into(),
        };
        assert_eq!(talking.duration_seconds(), 0);
        assert_eq!(talking.song_label(), "Talking");
        assert_eq!(talking.song_id(), None);
    }

    #[test]
    fn test_reference_accessors() {
        let item = headliner();
        assert_eq!(item.artist_id(), Some("7"));
        assert_eq!(item.song_id(), Some("41"));

        let brk = SetItem::Break {
            duration_seconds: 60,
        };
        assert_eq!(brk.artist_id(), None);
        assert_eq!(brk.song_id(), None);
    }
}
