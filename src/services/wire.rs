//! Wire representations of shows and items
//!
//! The save payload reduces every row to the same flat record regardless of
//! kind; decoding a stored show re-validates per-kind field presence so an
//! invalid row can never enter the model.

use serde::{Deserialize, Serialize};

use crate::model::{ItemKind, SetItem, Show, Vibe};

/// One row as sent in the save payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireItem {
    pub kind: String,
    pub artist_id: Option<String>,
    pub song_id: Option<String>,
    pub duration_seconds: u32,
    pub display_name: String,
}

impl From<&SetItem> for WireItem {
    fn from(item: &SetItem) -> Self {
        WireItem {
            kind: item.kind().as_wire().to_string(),
            artist_id: item.artist_id().map(str::to_string),
            song_id: item.song_id().map(str::to_string),
            duration_seconds: item.duration_seconds(),
            display_name: item.display_name().to_string(),
        }
    }
}

/// The save request body
#[derive(Debug, Clone, Serialize)]
pub struct WireShow {
    pub slug: Option<String>,
    pub label: String,
    pub vibe: String,
    pub items: Vec<WireItem>,
}

impl WireShow {
    pub fn from_show(show: &Show) -> Self {
        WireShow {
            slug: show.slug().map(str::to_string),
            label: show.label().trim().to_string(),
            vibe: show.vibe().as_wire().to_string(),
            items: show.items().iter().map(WireItem::from).collect(),
        }
    }
}

/// Response body of a successful save
#[derive(Debug, Clone, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub slug: Option<String>,
}

/// One row of a stored show as returned by the show endpoint
///
/// `song_title` travels alongside the flat wire fields so a headliner or
/// collab row can be re-edited without a second catalog lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredItem {
    pub kind: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub song_id: Option<String>,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub song_title: Option<String>,
}

/// A stored show as returned by the show endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StoredShow {
    pub slug: Option<String>,
    pub label: String,
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

impl TryFrom<StoredItem> for SetItem {
    type Error = String;

    fn try_from(row: StoredItem) -> Result<Self, Self::Error> {
        let kind = ItemKind::from_wire(&row.kind)
            .ok_or_else(|| format!("unknown item kind {:?}", row.kind))?;

        let artist = |row: &StoredItem| -> Result<(String, String), String> {
            let id = row
                .artist_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| format!("{} row is missing its artist", row.kind))?;
            Ok((id, row.display_name.clone()))
        };
        let song = |row: &StoredItem| -> Result<(String, String), String> {
            let id = row
                .song_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| format!("{} row is missing its song", row.kind))?;
            let title = row
                .song_title
                .clone()
                .unwrap_or_else(|| "Untitled".to_string());
            Ok((id, title))
        };

        match kind {
            ItemKind::Opener => {
                let (artist_id, artist_name) = artist(&row)?;
                Ok(SetItem::Opener {
                    artist_id,
                    artist_name,
                    duration_seconds: row.duration_seconds,
                })
            }
            ItemKind::Headliner => {
                let (artist_id, artist_name) = artist(&row)?;
                let (song_id, song_title) = song(&row)?;
                Ok(SetItem::Headliner {
                    artist_id,
                    artist_name,
                    song_id,
                    song_title,
                    duration_seconds: row.duration_seconds,
                })
            }
            ItemKind::Collab => {
                let (song_id, song_title) = song(&row)?;
                Ok(SetItem::Collab {
                    song_id,
                    song_title,
                    duration_seconds: row.duration_seconds,
                })
            }
            ItemKind::Break => Ok(SetItem::Break {
                duration_seconds: row.duration_seconds,
            }),
            ItemKind::Intermission => Ok(SetItem::Intermission {
                duration_seconds: row.duration_seconds,
            }),
            ItemKind::Talking => {
                let (artist_id, artist_name) = artist(&row)?;
                Ok(SetItem::Talking {
                    artist_id,
                    artist_name,
                })
            }
        }
    }
}

/// Rebuild a show from its stored form
///
/// Rows that fail per-kind validation are skipped with a warning; the show
/// starts clean.
pub fn show_from_stored(stored: StoredShow) -> Show {
    let mut items = Vec::with_capacity(stored.items.len());
    for (index, row) in stored.items.into_iter().enumerate() {
        match SetItem::try_from(row) {
            Ok(item) => items.push(item),
            Err(e) => log::warn!("Skipping stored row {}: {}", index, e),
        }
    }
    Show::from_parts(
        stored.slug,
        stored.label,
        Vibe::from_wire(&stored.vibe),
        items,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_row(kind: &str) -> StoredItem {
        StoredItem {
            kind: kind.to_string(),
            artist_id: None,
            song_id: None,
            duration_seconds: 0,
            display_name: String::new(),
            song_title: None,
        }
    }

    #[test]
    fn test_wire_item_shape() {
        let item = SetItem::Headliner {
            artist_id: "7".into(),
            artist_name: "Nova Reign".into(),
            song_id: "41".into(),
            song_title: "Afterglow".into(),
            duration_seconds: 212,
        };
        let wire = WireItem::from(&item);
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "HEADLINER",
                "artist_id": "7",
                "song_id": "41",
                "duration_seconds": 212,
                "display_name": "Nova Reign",
            })
        );
    }

    #[test]
    fn test_wire_show_trims_label_and_preserves_order() {
        let mut show = Show::new();
        show.set_label("  Launch Night  ".into());
        show.append(SetItem::Break {
            duration_seconds: 300,
        });
        show.append(SetItem::Talking {
            artist_id: "3".into(),
            artist_name: "MC Host".into(),
        });

        let wire = WireShow::from_show(&show);
        assert_eq!(wire.label, "Launch Night");
        assert_eq!(wire.slug, None);
        assert_eq!(wire.vibe, "mixed");
        assert_eq!(wire.items[0].kind, "BREAK");
        assert_eq!(wire.items[0].artist_id, None);
        assert_eq!(wire.items[1].kind, "TALKING");
        assert_eq!(wire.items[1].duration_seconds, 0);
        assert_eq!(wire.items[1].display_name, "MC Host");
    }

    #[test]
    fn test_second_save_carries_adopted_slug() {
        let mut show = Show::new();
        show.set_label("Launch Night".into());
        show.append(SetItem::Break {
            duration_seconds: 300,
        });

        let first = WireShow::from_show(&show);
        assert_eq!(first.slug, None);

        // The server assigns a slug on the first save
        show.mark_saved(Some("launch-night-1".into()));

        let second = WireShow::from_show(&show);
        assert_eq!(second.slug.as_deref(), Some("launch-night-1"));
        assert_eq!(second.items, first.items);
    }

    #[test]
    fn test_stored_break_round_trips() {
        let row = StoredItem {
            duration_seconds: 300,
            ..stored_row("BREAK")
        };
        let item = SetItem::try_from(row).unwrap();
        assert_eq!(
            item,
            SetItem::Break {
                duration_seconds: 300
            }
        );
    }

    #[test]
    fn test_stored_headliner_requires_artist_and_song() {
        assert!(SetItem::try_from(stored_row("HEADLINER")).is_err());

        let missing_song = StoredItem {
            artist_id: Some("7".into()),
            display_name: "Nova Reign".into(),
            ..stored_row("HEADLINER")
        };
        assert!(SetItem::try_from(missing_song).is_err());

        let complete = StoredItem {
            artist_id: Some("7".into()),
            song_id: Some("41".into()),
            song_title: Some("Afterglow".into()),
            display_name: "Nova Reign".into(),
            duration_seconds: 212,
            ..stored_row("HEADLINER")
        };
        let item = SetItem::try_from(complete).unwrap();
        assert_eq!(item.song_label(), "Afterglow");
    }

    #[test]
    fn test_stored_unknown_kind_rejected() {
        assert!(SetItem::try_from(stored_row("ENCORE")).is_err());
    }

    #[test]
    fn test_empty_string_reference_treated_as_absent() {
        let row = StoredItem {
            artist_id: Some(String::new()),
            ..stored_row("TALKING")
        };
        assert!(SetItem::try_from(row).is_err());
    }

    #[test]
    fn test_show_from_stored_skips_invalid_rows() {
        let stored = StoredShow {
            slug: Some("launch-night".into()),
            label: "Launch Night".into(),
            vibe: "hype".into(),
            items: vec![
                StoredItem {
                    duration_seconds: 300,
                    ..stored_row("BREAK")
                },
                stored_row("HEADLINER"), // invalid: no artist or song
                StoredItem {
                    artist_id: Some("3".into()),
                    display_name: "MC Host".into(),
                    ..stored_row("TALKING")
                },
            ],
        };
        let show = show_from_stored(stored);
        assert_eq!(show.len(), 2);
        assert_eq!(show.slug(), Some("launch-night"));
        assert_eq!(show.vibe(), Vibe::Hype);
        assert!(!show.is_dirty());
    }

    #[test]
    fn test_save_response_tolerates_extra_fields() {
        let json = r#"{"ok":true,"slug":"launch-night-1","total_seconds":300,"total_label":"5:00"}"#;
        let response: SaveResponse = serde_json::from_str(json).unwrap();
        assert!(response.ok);
        assert_eq!(response.slug.as_deref(), Some("launch-night-1"));
    }
}
