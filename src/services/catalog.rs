//! Catalog lookup client
//!
//! The catalog service returns the songs belonging to one artist; there is
//! no batch endpoint, so multi-artist lookups issue one request per artist.

use serde::Deserialize;

use crate::model::format_duration;

use super::USER_AGENT;

/// An artist the roster offers for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// One song in an artist's catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub duration_seconds: u32,
}

impl Song {
    /// Label shown in the song chooser, e.g. `Afterglow (3:32)`
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.title, format_duration(self.duration_seconds))
    }
}

/// The artists available to the modal's selectors, split by default role
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub headliners: Vec<Artist>,
    pub openers: Vec<Artist>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("catalog endpoint returned status {0}")]
    Status(u16),
    #[error("malformed catalog response: {0}")]
    Parse(String),
}

// The backend serves numeric ids; the editor treats them as opaque strings
// end to end (they round-trip through the save payload unchanged).
#[derive(Debug, Deserialize)]
struct ApiSong {
    id: u64,
    title: String,
    dur: u32,
}

#[derive(Debug, Deserialize)]
struct ApiSongList {
    songs: Vec<ApiSong>,
}

#[derive(Debug, Deserialize)]
struct ApiArtist {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiRoster {
    #[serde(default)]
    headliners: Vec<ApiArtist>,
    #[serde(default)]
    openers: Vec<ApiArtist>,
}

impl From<ApiSong> for Song {
    fn from(s: ApiSong) -> Self {
        Song {
            id: s.id.to_string(),
            title: s.title,
            duration_seconds: s.dur,
        }
    }
}

impl From<ApiArtist> for Artist {
    fn from(a: ApiArtist) -> Self {
        Artist {
            id: a.id.to_string(),
            name: a.name,
        }
    }
}

/// HTTP client for the catalog endpoints
#[derive(Clone)]
pub struct HttpCatalog {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the songs for one artist, in catalog order
    pub async fn songs_by_artist(&self, artist_id: &str) -> Result<Vec<Song>, CatalogError> {
        let url = format!(
            "{}/control/setbuilder/api/songs/by-artist/{}/",
            self.base_url, artist_id
        );
        log::debug!("Fetching songs for artist {} from {}", artist_id, url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let list: ApiSongList = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(list.songs.into_iter().map(Song::from).collect())
    }

    /// Fetch the artist roster the modal's selectors are populated from
    pub async fn roster(&self) -> Result<Roster, CatalogError> {
        let url = format!("{}/control/setbuilder/api/artists/", self.base_url);
        log::debug!("Fetching artist roster from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let roster: ApiRoster = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(Roster {
            headliners: roster.headliners.into_iter().map(Artist::from).collect(),
            openers: roster.openers.into_iter().map(Artist::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_option_label() {
        let song = Song {
            id: "41".into(),
            title: "Afterglow".into(),
            duration_seconds: 212,
        };
        assert_eq!(song.option_label(), "Afterglow (3:32)");
    }

    #[test]
    fn test_api_song_list_decoding() {
        let json = r#"{"songs":[{"id":41,"title":"Afterglow","dur":212,"label":"3:32"}]}"#;
        let list: ApiSongList = serde_json::from_str(json).unwrap();
        let songs: Vec<Song> = list.songs.into_iter().map(Song::from).collect();
        assert_eq!(
            songs,
            vec![Song {
                id: "41".into(),
                title: "Afterglow".into(),
                duration_seconds: 212,
            }]
        );
    }

    #[test]
    fn test_api_roster_decoding_with_missing_sections() {
        let json = r#"{"headliners":[{"id":1,"name":"Nova Reign"}]}"#;
        let roster: ApiRoster = serde_json::from_str(json).unwrap();
        assert_eq!(roster.headliners.len(), 1);
        assert!(roster.openers.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let catalog = HttpCatalog::new("http://localhost:8000/").unwrap();
        assert_eq!(catalog.base_url, "http://localhost:8000");
    }
}
