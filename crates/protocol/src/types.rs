use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque game identifier.
///
/// The backend keys games by integer and returns `id` as a JSON number, but
/// nothing on the client does arithmetic with it. Decodes from a number or a
/// string; encodes back as a number when it is a canonical unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as an integer, if it is written as one without leading zeros.
    fn as_canonical_u64(&self) -> Option<u64> {
        let s = self.0.as_str();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if s.len() > 1 && s.starts_with('0') {
            return None;
        }
        s.parse().ok()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_canonical_u64() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => GameId::from(n),
            RawId::Text(s) => GameId(s),
        })
    }
}

/// Play-state of a library entry.
///
/// The serde form is the backend's token and is fixed regardless of the
/// display label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryStatus {
    #[default]
    #[serde(rename = "na fila")]
    Queued,
    #[serde(rename = "jogando")]
    Playing,
    #[serde(rename = "completado")]
    Completed,
    #[serde(rename = "abandonado")]
    Abandoned,
}

impl LibraryStatus {
    /// Selector order.
    pub const ALL: [LibraryStatus; 4] = [
        LibraryStatus::Queued,
        LibraryStatus::Playing,
        LibraryStatus::Completed,
        LibraryStatus::Abandoned,
    ];

    /// The token the backend stores.
    pub fn as_wire(self) -> &'static str {
        match self {
            LibraryStatus::Queued => "na fila",
            LibraryStatus::Playing => "jogando",
            LibraryStatus::Completed => "completado",
            LibraryStatus::Abandoned => "abandonado",
        }
    }

    /// Display label shown in the status selector.
    pub fn label(self) -> &'static str {
        match self {
            LibraryStatus::Queued => "Na Fila",
            LibraryStatus::Playing => "Jogando",
            LibraryStatus::Completed => "Completado",
            LibraryStatus::Abandoned => "Abandonado",
        }
    }

    fn english_name(self) -> &'static str {
        match self {
            LibraryStatus::Queued => "queued",
            LibraryStatus::Playing => "playing",
            LibraryStatus::Completed => "completed",
            LibraryStatus::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for LibraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Input did not name one of the four statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown library status: {0:?}")]
pub struct StatusParseError(pub String);

impl FromStr for LibraryStatus {
    type Err = StatusParseError;

    /// Accepts the wire token, the display label or the English name,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        LibraryStatus::ALL
            .into_iter()
            .find(|status| {
                [status.as_wire(), status.label(), status.english_name()]
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| StatusParseError(s.to_owned()))
    }
}

/// One game's membership record, as returned by `GET /api/biblioteca`.
///
/// Every entry the backend returns is in the library; membership is implied
/// by presence in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(rename = "id")]
    pub game_id: GameId,
    #[serde(rename = "nome_jogo", default)]
    pub name: String,
    pub status: LibraryStatus,
    /// Set by the backend on first add. Naive UTC, as the backend emits it.
    #[serde(rename = "data_adicao", default)]
    pub added_at: Option<NaiveDateTime>,
    #[serde(rename = "ano_lancamento", default)]
    pub release_year: Option<i32>,
    /// Comma-separated platform names, e.g. `"PC, PS4"`.
    #[serde(rename = "plataforma", default)]
    pub platforms: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One game of the public catalog, as returned by `GET /api/jogos` and
/// `GET /api/jogos/pesquisa`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGame {
    #[serde(rename = "id")]
    pub game_id: GameId,
    #[serde(rename = "nome_jogo", default)]
    pub name: String,
    #[serde(rename = "ano_lancamento", default)]
    pub release_year: Option<i32>,
    #[serde(rename = "plataforma", default)]
    pub platforms: Option<String>,
    /// Average user rating.
    #[serde(rename = "avaliacao_media", default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}
