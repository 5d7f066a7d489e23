use crate::domain::card::{Card, CardId};
use crate::error::MemosError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{fmt, str::FromStr};
use tracing::warn;
use uuid::Uuid;

/// Unique identifier for a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display color tag of a column header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnColor {
    #[default]
    Primary,
    Gray,
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Indigo,
    Violet,
    Purple,
    Pink,
}

impl ColumnColor {
    pub const ALL: [ColumnColor; 11] = [
        Self::Primary,
        Self::Gray,
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Indigo,
        Self::Violet,
        Self::Purple,
        Self::Pink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

impl fmt::Display for ColumnColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnColor {
    type Err = crate::error::MemosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
            .ok_or_else(|| crate::error::MemosError::InvalidColumnColor(s.to_string()))
    }
}

/// An ordered, titled group of cards.
///
/// The card list is only reachable read-only from outside the crate; the
/// [`Board`](crate::domain::Board) owns every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColumnRecord")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: ColumnColor,
    pub(crate) items: Vec<Card>,
}

/// Wire form of a column, checked for repeated card ids before it becomes a [`Column`]
#[derive(Deserialize)]
struct ColumnRecord {
    id: ColumnId,
    title: String,
    color: ColumnColor,
    #[serde(default)]
    items: Vec<Card>,
}

impl TryFrom<ColumnRecord> for Column {
    type Error = MemosError;

    fn try_from(record: ColumnRecord) -> Result<Self, Self::Error> {
        if let Some(id) = first_duplicate(record.items.iter().map(|card| &card.id)) {
            return Err(MemosError::DuplicateCard(id.to_string()));
        }
        Ok(Self {
            id: record.id,
            title: record.title,
            color: record.color,
            items: record.items,
        })
    }
}

/// First id yielded twice, in iteration order
pub(crate) fn first_duplicate<'a>(ids: impl IntoIterator<Item = &'a CardId>) -> Option<&'a CardId> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

impl Column {
    pub fn new(title: impl Into<String>, color: ColumnColor) -> Self {
        Self::with_id(ColumnId::generate(), title, color)
    }

    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>, color: ColumnColor) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color,
            items: Vec::new(),
        }
    }

    /// Seeds the column with cards, used when building fixtures and demo boards.
    /// A repeated card id keeps its first occurrence.
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        let mut seen = HashSet::new();
        self.items = cards
            .into_iter()
            .filter(|card| {
                let fresh = seen.insert(card.id.clone());
                if !fresh {
                    warn!("Dropping repeated card {} in column {}", card.id, self.id);
                }
                fresh
            })
            .collect();
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.items.iter().position(|card| &card.id == card_id)
    }

    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.items.iter().map(|card| &card.id)
    }
}
