use crate::domain::card::{Card, CardId, CardPatch};
use crate::domain::column::{first_duplicate, Column, ColumnColor, ColumnId};
use crate::error::MemosError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Title and color of a column created when a board is seeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSeed {
    pub title: String,
    pub color: ColumnColor,
}

impl ColumnSeed {
    pub fn new(title: impl Into<String>, color: ColumnColor) -> Self {
        Self {
            title: title.into(),
            color,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnSeed>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Default Board".to_string(),
            columns: vec![
                ColumnSeed::new("Backlog", ColumnColor::Gray),
                ColumnSeed::new("To Do", ColumnColor::Blue),
                ColumnSeed::new("In Progress", ColumnColor::Yellow),
                ColumnSeed::new("Review", ColumnColor::Purple),
                ColumnSeed::new("Done", ColumnColor::Green),
            ],
        }
    }
}

/// Location of a card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPosition {
    pub column_index: usize,
    pub card_index: usize,
}

/// The element a drag is currently over: a card, or a column when the
/// position is at the end of that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverId {
    Card(CardId),
    Column(ColumnId),
}

impl fmt::Display for OverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(id) => write!(f, "{}", id),
            Self::Column(id) => write!(f, "{}", id),
        }
    }
}

/// Kanban board state.
///
/// Operations that name a column or card which is not on the board are
/// no-ops: they log at debug level and report `false`/`None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    pub name: String,
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct BoardRecord {
    name: String,
    #[serde(default)]
    columns: Vec<Column>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = MemosError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let ids = record.columns.iter().flat_map(|column| column.card_ids());
        if let Some(id) = first_duplicate(ids) {
            return Err(MemosError::DuplicateCard(id.to_string()));
        }
        Ok(Self {
            name: record.name,
            columns: record.columns,
        })
    }
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let columns = config
            .columns
            .into_iter()
            .map(|seed| Column::new(seed.title, seed.color))
            .collect();
        Self {
            name: config.name,
            columns,
        }
    }

    /// Builds a board from already populated columns. A card id seen in an
    /// earlier column is dropped from later ones, so every card keeps
    /// exactly one place.
    pub fn with_columns(name: impl Into<String>, mut columns: Vec<Column>) -> Self {
        let mut seen = HashSet::new();
        for column in &mut columns {
            let column_id = &column.id;
            column.items.retain(|card| {
                let fresh = seen.insert(card.id.clone());
                if !fresh {
                    warn!("Dropping repeated card {} from column {}", card.id, column_id);
                }
                fresh
            });
        }
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|col| col.items.iter())
            .find(|card| &card.id == id)
    }

    /// Finds the column and index currently holding a card
    pub fn find_card_position(&self, id: &CardId) -> Option<CardPosition> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column_index, column)| {
                column.position_of(id).map(|card_index| CardPosition {
                    column_index,
                    card_index,
                })
            })
    }

    /// The id announced for a position: the next card in the column, or the
    /// column itself when the position is the last one.
    pub fn over_id_at(&self, position: CardPosition) -> Option<OverId> {
        let column = self.columns.get(position.column_index)?;
        match column.items.get(position.card_index + 1) {
            Some(next) => Some(OverId::Card(next.id.clone())),
            None => Some(OverId::Column(column.id.clone())),
        }
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Moves `card` to `index` in the target column.
    ///
    /// Every copy of the card's id is removed from the board first, so the
    /// card ends up in exactly one place. The index is clamped to the
    /// target column's length after removal. A card that is not yet on the
    /// board is inserted. Returns `false` without touching the board when
    /// the target column does not exist.
    pub fn move_card(&mut self, target: &ColumnId, index: usize, card: Card) -> bool {
        let Some(target_index) = self.column_index(target) else {
            debug!("move_card ignored: column {} not found", target);
            return false;
        };

        for column in &mut self.columns {
            column.items.retain(|c| c.id != card.id);
        }

        let column = &mut self.columns[target_index];
        let index = index.min(column.items.len());
        debug!("moving card {} to column {} at {}", card.id, target, index);
        column.items.insert(index, card);
        true
    }

    /// Appends a new incomplete card with the given title
    pub fn add_card(&mut self, column_id: &ColumnId, title: impl Into<String>) -> Option<CardId> {
        let column = self.column_mut(column_id)?;
        let card = Card::new(title);
        let id = card.id.clone();
        column.items.push(card);
        Some(id)
    }

    /// Creates `card` at `index` in the column
    pub fn insert_card(&mut self, column_id: &ColumnId, index: usize, card: Card) -> Option<CardId> {
        let id = card.id.clone();
        self.move_card(column_id, index, card).then_some(id)
    }

    pub fn delete_card(&mut self, id: &CardId) -> Option<Card> {
        let Some(position) = self.find_card_position(id) else {
            debug!("delete_card ignored: card {} not found", id);
            return None;
        };
        Some(self.columns[position.column_index].items.remove(position.card_index))
    }

    pub fn toggle_complete(&mut self, id: &CardId) -> bool {
        match self.card_mut(id) {
            Some(card) => {
                card.toggle_complete();
                true
            }
            None => false,
        }
    }

    /// Merges `patch` into the card, leaving its position untouched
    pub fn update_card(&mut self, id: &CardId, patch: CardPatch) -> bool {
        match self.card_mut(id) {
            Some(card) => {
                card.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn update_card_title(&mut self, id: &CardId, title: impl Into<String>) -> bool {
        self.update_card(id, CardPatch::new().title(title))
    }

    pub fn add_comment(&mut self, id: &CardId, author: impl Into<String>, content: impl Into<String>) -> bool {
        match self.card_mut(id) {
            Some(card) => card.add_comment(author.into(), content.into()).is_some(),
            None => false,
        }
    }

    /// Appends a new column. A blank title adds nothing.
    pub fn add_column(&mut self, title: impl Into<String>) -> Option<ColumnId> {
        let title = title.into();
        if title.trim().is_empty() {
            debug!("add_column ignored: blank title");
            return None;
        }
        let column = Column::new(title, ColumnColor::Primary);
        let id = column.id.clone();
        info!("Adding column {} ({})", column.title, id);
        self.columns.push(column);
        Some(id)
    }

    /// Removes a column together with all of its cards
    pub fn delete_column(&mut self, id: &ColumnId) -> Option<Column> {
        let Some(index) = self.column_index(id) else {
            debug!("delete_column ignored: column {} not found", id);
            return None;
        };
        let column = self.columns.remove(index);
        info!("Deleted column {} with {} cards", column.id, column.len());
        Some(column)
    }

    pub fn rename_column(&mut self, id: &ColumnId, title: impl Into<String>) -> bool {
        match self.column_mut(id) {
            Some(column) => {
                column.title = title.into();
                true
            }
            None => false,
        }
    }

    fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        let column = self.columns.iter_mut().find(|col| &col.id == id);
        if column.is_none() {
            debug!("column {} not found", id);
        }
        column
    }

    fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        let card = self
            .columns
            .iter_mut()
            .flat_map(|col| col.items.iter_mut())
            .find(|card| &card.id == id);
        if card.is_none() {
            debug!("card {} not found", id);
        }
        card
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
