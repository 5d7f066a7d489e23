pub mod board;
pub mod card;
pub mod column;

pub use board::{Board, BoardConfig, CardPosition, ColumnSeed, OverId};
pub use card::{Card, CardComment, CardId, CardPatch, CardPriority};
pub use column::{Column, ColumnColor, ColumnId};
