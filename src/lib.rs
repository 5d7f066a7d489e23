//! # Memos Core
//!
//! Client-side logic for the Memos project dashboard.
//!
//! This crate provides the kanban board model, the drag and drop
//! interaction state machine with its screen reader announcements, and the
//! helpers that read the identity provider's login flow, without any
//! dependency on a specific UI toolkit or HTTP client.

pub mod config;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod flight;
pub mod identity;

// Re-export commonly used types
pub use config::Config;
pub use dnd::{DragController, Key, LiveRegion};
pub use domain::{
    board::{Board, BoardConfig, OverId},
    card::{Card, CardId, CardPatch},
    column::{Column, ColumnColor, ColumnId},
};
pub use error::{MemosError, Result};
pub use identity::{find_node, LoginFlow, SocialLogin};
