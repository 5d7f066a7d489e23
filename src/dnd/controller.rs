//! Drag interaction state machine.
//!
//! The controller does not own the board. Each handler borrows it for the
//! duration of one UI event and commits any move synchronously, so the board
//! always reflects the live position of the dragged card.

use crate::config::DndConfig;
use crate::dnd::input::{DropDirection, Key};
use crate::dnd::monitor::{DndEvent, DndMonitor, MonitorHandle, MonitorRegistry};
use crate::domain::{Board, Card, CardId, CardPosition, ColumnId, OverId};
use crate::error::{MemosError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Where a card dropped directly on a column (not on a card) lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDropPlacement {
    #[default]
    Start,
    End,
}

impl FromStr for ColumnDropPlacement {
    type Err = MemosError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(MemosError::ConfigError(format!(
                "invalid column drop placement '{}', expected start or end",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        active: CardId,
        origin_column: ColumnId,
        origin_index: usize,
        source: DragSource,
    },
}

/// Tentative landing spot computed while hovering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub column_id: ColumnId,
    pub index: usize,
    pub over: OverId,
}

/// Whether a key press was consumed; `Handled` means the UI should
/// suppress the key's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    target: Option<DropTarget>,
    column_drop: ColumnDropPlacement,
    monitors: MonitorRegistry,
}

impl DragController {
    pub fn new(column_drop: ColumnDropPlacement) -> Self {
        Self {
            state: DragState::Idle,
            target: None,
            column_drop,
            monitors: MonitorRegistry::new(),
        }
    }

    pub fn from_config(config: &DndConfig) -> Self {
        Self::new(config.column_drop)
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_card(&self) -> Option<&CardId> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    pub fn register_monitor(&mut self, monitor: impl DndMonitor + 'static) -> MonitorHandle {
        self.monitors.register(monitor)
    }

    pub fn unregister_monitor(&mut self, handle: MonitorHandle) -> bool {
        self.monitors.unregister(handle)
    }

    /// Starts a pointer drag and returns the transfer payload for the card.
    ///
    /// Returns `Ok(None)` when a drag is already running or the card is not
    /// on the board.
    pub fn pointer_drag_start(&mut self, board: &Board, card_id: &CardId) -> Result<Option<String>> {
        if self.is_dragging() {
            debug!("pointer drag of {} ignored: drag already running", card_id);
            return Ok(None);
        }
        let Some(card) = board.card(card_id) else {
            debug!("pointer drag ignored: card {} not found", card_id);
            return Ok(None);
        };
        let payload = card.to_transfer_data()?;
        if self.begin(board, card_id, DragSource::Pointer) {
            Ok(Some(payload))
        } else {
            Ok(None)
        }
    }

    /// Reports the pointer moving; only announced when the announcements
    /// provide a move message.
    pub fn drag_move(&mut self, over: Option<OverId>) {
        if let Some(active) = self.active_card().cloned() {
            self.emit(DndEvent::DragMove { active, over });
        }
    }

    /// Hovering over a card in `column_id`
    pub fn drag_over_card(
        &mut self,
        board: &Board,
        column_id: &ColumnId,
        over_card: &CardId,
        direction: DropDirection,
    ) -> Option<&DropTarget> {
        let active = self.active_card()?.clone();
        self.target = resolve_card_drop(board, column_id, over_card, direction, &active).map(|index| {
            DropTarget {
                column_id: column_id.clone(),
                index,
                over: OverId::Card(over_card.clone()),
            }
        });
        let over = self.target.as_ref().map(|target| target.over.clone());
        self.emit(DndEvent::DragOver { active, over });
        self.target.as_ref()
    }

    /// Hovering over a column outside any card
    pub fn drag_over_column(&mut self, board: &Board, column_id: &ColumnId) -> Option<&DropTarget> {
        let active = self.active_card()?.clone();
        self.target = resolve_column_drop(board, column_id, self.column_drop, &active).map(|index| {
            DropTarget {
                column_id: column_id.clone(),
                index,
                over: OverId::Column(column_id.clone()),
            }
        });
        let over = self.target.as_ref().map(|target| target.over.clone());
        self.emit(DndEvent::DragOver { active, over });
        self.target.as_ref()
    }

    /// The pointer left every drop area
    pub fn drag_leave(&mut self) {
        if let Some(active) = self.active_card().cloned() {
            self.target = None;
            self.emit(DndEvent::DragOver { active, over: None });
        }
    }

    /// Drops the card carried by `payload` next to `over_card`.
    ///
    /// The index is recomputed from the hovered card's current position,
    /// since the column may have changed during the drag. Returns whether
    /// the board changed.
    pub fn drop_on_card(
        &mut self,
        board: &mut Board,
        payload: &str,
        column_id: &ColumnId,
        over_card: &CardId,
        direction: DropDirection,
    ) -> Result<bool> {
        let card = Card::from_transfer_data(payload)?;
        self.cancel_other_drag(board, &card.id);
        let index = resolve_card_drop(board, column_id, over_card, direction, &card.id);
        let over = OverId::Card(over_card.clone());
        Ok(self.finish_drop(board, card, column_id, index, over))
    }

    /// Drops the card carried by `payload` on a column's empty area
    pub fn drop_on_column(&mut self, board: &mut Board, payload: &str, column_id: &ColumnId) -> Result<bool> {
        let card = Card::from_transfer_data(payload)?;
        self.cancel_other_drag(board, &card.id);
        let index = resolve_column_drop(board, column_id, self.column_drop, &card.id);
        let over = OverId::Column(column_id.clone());
        Ok(self.finish_drop(board, card, column_id, index, over))
    }

    /// The pointer was released without a drop. A drag already committed
    /// by a drop is not reported twice.
    pub fn pointer_drag_end(&mut self) {
        let active = match &self.state {
            DragState::Dragging {
                active,
                source: DragSource::Pointer,
                ..
            } => active.clone(),
            _ => return,
        };
        self.reset();
        self.emit(DndEvent::DragEnd { active, over: None });
    }

    /// Focus left the card: stop dragging where the card is now, silently
    pub fn blur(&mut self) {
        if self.is_dragging() {
            debug!("drag abandoned on blur");
        }
        self.reset();
    }

    /// Keyboard handling for a focused card
    pub fn handle_key(&mut self, board: &mut Board, card_id: &CardId, key: Key) -> KeyOutcome {
        match self.active_card().cloned() {
            None if key == Key::Space => {
                if self.begin(board, card_id, DragSource::Keyboard) {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            Some(active) if &active == card_id => match key {
                Key::Space | Key::Enter => {
                    self.commit(board);
                    KeyOutcome::Handled
                }
                Key::Escape => {
                    self.cancel(board);
                    KeyOutcome::Handled
                }
                key if key.is_arrow() => {
                    self.step(board, key);
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            },
            _ => KeyOutcome::Ignored,
        }
    }

    /// Ends the drag at the card's current position
    pub fn commit(&mut self, board: &Board) {
        let Some(active) = self.active_card().cloned() else {
            return;
        };
        let over = board
            .find_card_position(&active)
            .and_then(|position| board.over_id_at(position));
        self.reset();
        self.emit(DndEvent::DragEnd { active, over });
    }

    /// Ends the drag and puts the card back exactly where it was picked up
    pub fn cancel(&mut self, board: &mut Board) {
        let DragState::Dragging {
            active,
            origin_column,
            origin_index,
            ..
        } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return;
        };
        self.target = None;

        let current = board.find_card_position(&active);
        let origin = board.column_index(&origin_column).map(|column_index| CardPosition {
            column_index,
            card_index: origin_index,
        });
        if current.is_some() && current != origin {
            if let Some(card) = board.card(&active).cloned() {
                debug!("restoring card {} to {} at {}", active, origin_column, origin_index);
                board.move_card(&origin_column, origin_index, card);
            }
        }
        self.emit(DndEvent::DragCancel { active });
    }

    /// Moves the active card one step and commits it right away
    fn step(&mut self, board: &mut Board, key: Key) {
        let Some(active) = self.active_card().cloned() else {
            return;
        };
        let Some(position) = board.find_card_position(&active) else {
            return;
        };
        let columns = board.columns();
        let last_column = columns.len().saturating_sub(1);
        let column_len = columns[position.column_index].len();

        let (column_index, card_index) = match key {
            Key::ArrowUp => (position.column_index, position.card_index.saturating_sub(1)),
            Key::ArrowDown => (
                position.column_index,
                (position.card_index + 1).min(column_len.saturating_sub(1)),
            ),
            Key::ArrowLeft => {
                let column_index = position.column_index.saturating_sub(1);
                (column_index, position.card_index.min(columns[column_index].len()))
            }
            Key::ArrowRight => {
                let column_index = (position.column_index + 1).min(last_column);
                (column_index, position.card_index.min(columns[column_index].len()))
            }
            _ => return,
        };

        let column_id = columns[column_index].id.clone();
        if let Some(card) = board.card(&active).cloned() {
            board.move_card(&column_id, card_index, card);
        }

        let over = board
            .find_card_position(&active)
            .and_then(|position| board.over_id_at(position));
        self.emit(DndEvent::DragOver { active, over });
    }

    fn begin(&mut self, board: &Board, card_id: &CardId, source: DragSource) -> bool {
        let Some(position) = board.find_card_position(card_id) else {
            debug!("drag start ignored: card {} not found", card_id);
            return false;
        };
        let origin_column = board.columns()[position.column_index].id.clone();
        debug!("picked up {} from {} at {}", card_id, origin_column, position.card_index);
        self.state = DragState::Dragging {
            active: card_id.clone(),
            origin_column,
            origin_index: position.card_index,
            source,
        };
        self.target = None;
        self.emit(DndEvent::DragStart {
            active: card_id.clone(),
        });
        true
    }

    /// A drop carrying a different card than the active one abandons the
    /// running drag: its card goes back to its origin first.
    fn cancel_other_drag(&mut self, board: &mut Board, dropped: &CardId) {
        if self.active_card().is_some_and(|active| active != dropped) {
            debug!("drop of {} cancels the running drag", dropped);
            self.cancel(board);
        }
    }

    fn finish_drop(
        &mut self,
        board: &mut Board,
        card: Card,
        column_id: &ColumnId,
        index: Option<usize>,
        over: OverId,
    ) -> bool {
        let active = card.id.clone();
        let moved = match index {
            Some(index) => {
                let before = board.find_card_position(&active);
                board.move_card(column_id, index, card)
                    && board.find_card_position(&active) != before
            }
            None => {
                debug!("drop ignored: column {} not found", column_id);
                false
            }
        };
        self.reset();
        self.emit(DndEvent::DragEnd {
            active,
            over: Some(over),
        });
        moved
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.target = None;
    }

    fn emit(&mut self, event: DndEvent) {
        self.monitors.trigger(&event);
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(ColumnDropPlacement::default())
    }
}

/// Index in `column_id` for a card dropped on `over_card`.
///
/// The dragged card is removed before insertion, so a card sitting above
/// the insertion point shifts it up by one. A hovered card that is no
/// longer in the column resolves to the end of the column.
fn resolve_card_drop(
    board: &Board,
    column_id: &ColumnId,
    over_card: &CardId,
    direction: DropDirection,
    moving: &CardId,
) -> Option<usize> {
    let column = board.column(column_id)?;
    let base = match column.position_of(over_card) {
        Some(index) => match direction {
            DropDirection::Top => index,
            DropDirection::Bottom => index + 1,
        },
        None => column.len(),
    };
    Some(match column.position_of(moving) {
        Some(current) if current < base => base - 1,
        _ => base,
    })
}

fn resolve_column_drop(
    board: &Board,
    column_id: &ColumnId,
    placement: ColumnDropPlacement,
    moving: &CardId,
) -> Option<usize> {
    let column = board.column(column_id)?;
    Some(match placement {
        ColumnDropPlacement::Start => 0,
        ColumnDropPlacement::End => {
            let len = column.len();
            if column.position_of(moving).is_some() {
                len - 1
            } else {
                len
            }
        }
    })
}
