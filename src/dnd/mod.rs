//! Drag and drop for the board: a pointer/keyboard state machine, an
//! observer registry for its lifecycle events, and a live-region announcer
//! for assistive technology.

pub mod announcer;
pub mod controller;
pub mod input;
pub mod monitor;

pub use announcer::{
    Announcements, AriaLive, DefaultAnnouncements, LiveRegion, DEFAULT_SCREEN_READER_INSTRUCTIONS,
};
pub use controller::{
    ColumnDropPlacement, DragController, DragSource, DragState, DropTarget, KeyOutcome,
};
pub use input::{DropDirection, Key, PointerRect};
pub use monitor::{DndEvent, DndMonitor, MonitorHandle, MonitorRegistry};
