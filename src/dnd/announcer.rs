//! Screen reader announcements for drag and drop.
//!
//! [`LiveRegion`] is a [`DndMonitor`] that turns each drag event into a
//! human-readable status message for an `aria-live` region.

use crate::config::DndConfig;
use crate::dnd::monitor::{DndEvent, DndMonitor};
use crate::domain::{CardId, OverId};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::{fmt, str::FromStr};

pub const DEFAULT_SCREEN_READER_INSTRUCTIONS: &str = "To pick up a draggable item, press the space bar.\n\
While dragging, use the arrow keys to move the item.\n\
Press space again to drop the item in its new position, or press escape to cancel.";

/// Builds the message announced for each drag event
pub trait Announcements {
    fn on_drag_start(&self, active: &CardId) -> String;

    /// `None` keeps the previous announcement
    fn on_drag_move(&self, _active: &CardId, _over: Option<&OverId>) -> Option<String> {
        None
    }

    fn on_drag_over(&self, active: &CardId, over: Option<&OverId>) -> String;

    fn on_drag_end(&self, active: &CardId, over: Option<&OverId>) -> String;

    fn on_drag_cancel(&self, active: &CardId) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAnnouncements;

impl Announcements for DefaultAnnouncements {
    fn on_drag_start(&self, active: &CardId) -> String {
        format!("Picked up draggable item {}.", active)
    }

    fn on_drag_over(&self, active: &CardId, over: Option<&OverId>) -> String {
        match over {
            Some(over) => format!(
                "Draggable item {} was moved over droppable area {}.",
                active, over
            ),
            None => format!("Draggable item {} is no longer over a droppable area.", active),
        }
    }

    fn on_drag_end(&self, active: &CardId, over: Option<&OverId>) -> String {
        match over {
            Some(over) => format!(
                "Draggable item {} was dropped over droppable area {}",
                active, over
            ),
            None => format!("Draggable item {} was dropped.", active),
        }
    }

    fn on_drag_cancel(&self, active: &CardId) -> String {
        format!("Dragging was cancelled. Draggable item {} was dropped.", active)
    }
}

/// Politeness of the live region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaLive {
    #[default]
    Assertive,
    Polite,
    Off,
}

impl AriaLive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assertive => "assertive",
            Self::Polite => "polite",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for AriaLive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AriaLive {
    type Err = crate::error::MemosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assertive" => Ok(Self::Assertive),
            "polite" => Ok(Self::Polite),
            "off" => Ok(Self::Off),
            _ => Err(crate::error::MemosError::ConfigError(format!(
                "invalid aria-live value '{}', expected assertive, polite or off",
                s
            ))),
        }
    }
}

struct LiveRegionState {
    announcement: String,
    announcements: Box<dyn Announcements>,
    aria_live: AriaLive,
    instructions: String,
}

/// Shared handle to a live region.
///
/// Clones share the same state: register one clone with the drag
/// controller and keep another to render the current message.
#[derive(Clone)]
pub struct LiveRegion {
    state: Rc<RefCell<LiveRegionState>>,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::with_announcements(DefaultAnnouncements)
    }

    pub fn with_announcements(announcements: impl Announcements + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(LiveRegionState {
                announcement: String::new(),
                announcements: Box::new(announcements),
                aria_live: AriaLive::default(),
                instructions: DEFAULT_SCREEN_READER_INSTRUCTIONS.to_string(),
            })),
        }
    }

    pub fn from_config(config: &DndConfig) -> Self {
        let region = Self::new();
        {
            let mut state = region.state.borrow_mut();
            state.aria_live = config.aria_live;
            state.instructions = config.screen_reader_instructions.clone();
        }
        region
    }

    /// The current status message
    pub fn announcement(&self) -> String {
        self.state.borrow().announcement.clone()
    }

    pub fn aria_live(&self) -> AriaLive {
        self.state.borrow().aria_live
    }

    /// Hidden instructions the draggable cards are described by
    pub fn instructions(&self) -> String {
        self.state.borrow().instructions.clone()
    }

    /// Replaces the message, or keeps the previous one when `message` is `None`
    pub fn announce(&self, message: Option<String>) {
        if let Some(message) = message {
            self.state.borrow_mut().announcement = message;
        }
    }
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LiveRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LiveRegion")
            .field("announcement", &state.announcement)
            .field("aria_live", &state.aria_live)
            .finish()
    }
}

impl DndMonitor for LiveRegion {
    fn handle(&mut self, event: &DndEvent) {
        let message = {
            let state = self.state.borrow();
            let announcements = &state.announcements;
            match event {
                DndEvent::DragStart { active } => Some(announcements.on_drag_start(active)),
                DndEvent::DragMove { active, over } => {
                    announcements.on_drag_move(active, over.as_ref())
                }
                DndEvent::DragOver { active, over } => {
                    Some(announcements.on_drag_over(active, over.as_ref()))
                }
                DndEvent::DragEnd { active, over } => {
                    Some(announcements.on_drag_end(active, over.as_ref()))
                }
                DndEvent::DragCancel { active } => Some(announcements.on_drag_cancel(active)),
            }
        };
        self.announce(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnId;

    #[test]
    fn test_default_messages() {
        let a = DefaultAnnouncements;
        let card = CardId::from("4");
        let over = OverId::Column(ColumnId::from("todo"));

        assert_eq!(a.on_drag_start(&card), "Picked up draggable item 4.");
        assert_eq!(
            a.on_drag_over(&card, Some(&over)),
            "Draggable item 4 was moved over droppable area todo."
        );
        assert_eq!(
            a.on_drag_over(&card, None),
            "Draggable item 4 is no longer over a droppable area."
        );
        assert_eq!(
            a.on_drag_end(&card, Some(&over)),
            "Draggable item 4 was dropped over droppable area todo"
        );
        assert_eq!(a.on_drag_end(&card, None), "Draggable item 4 was dropped.");
        assert_eq!(
            a.on_drag_cancel(&card),
            "Dragging was cancelled. Draggable item 4 was dropped."
        );
        assert!(a.on_drag_move(&card, None).is_none());
    }

    #[test]
    fn test_live_region_clones_share_state() {
        let region = LiveRegion::new();
        let mut monitor = region.clone();

        monitor.handle(&DndEvent::DragStart { active: CardId::from("1") });

        assert_eq!(region.announcement(), "Picked up draggable item 1.");
    }

    #[test]
    fn test_move_without_message_keeps_announcement() {
        let region = LiveRegion::new();
        let mut monitor = region.clone();

        monitor.handle(&DndEvent::DragStart { active: CardId::from("1") });
        monitor.handle(&DndEvent::DragMove {
            active: CardId::from("1"),
            over: None,
        });

        assert_eq!(region.announcement(), "Picked up draggable item 1.");
    }

    struct Terse;

    impl Announcements for Terse {
        fn on_drag_start(&self, active: &CardId) -> String {
            format!("lifted {}", active)
        }

        fn on_drag_move(&self, active: &CardId, _over: Option<&OverId>) -> Option<String> {
            Some(format!("moving {}", active))
        }

        fn on_drag_over(&self, active: &CardId, _over: Option<&OverId>) -> String {
            format!("over {}", active)
        }

        fn on_drag_end(&self, active: &CardId, _over: Option<&OverId>) -> String {
            format!("dropped {}", active)
        }

        fn on_drag_cancel(&self, active: &CardId) -> String {
            format!("cancelled {}", active)
        }
    }

    #[test]
    fn test_custom_announcements() {
        let region = LiveRegion::with_announcements(Terse);
        let mut monitor = region.clone();

        monitor.handle(&DndEvent::DragMove {
            active: CardId::from("9"),
            over: None,
        });
        assert_eq!(region.announcement(), "moving 9");

        monitor.handle(&DndEvent::DragCancel { active: CardId::from("9") });
        assert_eq!(region.announcement(), "cancelled 9");
    }

    #[test]
    fn test_from_config() {
        let config = DndConfig {
            aria_live: AriaLive::Polite,
            screen_reader_instructions: "Use space".to_string(),
            ..DndConfig::default()
        };

        let region = LiveRegion::from_config(&config);
        assert_eq!(region.aria_live(), AriaLive::Polite);
        assert_eq!(region.instructions(), "Use space");
        assert!(region.announcement().is_empty());
    }

    #[test]
    fn test_aria_live_parsing() {
        assert_eq!(AriaLive::from_str("polite").unwrap(), AriaLive::Polite);
        assert!(AriaLive::from_str("loud").is_err());
        assert_eq!(AriaLive::default().to_string(), "assertive");
    }
}
