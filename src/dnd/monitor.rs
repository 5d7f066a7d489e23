//! Observer registry for drag lifecycle events.
//!
//! Monitors are registered when a UI component mounts and removed with the
//! returned [`MonitorHandle`] when it unmounts. Events are delivered to
//! every monitor in registration order. Handlers return nothing, so a
//! monitor cannot stop delivery to the ones after it.

use crate::domain::{CardId, OverId};
use std::fmt;

/// A drag lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DndEvent {
    DragStart { active: CardId },
    DragMove { active: CardId, over: Option<OverId> },
    DragOver { active: CardId, over: Option<OverId> },
    DragEnd { active: CardId, over: Option<OverId> },
    DragCancel { active: CardId },
}

impl DndEvent {
    /// The card being dragged
    pub fn active(&self) -> &CardId {
        match self {
            Self::DragStart { active }
            | Self::DragMove { active, .. }
            | Self::DragOver { active, .. }
            | Self::DragEnd { active, .. }
            | Self::DragCancel { active } => active,
        }
    }
}

/// Receives drag lifecycle events. Every hook defaults to doing nothing.
pub trait DndMonitor {
    fn on_drag_start(&mut self, _active: &CardId) {}

    fn on_drag_move(&mut self, _active: &CardId, _over: Option<&OverId>) {}

    fn on_drag_over(&mut self, _active: &CardId, _over: Option<&OverId>) {}

    fn on_drag_end(&mut self, _active: &CardId, _over: Option<&OverId>) {}

    fn on_drag_cancel(&mut self, _active: &CardId) {}

    /// Routes an event to the matching hook
    fn handle(&mut self, event: &DndEvent) {
        match event {
            DndEvent::DragStart { active } => self.on_drag_start(active),
            DndEvent::DragMove { active, over } => self.on_drag_move(active, over.as_ref()),
            DndEvent::DragOver { active, over } => self.on_drag_over(active, over.as_ref()),
            DndEvent::DragEnd { active, over } => self.on_drag_end(active, over.as_ref()),
            DndEvent::DragCancel { active } => self.on_drag_cancel(active),
        }
    }
}

/// Identifies a registered monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(u64);

#[derive(Default)]
pub struct MonitorRegistry {
    next_handle: u64,
    monitors: Vec<(MonitorHandle, Box<dyn DndMonitor>)>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, monitor: impl DndMonitor + 'static) -> MonitorHandle {
        let handle = MonitorHandle(self.next_handle);
        self.next_handle += 1;
        self.monitors.push((handle, Box::new(monitor)));
        handle
    }

    /// Removes a monitor. Returns `false` for an unknown or already removed handle.
    pub fn unregister(&mut self, handle: MonitorHandle) -> bool {
        let before = self.monitors.len();
        self.monitors.retain(|(h, _)| *h != handle);
        self.monitors.len() != before
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Delivers `event` to every monitor in registration order
    pub fn trigger(&mut self, event: &DndEvent) {
        for (_, monitor) in self.monitors.iter_mut() {
            monitor.handle(event);
        }
    }
}

impl fmt::Debug for MonitorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorRegistry")
            .field("monitors", &self.monitors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl DndMonitor for Recorder {
        fn on_drag_start(&mut self, active: &CardId) {
            self.log.borrow_mut().push(format!("{}:start:{}", self.name, active));
        }

        fn on_drag_cancel(&mut self, active: &CardId) {
            self.log.borrow_mut().push(format!("{}:cancel:{}", self.name, active));
        }
    }

    #[test]
    fn test_trigger_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = MonitorRegistry::new();
        registry.register(Recorder { name: "a", log: log.clone() });
        registry.register(Recorder { name: "b", log: log.clone() });

        registry.trigger(&DndEvent::DragStart { active: CardId::from("1") });

        assert_eq!(*log.borrow(), vec!["a:start:1", "b:start:1"]);
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = MonitorRegistry::new();
        let a = registry.register(Recorder { name: "a", log: log.clone() });
        registry.register(Recorder { name: "b", log: log.clone() });

        assert!(registry.unregister(a));
        assert!(!registry.unregister(a));
        registry.trigger(&DndEvent::DragCancel { active: CardId::from("7") });

        assert_eq!(registry.len(), 1);
        assert_eq!(*log.borrow(), vec!["b:cancel:7"]);
    }

    #[test]
    fn test_unhandled_hooks_are_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = MonitorRegistry::new();
        registry.register(Recorder { name: "a", log: log.clone() });

        registry.trigger(&DndEvent::DragOver {
            active: CardId::from("1"),
            over: None,
        });

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_event_active() {
        let event = DndEvent::DragEnd {
            active: CardId::from("3"),
            over: None,
        };
        assert_eq!(event.active().as_str(), "3");
    }
}
