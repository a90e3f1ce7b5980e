//! Interaction controller
//!
//! Subscribes to the registry's notifications and turns a finished drag into
//! a downward re-spacing pass.

use crate::lines::{LineEvent, LineRegistry};
use crate::types::LineId;

/// Pointer events a UI adapter forwards for a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    DragMoved { line: LineId, x: f64, y: f64 },
    DragFinished { line: LineId },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    dragging: Option<LineId>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line currently under a drag, if any
    pub fn dragging(&self) -> Option<LineId> {
        self.dragging
    }

    /// Apply a pointer event. Returns the number of lines re-spaced.
    pub fn handle(&mut self, registry: &mut LineRegistry, event: InteractionEvent) -> usize {
        match event {
            InteractionEvent::DragMoved { line, x, y } => {
                if registry.move_line(line, x, y).is_some() {
                    self.dragging = Some(line);
                }
                0
            }
            InteractionEvent::DragFinished { line } => {
                if self.dragging == Some(line) {
                    self.dragging = None;
                }
                registry.release_line(line);
                self.pump(registry)
            }
        }
    }

    /// Drain pending registry notifications, re-spacing below every line
    /// that was repositioned by a drag.
    pub fn pump(&mut self, registry: &mut LineRegistry) -> usize {
        let mut respaced = 0;
        for event in registry.drain_events() {
            match event {
                LineEvent::Repositioned { id, y } => {
                    let moved = registry.respace_below(id);
                    log::debug!("Line {:?} settled at {:.1}, re-spaced {} below", id, y, moved);
                    respaced += moved;
                }
                LineEvent::Removed { id } if self.dragging == Some(id) => {
                    self.dragging = None;
                }
                LineEvent::Cleared => {
                    self.dragging = None;
                }
                _ => {}
            }
        }
        respaced
    }
}
