//! Cut-line registry
//!
//! Lines are stored in insertion order; whenever an operation needs them in
//! position order the order is computed by sorting on `y`. Every change is
//! recorded as a [`LineEvent`] which the interaction controller drains.

use crate::geometry::{chunk_height, clamp_offset};
use crate::types::{ImageDimensions, LineId};
use std::collections::VecDeque;

/// Drag state of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Idle,
    BeingDragged,
}

/// A horizontal cut-line. Its only degree of freedom is the vertical offset.
#[derive(Debug, Clone, PartialEq)]
pub struct CutLine {
    id: LineId,
    y: f64,
    state: LineState,
}

impl CutLine {
    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn state(&self) -> LineState {
        self.state
    }
}

/// Notifications emitted by the registry
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    Added { id: LineId, y: f64 },
    /// Intermediate position while a drag is in progress
    Moved { id: LineId, y: f64 },
    /// A drag finished and the line settled at `y`
    Repositioned { id: LineId, y: f64 },
    /// Line moved by [`LineRegistry::respace_below`]
    Respaced { id: LineId, y: f64 },
    Removed { id: LineId },
    Cleared,
}

#[derive(Debug, Clone)]
pub struct LineRegistry {
    lines: Vec<CutLine>,
    image_height: f64,
    chunk_height: f64,
    next_id: u64,
    events: VecDeque<LineEvent>,
}

impl LineRegistry {
    /// Create an empty registry bounded by the given image.
    pub fn new(dimensions: ImageDimensions) -> Self {
        Self {
            lines: Vec::new(),
            image_height: dimensions.height as f64,
            chunk_height: chunk_height(dimensions.width),
            next_id: 0,
            events: VecDeque::new(),
        }
    }

    pub fn image_height(&self) -> f64 {
        self.image_height
    }

    pub fn chunk_height(&self) -> f64 {
        self.chunk_height
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CutLine] {
        &self.lines
    }

    pub fn get(&self, id: LineId) -> Option<&CutLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Remove every line and place a new one at each multiple of the chunk
    /// height strictly below the image height.
    pub fn seed_automatic_lines(&mut self, image_width: u32, image_height: u32) {
        self.clear();
        self.image_height = image_height as f64;
        self.chunk_height = chunk_height(image_width);

        if !(self.chunk_height.is_finite() && self.chunk_height > 0.0) {
            return;
        }

        let mut k = 1u32;
        loop {
            let y = k as f64 * self.chunk_height;
            if y >= self.image_height {
                break;
            }
            self.insert(y);
            k += 1;
        }
        log::debug!(
            "Seeded {} cut-lines every {:.1}px",
            self.lines.len(),
            self.chunk_height
        );
    }

    /// Append a line at `y`, clamped into the image. Duplicates are allowed.
    pub fn add_line(&mut self, y: f64) -> LineId {
        let y = clamp_offset(y, self.image_height);
        self.insert(y)
    }

    pub fn remove_line(&mut self, id: LineId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.lines.remove(index);
        self.events.push_back(LineEvent::Removed { id });
        true
    }

    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.events.push_back(LineEvent::Cleared);
        }
    }

    /// Move a line towards a proposed point. The point is projected onto the
    /// vertical axis (x is discarded) and clamped into the image.
    pub fn move_line(&mut self, id: LineId, _x: f64, y: f64) -> Option<f64> {
        let image_height = self.image_height;
        let line = self.lines.iter_mut().find(|line| line.id == id)?;
        line.y = clamp_offset(y, image_height);
        line.state = LineState::BeingDragged;
        let y = line.y;
        self.events.push_back(LineEvent::Moved { id, y });
        Some(y)
    }

    /// End a drag and publish the final position.
    pub fn release_line(&mut self, id: LineId) -> bool {
        let Some(line) = self.lines.iter_mut().find(|line| line.id == id) else {
            return false;
        };
        line.state = LineState::Idle;
        let y = line.y;
        self.events.push_back(LineEvent::Repositioned { id, y });
        true
    }

    /// Re-space every line below `id` (in position order) so that each sits
    /// exactly one chunk below its predecessor, clamped to the image height.
    /// Lines above `id` are untouched. Returns the number of lines moved;
    /// an unknown id is a no-op.
    pub fn respace_below(&mut self, id: LineId) -> usize {
        let order = self.sorted_indices();
        let Some(start) = order.iter().position(|&i| self.lines[i].id == id) else {
            log::debug!("Re-space requested for unknown line {:?}", id);
            return 0;
        };

        let mut moved = 0;
        for k in start + 1..order.len() {
            // Reads the predecessor's already-updated position.
            let previous = self.lines[order[k - 1]].y;
            let new_y = (previous + self.chunk_height).min(self.image_height);
            let line = &mut self.lines[order[k]];
            line.y = new_y;
            self.events.push_back(LineEvent::Respaced {
                id: line.id,
                y: new_y,
            });
            moved += 1;
        }
        moved
    }

    /// Lines sorted by position. Equal positions keep insertion order.
    pub fn sorted(&self) -> Vec<&CutLine> {
        self.sorted_indices()
            .into_iter()
            .map(|i| &self.lines[i])
            .collect()
    }

    /// Sorted line positions
    pub fn positions(&self) -> Vec<f64> {
        self.sorted().into_iter().map(|line| line.y).collect()
    }

    /// `[0, interior positions…, height]`. Lines sitting exactly on either
    /// boundary are dropped.
    pub fn cut_positions(&self) -> Vec<f64> {
        let mut cuts = Vec::with_capacity(self.lines.len() + 2);
        cuts.push(0.0);
        cuts.extend(
            self.positions()
                .into_iter()
                .filter(|&y| y > 0.0 && y < self.image_height),
        );
        cuts.push(self.image_height);
        cuts
    }

    pub fn drain_events(&mut self) -> Vec<LineEvent> {
        self.events.drain(..).collect()
    }

    fn insert(&mut self, y: f64) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        self.lines.push(CutLine {
            id,
            y,
            state: LineState::Idle,
        });
        self.events.push_back(LineEvent::Added { id, y });
        id
    }

    fn index_of(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    fn sorted_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.lines.len()).collect();
        order.sort_by(|&a, &b| self.lines[a].y.total_cmp(&self.lines[b].y));
        order
    }
}
