//! Swipe gestures: pointer drags turned into directions.
//!
//! A drag is classified by its dominant axis. Positive `dx` points right,
//! positive `dy` points down. When `|dx| == |dy|` the vertical axis wins.
//! A drag must travel further than [`MIN_SWIPE_DISTANCE`] along the dominant
//! axis to count.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Direction, MIN_SWIPE_DISTANCE};

/// Pixel width assumed for one terminal cell
pub const CELL_WIDTH_PX: f32 = 8.0;
/// Pixel height assumed for one terminal cell
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Classify a drag by its pixel delta.
pub fn classify_swipe(dx: f32, dy: f32) -> Option<Direction> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() > dy.abs() {
        if dx.abs() <= MIN_SWIPE_DISTANCE {
            None
        } else if dx > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if dy.abs() <= MIN_SWIPE_DISTANCE {
        None
    } else if dy > 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}

/// Tracks a left-button drag across terminal mouse events.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn press(&mut self, column: u16, row: u16) {
        self.origin = Some((column, row));
    }

    /// End the drag at `(column, row)` and classify it.
    pub fn release(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (c0, r0) = self.origin.take()?;
        let dx = (column as f32 - c0 as f32) * CELL_WIDTH_PX;
        let dy = (row as f32 - r0 as f32) * CELL_HEIGHT_PX;
        classify_swipe(dx, dy)
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Feed a raw mouse event. Returns a direction when a drag completes.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press(event.column, event.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.release(event.column, event.row),
            _ => None,
        }
    }
}
