//! Input Frames
//!
//! The session consumes exactly one input frame per tick. Frames are a
//! single byte of flags so recorded input scripts stay compact and
//! replayable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input state for a single tick.
///
/// Direction flags reflect keys held this tick; the reset flag must be set
/// only on the tick the reset key went down, not while it is held, so a
/// reset fires exactly once per key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Packed action flags, see the `FLAG_*` constants.
    pub flags: u8,
}

impl InputFrame {
    /// Move left flag bit
    pub const FLAG_LEFT: u8 = 0x01;

    /// Move right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Move up flag bit
    pub const FLAG_UP: u8 = 0x04;

    /// Move down flag bit
    pub const FLAG_DOWN: u8 = 0x08;

    /// Reset the stored high score (edge-triggered)
    pub const FLAG_RESET: u8 = 0x10;

    const DIRECTION_MASK: u8 =
        Self::FLAG_LEFT | Self::FLAG_RIGHT | Self::FLAG_UP | Self::FLAG_DOWN;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flags.
    pub const fn with_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, pressed: bool) {
        if pressed {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Is the left key held?
    #[inline]
    pub fn left_pressed(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Is the right key held?
    #[inline]
    pub fn right_pressed(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Is the up key held?
    #[inline]
    pub fn up_pressed(&self) -> bool {
        self.flags & Self::FLAG_UP != 0
    }

    /// Is the down key held?
    #[inline]
    pub fn down_pressed(&self) -> bool {
        self.flags & Self::FLAG_DOWN != 0
    }

    /// Was the high-score reset requested this tick?
    #[inline]
    pub fn reset_pressed(&self) -> bool {
        self.flags & Self::FLAG_RESET != 0
    }

    /// Check if this frame has no directional input.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags & Self::DIRECTION_MASK == 0
    }

    /// Movement direction in map space (y grows downward).
    ///
    /// One direction at a time: left wins over right, and horizontal input
    /// wins over vertical, so holding several keys never produces diagonal
    /// movement.
    pub fn move_direction(&self) -> Vec2 {
        if self.left_pressed() {
            Vec2::new(-1.0, 0.0)
        } else if self.right_pressed() {
            Vec2::new(1.0, 0.0)
        } else if self.up_pressed() {
            Vec2::new(0.0, -1.0)
        } else if self.down_pressed() {
            Vec2::new(0.0, 1.0)
        } else {
            Vec2::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_priority() {
        let mut frame = InputFrame::new();
        frame.set(InputFrame::FLAG_LEFT, true);
        frame.set(InputFrame::FLAG_RIGHT, true);
        frame.set(InputFrame::FLAG_DOWN, true);

        // Left beats everything else
        assert_eq!(frame.move_direction(), Vec2::new(-1.0, 0.0));

        frame.set(InputFrame::FLAG_LEFT, false);
        assert_eq!(frame.move_direction(), Vec2::new(1.0, 0.0));

        frame.set(InputFrame::FLAG_RIGHT, false);
        assert_eq!(frame.move_direction(), Vec2::new(0.0, 1.0));

        frame.set(InputFrame::FLAG_UP, true);
        assert_eq!(frame.move_direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_idle_frame() {
        let frame = InputFrame::new();
        assert!(frame.is_idle());
        assert_eq!(frame.move_direction(), Vec2::ZERO);

        // Reset alone is still idle movement-wise
        let frame = InputFrame::with_flags(InputFrame::FLAG_RESET);
        assert!(frame.is_idle());
        assert!(frame.reset_pressed());
    }

    #[test]
    fn test_set_and_clear() {
        let mut frame = InputFrame::new();
        frame.set(InputFrame::FLAG_UP, true);
        assert!(frame.up_pressed());

        frame.set(InputFrame::FLAG_UP, false);
        assert!(!frame.up_pressed());
        assert!(frame.is_idle());
    }
}
