//! Pointer drag to rotation mapping

use crate::rotation::RotationState;

/// Mouse buttons held during a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
}

/// Pointer events forwarded by the host window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button went down at this position
    Pressed { x: f64, y: f64 },
    /// The pointer moved to this position
    Moved { x: f64, y: f64, buttons: PointerButtons },
}

/// Turns pointer drags into [`RotationState`] updates.
///
/// Dragging with the primary button turns about X (vertical travel) and Y
/// (horizontal travel); the secondary button turns about Z from horizontal
/// travel alone. The primary button wins when both are held.
#[derive(Debug, Clone)]
pub struct InputController {
    last_position: Option<(f64, f64)>,
    sensitivity: i32,
}

impl InputController {
    /// `sensitivity` is in sixteenths of a degree per pixel
    pub fn new(sensitivity: i32) -> Self {
        Self {
            last_position: None,
            sensitivity,
        }
    }

    pub fn sensitivity(&self) -> i32 {
        self.sensitivity
    }

    /// Position recorded by the last press or drag step
    pub fn last_position(&self) -> Option<(f64, f64)> {
        self.last_position
    }

    /// Start a drag at `(x, y)`
    pub fn press(&mut self, x: f64, y: f64) {
        self.last_position = Some((x, y));
    }

    /// Apply a pointer move. Returns whether `rotation` changed and a frame
    /// should be drawn.
    pub fn moved(&mut self, x: f64, y: f64, buttons: PointerButtons, rotation: &mut RotationState) -> bool {
        let Some((last_x, last_y)) = self.last_position else {
            return false;
        };
        if !buttons.primary && !buttons.secondary {
            return false;
        }

        let dx = (x - last_x).round() as i32;
        let dy = (y - last_y).round() as i32;
        let k = self.sensitivity;

        if buttons.primary {
            rotation.add(k.wrapping_mul(dy), k.wrapping_mul(dx), 0);
        } else {
            rotation.add(0, 0, k.wrapping_mul(dx));
        }
        // Advance only by whole pixels so sub-pixel travel accumulates
        self.last_position = Some((last_x + dx as f64, last_y + dy as f64));

        dx != 0 || (buttons.primary && dy != 0)
    }

    /// Dispatch any pointer event
    pub fn handle(&mut self, event: PointerEvent, rotation: &mut RotationState) -> bool {
        match event {
            PointerEvent::Pressed { x, y } => {
                self.press(x, y);
                false
            }
            PointerEvent::Moved { x, y, buttons } => self.moved(x, y, buttons, rotation),
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: PointerButtons = PointerButtons { primary: true, secondary: false };
    const SECONDARY: PointerButtons = PointerButtons { primary: false, secondary: true };

    #[test]
    fn test_press_records_without_rotating() {
        let mut input = InputController::default();
        let mut rotation = RotationState::default();
        assert!(!input.handle(PointerEvent::Pressed { x: 3.0, y: 4.0 }, &mut rotation));
        assert_eq!(input.last_position(), Some((3.0, 4.0)));
        assert_eq!(rotation, RotationState::default());
    }

    #[test]
    fn test_primary_drag_turns_x_and_y() {
        let mut input = InputController::new(8);
        let mut rotation = RotationState::default();
        input.press(100.0, 100.0);

        assert!(input.moved(110.0, 100.0, PRIMARY, &mut rotation));
        assert_eq!(rotation, RotationState::new(0, 80, 0));

        assert!(input.moved(110.0, 95.0, PRIMARY, &mut rotation));
        assert_eq!(rotation, RotationState::new(-40, 80, 0));
        assert_eq!(input.last_position(), Some((110.0, 95.0)));
    }

    #[test]
    fn test_secondary_drag_turns_z_only() {
        let mut input = InputController::new(8);
        let mut rotation = RotationState::new(5, 6, 7);
        input.press(0.0, 0.0);

        assert!(input.moved(-3.0, 50.0, SECONDARY, &mut rotation));
        assert_eq!(rotation, RotationState::new(5, 6, 7 - 24));

        // Vertical travel alone leaves Z unchanged
        assert!(!input.moved(-3.0, 80.0, SECONDARY, &mut rotation));
        assert_eq!(rotation, RotationState::new(5, 6, -17));
    }

    #[test]
    fn test_primary_wins_over_secondary() {
        let mut input = InputController::new(8);
        let mut rotation = RotationState::default();
        input.press(0.0, 0.0);
        let both = PointerButtons { primary: true, secondary: true };
        input.moved(2.0, 0.0, both, &mut rotation);
        assert_eq!(rotation, RotationState::new(0, 16, 0));
    }

    #[test]
    fn test_moves_without_button_or_press_are_ignored() {
        let mut input = InputController::default();
        let mut rotation = RotationState::default();

        assert!(!input.moved(10.0, 10.0, PRIMARY, &mut rotation));
        assert_eq!(input.last_position(), None);

        input.press(0.0, 0.0);
        assert!(!input.moved(10.0, 10.0, PointerButtons::default(), &mut rotation));
        assert_eq!(input.last_position(), Some((0.0, 0.0)));
        assert_eq!(rotation, RotationState::default());
    }

    #[test]
    fn test_sub_pixel_steps_accumulate() {
        let mut input = InputController::new(8);
        let mut rotation = RotationState::default();
        input.press(0.0, 0.0);

        for step in 1..=20 {
            input.moved(step as f64 * 0.4, 0.0, PRIMARY, &mut rotation);
        }
        assert_eq!(rotation, RotationState::new(0, 64, 0));
        assert_eq!(input.last_position(), Some((8.0, 0.0)));
    }

    #[test]
    fn test_fractional_positions_do_not_drift() {
        let mut input = InputController::new(8);
        let mut rotation = RotationState::default();
        input.press(10.3, 20.7);

        input.moved(13.9, 18.2, PRIMARY, &mut rotation);
        input.moved(15.3, 16.7, PRIMARY, &mut rotation);
        // Total travel is (5.0, -4.0) pixels
        assert_eq!(rotation, RotationState::new(-32, 40, 0));
    }

    #[test]
    fn test_new_press_overwrites_drag_origin() {
        let mut input = InputController::default();
        let mut rotation = RotationState::default();
        input.press(0.0, 0.0);
        input.moved(5.0, 0.0, PRIMARY, &mut rotation);
        input.press(200.0, 200.0);
        input.moved(201.0, 200.0, PRIMARY, &mut rotation);
        assert_eq!(rotation.y, 8 * 5 + 8);
    }
}
