use winit::event::{ElementState, MouseButton, WindowEvent};

/// Left-button press at a window position, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub x: f32,
    pub y: f32,
}

/// Adapter that turns winit window events into viewport clicks
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Current cursor position (relative to window)
    position: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a window event; yields a click on left-button press
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<PointerClick> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(position.x as f32, position.y as f32);
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.press(),
            _ => None,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Some((x, y));
    }

    /// Press at the last known position; nothing if the cursor is outside
    pub fn press(&self) -> Option<PointerClick> {
        self.position.map(|(x, y)| PointerClick { x, y })
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events carry device ids that cannot be built in tests, so these
    // drive the tracker through its plain methods

    #[test]
    fn no_click_before_cursor_moves() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.press(), None);
        assert_eq!(tracker.position(), None);
    }

    #[test]
    fn click_at_last_position() {
        let mut tracker = PointerTracker::new();
        tracker.move_to(10.0, 20.0);
        tracker.move_to(400.0, 300.0);
        assert_eq!(tracker.press(), Some(PointerClick { x: 400.0, y: 300.0 }));
    }
}
