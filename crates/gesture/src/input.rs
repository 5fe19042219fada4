use foundation::math::Vec2;
use foundation::time::Time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    Down,
    Move,
    Up,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    pub action: MouseAction,
    /// 0 primary, 1 auxiliary, 2 secondary.
    #[serde(default)]
    pub button: u8,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub time_ms: f64,
    #[serde(default)]
    pub default_prevented: bool,
}

impl MouseInput {
    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bit for this event's button in a button mask.
    pub fn button_bit(&self) -> u32 {
        1u32.checked_shl(u32::from(self.button)).unwrap_or(0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn point(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    pub action: TouchAction,
    /// Touches that started, moved or ended with this event.
    pub changed: Vec<TouchPoint>,
    #[serde(default)]
    pub time_ms: f64,
    #[serde(default)]
    pub default_prevented: bool,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    /// Pixels per unit of wheel delta.
    pub fn pixels_per_unit(self) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Line => 10.0,
            Self::Page => 100.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_y: f64,
    #[serde(default)]
    pub mode: WheelDeltaMode,
    #[serde(default)]
    pub time_ms: f64,
    #[serde(default)]
    pub default_prevented: bool,
}

impl WheelInput {
    pub fn delta_pixels(&self) -> f64 {
        self.delta_y * self.mode.pixels_per_unit()
    }
}

/// Raw pointer input in window coordinates, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Mouse(MouseInput),
    Touch(TouchInput),
    Wheel(WheelInput),
}

impl InputEvent {
    pub fn mouse(action: MouseAction, button: u8, x: f64, y: f64) -> Self {
        Self::Mouse(MouseInput {
            action,
            button,
            x,
            y,
            time_ms: 0.0,
            default_prevented: false,
        })
    }

    pub fn mouse_down(button: u8, x: f64, y: f64) -> Self {
        Self::mouse(MouseAction::Down, button, x, y)
    }

    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self::mouse(MouseAction::Move, 0, x, y)
    }

    pub fn mouse_up(button: u8, x: f64, y: f64) -> Self {
        Self::mouse(MouseAction::Up, button, x, y)
    }

    pub fn touch(action: TouchAction, changed: Vec<TouchPoint>) -> Self {
        Self::Touch(TouchInput {
            action,
            changed,
            time_ms: 0.0,
            default_prevented: false,
        })
    }

    pub fn touch_start(changed: Vec<TouchPoint>) -> Self {
        Self::touch(TouchAction::Start, changed)
    }

    pub fn touch_move(changed: Vec<TouchPoint>) -> Self {
        Self::touch(TouchAction::Move, changed)
    }

    pub fn touch_end(changed: Vec<TouchPoint>) -> Self {
        Self::touch(TouchAction::End, changed)
    }

    pub fn touch_cancel(changed: Vec<TouchPoint>) -> Self {
        Self::touch(TouchAction::Cancel, changed)
    }

    pub fn wheel(delta_y: f64, mode: WheelDeltaMode) -> Self {
        Self::Wheel(WheelInput {
            delta_y,
            mode,
            time_ms: 0.0,
            default_prevented: false,
        })
    }

    /// Returns the event stamped with `time_ms`.
    pub fn at_ms(mut self, time_ms: f64) -> Self {
        match &mut self {
            Self::Mouse(m) => m.time_ms = time_ms,
            Self::Touch(t) => t.time_ms = time_ms,
            Self::Wheel(w) => w.time_ms = time_ms,
        }
        self
    }

    pub fn time(&self) -> Time {
        Time::from_millis(match self {
            Self::Mouse(m) => m.time_ms,
            Self::Touch(t) => t.time_ms,
            Self::Wheel(w) => w.time_ms,
        })
    }

    pub fn default_prevented(&self) -> bool {
        match self {
            Self::Mouse(m) => m.default_prevented,
            Self::Touch(t) => t.default_prevented,
            Self::Wheel(w) => w.default_prevented,
        }
    }

    pub fn prevent_default(&mut self) {
        match self {
            Self::Mouse(m) => m.default_prevented = true,
            Self::Touch(t) => t.default_prevented = true,
            Self::Wheel(w) => w.default_prevented = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InputEvent, MouseAction, TouchPoint, WheelDeltaMode};
    use foundation::time::Time;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tagged_json() {
        let json = r#"[
            {"type": "mouse", "action": "down", "button": 2, "x": 10, "y": 20},
            {"type": "touch", "action": "start", "changed": [{"id": 1, "x": 5, "y": 6}], "time_ms": 40},
            {"type": "wheel", "delta_y": 3, "mode": "line"}
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::mouse(MouseAction::Down, 2, 10.0, 20.0),
                InputEvent::touch_start(vec![TouchPoint::new(1, 5.0, 6.0)]).at_ms(40.0),
                InputEvent::wheel(3.0, WheelDeltaMode::Line),
            ]
        );
        assert_eq!(events[1].time(), Time(0.04));
    }

    #[test]
    fn wheel_units_scale_to_pixels() {
        for (mode, expected) in [
            (WheelDeltaMode::Pixel, 2.0),
            (WheelDeltaMode::Line, 20.0),
            (WheelDeltaMode::Page, 200.0),
        ] {
            match InputEvent::wheel(2.0, mode) {
                InputEvent::Wheel(w) => assert_eq!(w.delta_pixels(), expected),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn prevent_default_marks_event() {
        let mut e = InputEvent::mouse_move(1.0, 1.0);
        assert!(!e.default_prevented());
        e.prevent_default();
        assert!(e.default_prevented());
    }
}
