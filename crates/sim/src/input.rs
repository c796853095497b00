use foundation::math::Euler;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(ArrowKey::Up),
            "ArrowDown" => Some(ArrowKey::Down),
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            _ => None,
        }
    }

    /// Rotation added to the globe for one press.
    ///
    /// Up/down tilt about x, left/right turn about y.
    pub fn rotation_delta(self, step_rad: f64) -> Euler {
        match self {
            ArrowKey::Up => Euler::new(-step_rad, 0.0, 0.0),
            ArrowKey::Down => Euler::new(step_rad, 0.0, 0.0),
            ArrowKey::Left => Euler::new(0.0, -step_rad, 0.0),
            ArrowKey::Right => Euler::new(0.0, step_rad, 0.0),
        }
    }
}
