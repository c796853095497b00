/// Linear RGBA color applied to an entity's material.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tint(pub [f32; 4]);

impl Tint {
    pub const WHITE: Tint = Tint([1.0, 1.0, 1.0, 1.0]);

    /// From a `0xRRGGBB` literal.
    pub fn from_rgb_hex(rgb: u32) -> Self {
        let c = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Tint([c(16), c(8), c(0), 1.0])
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Tint([r, g, b, alpha])
    }

    pub fn rgba(&self) -> [f32; 4] {
        self.0
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::Tint;

    #[test]
    fn hex_channels_are_normalized() {
        assert_eq!(Tint::from_rgb_hex(0x00ff00).rgba(), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(Tint::from_rgb_hex(0xff0000).with_alpha(0.5).rgba(), [1.0, 0.0, 0.0, 0.5]);
    }
}
