// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// Canvas styles are strings, so colors know how to format themselves as CSS.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const VOLT_YELLOW: Color = Color::from_u32(0xfcda00ff);
    pub const WHITE: Color = Color::from_u32(0xffffffff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // "#rrggbb", used for shadow colors which carry no alpha
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    // "rgba(r, g, b, a)" with the given alpha clamped to [0, 1]
    pub fn to_rgba(self, alpha: f64) -> String {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.max(0.0).min(1.0) };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x11223344);
        assert_eq!((c.r, c.g, c.b, c.a), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn formats_css() {
        assert_eq!(Color::VOLT_YELLOW.to_hex(), "#fcda00");
        assert_eq!(Color::VOLT_YELLOW.to_rgba(0.5), "rgba(252, 218, 0, 0.5)");
        assert_eq!(Color::WHITE.to_rgba(1.7), "rgba(255, 255, 255, 1)");
        assert_eq!(Color::WHITE.to_rgba(-0.2), "rgba(255, 255, 255, 0)");
    }
}
