use serde::{Deserialize, Serialize};

/// Linear RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// `#RRGGBBAA` with upper case hex digits
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 8 || !digits.is_ascii() {
            return None;
        }
        let mut channels = [0.0f32; 4];
        for (i, channel) in channels.iter_mut().enumerate() {
            let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
            *channel = byte as f32 / 255.0;
        }
        let [r, g, b, a] = channels;
        Some(Self { r, g, b, a })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Rgba::WHITE.to_hex(), "#FFFFFFFF");
        assert_eq!(Rgba::new(1.0, 0.0, 0.5, 0.0).to_hex(), "#FF008000");
        assert_eq!(Rgba::new(2.0, -1.0, 0.0, 1.0).to_hex(), "#FF0000FF");
    }

    #[test]
    fn test_from_hex() {
        let color = Rgba::from_hex("#FF008000").unwrap();
        assert_eq!(color.to_bytes(), [255, 0, 128, 0]);
        assert!(Rgba::from_hex("#FFF").is_none());
        assert!(Rgba::from_hex("#GG000000").is_none());
    }
}
