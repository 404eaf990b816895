//! Packed color attribute byte: ink in bits 0..2, paper in bits 3..5,
//! bright flag in bit 6.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAttribute {
    pub ink: u8,
    pub paper: u8,
    pub bright: bool,
}

impl ColorAttribute {
    pub fn new(ink: u8, paper: u8, bright: bool) -> Self {
        Self {
            ink: ink & 0b111,
            paper: paper & 0b111,
            bright,
        }
    }

    pub fn from_byte(value: u8) -> Self {
        Self {
            ink: value & 0b111,
            paper: (value >> 3) & 0b111,
            bright: value & 0b0100_0000 != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        self.ink | (self.paper << 3) | if self.bright { 0b0100_0000 } else { 0 }
    }
}

impl Default for ColorAttribute {
    fn default() -> Self {
        // white ink on black paper
        Self::new(7, 0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_fields() {
        let a = ColorAttribute::from_byte(0b0101_1010);
        assert_eq!(a.ink, 2);
        assert_eq!(a.paper, 3);
        assert!(a.bright);
    }

    #[test]
    fn byte_roundtrip() {
        for v in [0u8, 0b111, 0b0100_0000, 0b0111_1111] {
            assert_eq!(ColorAttribute::from_byte(v).to_byte(), v);
        }
    }
}
