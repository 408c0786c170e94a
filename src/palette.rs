//! Assignment of display colors to byte values.
//!
//! Colors are handed out from a fixed table of xterm-256 color indexes,
//! sorted for maximal pairwise visual contrast, so the values that appear
//! first in the input get the most distinguishable colors. The head of the
//! table follows the Kenneth Kelly high-contrast palette (matched to the
//! nearest xterm entries, with black and the usual text colors reserved);
//! the remainder is the rest of the xterm palette ordered by color-space
//! distance, minus entries too dark to read on a black background.

/// The contrast-sorted color table. The curated list is two entries short
/// of covering every byte value, so the final two colors repeat to pad the
/// table to exactly 256 entries.
#[rustfmt::skip]
pub const COLORSET: [u8; 256] = [
      8,  11,  53, 202,  87,   9,  41, 217,  32, 222,  57, 214, 126, 191,  88, 148,
     94, 219,  22, 228, 121,   4,   3,  23,  30, 179,  14,  13, 195,  12, 225, 123,
    230,  27, 159,  10, 207, 165,  50, 227, 235, 200,  45,  82, 213, 197,  47, 255,
     20, 190,  93, 229, 236,  33, 220, 129,  49, 160,  39, 198, 118, 199,  48, 208,
     63, 154,  81,  52, 171, 194,  17, 224,  40, 206,  86, 237, 189, 203,  83,  19,
    254,   1, 221, 177,   2, 117,  18, 158, 212, 124, 183,  28, 122, 204,  34, 153,
    193,  69, 205,  84, 238, 218, 192,  99, 119, 135, 209,  75, 223,  85, 215,  56,
    155, 164,  58,  44, 161, 184,  26,  76, 105, 166, 120, 141, 210, 239, 111, 156,
    211, 147, 216, 157,  92,  42, 162,  38, 112, 163,  43, 172, 128,  29, 253,  54,
    178,  24,  55,  64, 188,  89,  35,  25, 130,  80, 125,  70, 170, 185, 240, 252,
     62,  77,   5, 167, 152,   6, 182,  37, 187,  91, 142, 116, 136, 176,  31, 186,
     90, 106, 127,  36, 100, 251,  59,  74, 134,  79, 149, 169, 241,  68, 113, 168,
     78,  98, 173,   7, 242, 146,  61, 151,  71, 131, 181,  60, 110, 150, 175,  65,
    115, 140, 180,  95, 104, 114, 174, 250, 243,  73, 133, 143,  67, 107, 132,  72,
     97, 137,  66,  96, 101, 249, 145, 248, 109, 139, 144, 247, 103, 108, 138, 246,
    245, 102, 245, 102, 245, 102, 245, 102, 245, 102, 245, 102, 245, 102, 245, 102,
];

/// Maps byte values to their assigned colors.
///
/// Each distinct byte value receives the next unused [`COLORSET`] entry the
/// first time it is looked up; the assignment is then fixed for the lifetime
/// of the palette. One palette is shared across an entire run so a given
/// byte value is painted identically everywhere it appears, across all
/// concatenated inputs.
pub struct Palette {
    assigned: [Option<u8>; 256],
    next_free: usize,
}

impl Palette {
    /// Creates a palette with the zero byte pinned to the first table entry,
    /// so null padding always takes the least conspicuous color.
    pub fn new() -> Palette {
        let mut assigned = [None; 256];
        assigned[0] = Some(COLORSET[0]);
        Palette {
            assigned,
            next_free: 1,
        }
    }

    /// Returns the color for a byte value, assigning one on first encounter.
    ///
    /// Never exhausts: the table holds one entry per possible byte value,
    /// and each value takes at most one.
    pub fn color_for(&mut self, byte: u8) -> u8 {
        match self.assigned[byte as usize] {
            Some(color) => color,
            None => {
                let color = COLORSET[self.next_free];
                self.assigned[byte as usize] = Some(color);
                self.next_free += 1;
                color
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_byte_gets_first_table_entry() {
        let mut palette = Palette::new();
        assert_eq!(palette.color_for(0x00), COLORSET[0]);
    }

    #[test]
    fn colors_follow_first_encounter_order() {
        let mut palette = Palette::new();
        assert_eq!(palette.color_for(b'z'), COLORSET[1]);
        assert_eq!(palette.color_for(b'a'), COLORSET[2]);
        assert_eq!(palette.color_for(0xff), COLORSET[3]);
    }

    #[test]
    fn assignments_are_stable() {
        let mut palette = Palette::new();
        let first = palette.color_for(0x42);
        for b in [0x00, 0x41, 0x43, 0xfe, 0x42, 0x07] {
            palette.color_for(b);
        }
        assert_eq!(palette.color_for(0x42), first);
    }

    #[test]
    fn all_byte_values_cover_the_whole_table() {
        let mut palette = Palette::new();
        // Encounter order 0, 1, 2, ... maps the table onto itself.
        let colors: Vec<u8> = (0u8..=u8::MAX).map(|b| palette.color_for(b)).collect();
        assert_eq!(colors.as_slice(), &COLORSET[..]);
    }
}
