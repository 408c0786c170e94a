//! Character-column representation of byte values.

/// Control pictures for 0x00..=0x1f, one glyph per control code.
#[rustfmt::skip]
const CONTROL_PICTURES: [char; 32] = [
    '␀','␁','␂','␃','␄','␅','␆','␇','␈','␉','␊','␋','␌','␍','␎','␏',
    '␐','␑','␒','␓','␔','␕','␖','␗','␘','␙','␚','␛','␜','␝','␞','␟',
];

/// Returns the glyph that stands in for a byte in the text column.
///
/// In ASCII-only mode, printable ASCII is shown as-is and everything else
/// becomes `.`. Otherwise control codes map to the Unicode control pictures,
/// space and no-break space get visible stand-ins, 0x80..=0x9f share a single
/// non-printable glyph, and high bytes keep their Latin-1 code point.
///
/// Total over all byte values, and pure: the same byte and mode always
/// produce the same glyph.
pub fn glyph(byte: u8, ascii_only: bool) -> char {
    if ascii_only {
        return match byte {
            0x20..=0x7e => byte as char,
            _ => '.',
        };
    }
    match byte {
        0x00..=0x1f => CONTROL_PICTURES[byte as usize],
        0x20 => '\u{2420}',
        0x21..=0x7e => byte as char,
        0x7f => '\u{2421}',
        0x80..=0x9f => '\u{2426}',
        0xa0 => '\u{2423}',
        // `u8 as char` keeps the Latin-1 code point.
        _ => byte as char,
    }
}
