//! Framebuffer text and colour mixing for the overlay.
//!
//! Glyphs are 3×5 pixels.  Each one is packed into the low 15 bits of a
//! `u16`, five 3-bit rows with the top row in bits 14..12 and the leftmost
//! column as the high bit of its row.  Letters are case-insensitive.

pub const GLYPH_W: usize = 3;
pub const GLYPH_H: usize = 5;
/// Horizontal advance per character.
pub const ADVANCE: usize = GLYPH_W + 1;

/// Drawn for characters the font lacks: a single centred dot.
const MISSING: u16 = 0x0080;

fn glyph(c: char) -> u16 {
    match c.to_ascii_lowercase() {
        '0' => 0x7b6f,
        '1' => 0x2c97,
        '2' => 0x73e7,
        '3' => 0x73cf,
        '4' => 0x5bc9,
        '5' => 0x79cf,
        '6' => 0x79ef,
        '7' => 0x7249,
        '8' => 0x7bef,
        '9' => 0x7bcf,
        'a' => 0x7bed,
        'b' => 0x6bae,
        'c' => 0x7927,
        'd' => 0x6b6e,
        'e' => 0x79e7,
        'f' => 0x79e4,
        'g' => 0x796f,
        'h' => 0x5bed,
        'i' => 0x7497,
        'j' => 0x126f,
        'k' => 0x5bad,
        'l' => 0x4927,
        'm' => 0x5f6d,
        'n' => 0x7b6d,
        'o' => 0x7b6f,
        'p' => 0x7be4,
        'q' => 0x7b79,
        'r' => 0x6bad,
        's' => 0x79cf,
        't' => 0x7492,
        'u' => 0x5b6f,
        'v' => 0x5b52,
        'w' => 0x5b7d,
        'x' => 0x5aad,
        'y' => 0x5bd2,
        'z' => 0x72a7,
        '_' => 0x0007,
        '#' => 0x5f7d,
        '/' => 0x12a4,
        '-' => 0x01c0,
        '.' => 0x0002,
        ',' => 0x0014,
        ':' => 0x0410,
        '=' => 0x0e38,
        '+' => 0x05d0,
        ' ' => 0x0000,
        _ => MISSING,
    }
}

/// Whether `c` has a glyph of its own.
pub fn has_glyph(c: char) -> bool { c == ' ' || glyph(c) != MISSING }

/// Write `text` into `buf` (row-major, `width` pixels wide) with its top-left
/// corner at `(x, y)`.  Text past the right or bottom edge is dropped.
pub fn draw_text(buf: &mut [u32], width: usize, text: &str, x: usize, y: usize, color: u32) {
    let height = buf.len() / width.max(1);
    let mut cx = x;
    for ch in text.chars() {
        if cx + GLYPH_W > width { break; }
        let bits = glyph(ch);
        for row in 0..GLYPH_H {
            let py = y + row;
            if py >= height { break; }
            let row_bits = (bits >> (3 * (GLYPH_H - 1 - row))) & 0b111;
            for col in 0..GLYPH_W {
                if row_bits & (0b100 >> col) != 0 {
                    buf[py * width + cx + col] = color;
                }
            }
        }
        cx += ADVANCE;
    }
}

/// Mix two opaque ARGB colours: `t` = 0 gives `a`, `t` = 1 gives `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t) as u32 & 0xFF) << shift
    };
    0xFF00_0000 | channel(16) | channel(8) | channel(0)
}
