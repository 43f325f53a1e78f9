use crate::font::glyph::GlyphFace;

/// Fraction of the frame width a single line may occupy before smart wrap kicks in.
pub const WRAP_WIDTH_FRACTION: f64 = 0.9;

/// Wrap width for a frame of `frame_width` pixels.
pub fn wrap_width(frame_width: u32) -> i64 {
    (f64::from(frame_width) * WRAP_WIDTH_FRACTION) as i64
}

/// Unspaced width of `text` laid out on one line.
pub fn single_line_width(face: &dyn GlyphFace, text: &str) -> i64 {
    text.chars()
        .map(|c| i64::from(face.glyph_box(c).width))
        .sum()
}

/// Split an over-long single line into at most `max_lines` equal character chunks.
///
/// This is a plain character-count split: it is not word aware and may break inside a word.
/// Text that already contains a newline, fits within `max_width`, or is limited to one line is
/// returned unchanged.
pub fn wrap_text_smart(face: &dyn GlyphFace, text: &str, max_width: i64, max_lines: u32) -> String {
    if max_lines <= 1 || text.is_empty() || text.contains('\n') || max_width <= 0 {
        return text.to_owned();
    }
    let width = single_line_width(face, text);
    if width <= max_width {
        return text.to_owned();
    }

    let needed = (width + max_width - 1) / max_width;
    let lines = needed.min(i64::from(max_lines)) as usize;
    if lines <= 1 {
        return text.to_owned();
    }

    let chars: Vec<char> = text.chars().collect();
    let chunk = chars.len().div_ceil(lines);
    chars
        .chunks(chunk)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
