//! Windows-1252 text helpers for thermal printers
//!
//! Receipt printers sold in the Dominican Republic ship with the WPC1252
//! code page, which covers Spanish accents, `ñ`, `¿`, `¡` and `€`. Every
//! character in that code page is one byte and one column wide.

/// ESC t 16 - select code page WPC1252
pub(crate) const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 16];

/// Encode text to Windows-1252
///
/// Characters outside the code page become `?`.
pub fn encode_cp1252(s: &str) -> Vec<u8> {
    if s.is_ascii() {
        return s.as_bytes().to_vec();
    }

    let mut out = Vec::with_capacity(s.len());
    let mut tmp = [0u8; 4];
    for c in s.chars() {
        if c.is_ascii() {
            out.push(c as u8);
            continue;
        }
        let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
        if unmappable {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

/// Printed width of a string in columns
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` columns
pub fn truncate_text(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to exactly `width` columns
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_text(s: &str, width: usize, align_right: bool) -> String {
    let current = text_width(s);
    if current >= width {
        return truncate_text(s, width);
    }
    let spaces = " ".repeat(width - current);
    if align_right {
        format!("{spaces}{s}")
    } else {
        format!("{s}{spaces}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_spanish() {
        assert_eq!(encode_cp1252("Señor"), vec![b'S', b'e', 0xF1, b'o', b'r']);
        assert_eq!(encode_cp1252("¿Qué?"), vec![0xBF, b'Q', b'u', 0xE9, b'?']);
        assert_eq!(encode_cp1252("€5"), vec![0x80, b'5']);
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        assert_eq!(encode_cp1252("a中b"), b"a?b".to_vec());
    }

    #[test]
    fn test_width_counts_characters() {
        assert_eq!(text_width("Habichuelas"), 11);
        assert_eq!(text_width("Piña"), 4);
    }

    #[test]
    fn test_pad_and_truncate() {
        assert_eq!(pad_text("hi", 5, false), "hi   ");
        assert_eq!(pad_text("hi", 5, true), "   hi");
        assert_eq!(pad_text("Año nuevo", 3, false), "Año");
        assert_eq!(truncate_text("Café con leche", 4), "Café");
    }
}
