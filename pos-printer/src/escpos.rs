//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::{SELECT_CP1252, encode_cp1252, text_width};

/// ESC/POS command builder
///
/// Text is encoded to Windows-1252 as it is written, so command bytes
/// (including drawer pulse timings above 0x7F) are never re-encoded.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(2048);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        buf.extend_from_slice(&SELECT_CP1252);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_cp1252(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n - Print and feed n lines
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    pub fn double_height(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x01]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left);
        let rw = text_width(right);

        if lw + rw >= self.width {
            // Too long, just print with space
            self.text(left);
            self.text(" ");
            self.line(right)
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right)
        }
    }

    // === Paper Control ===

    /// Full cut
    pub fn cut(&mut self) -> &mut Self {
        // GS V 0
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    /// Feed n lines then cut (GS V 66 n)
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Cash Drawer ===

    /// Open cash drawer (pin 2)
    pub fn open_drawer(&mut self) -> &mut Self {
        // ESC p m t1 t2 - Generate pulse on pin m
        self.buf.extend_from_slice(&[0x1B, 0x70, 0x00, 25, 250]);
        self
    }

    // === Raw Commands ===

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    // === Build ===

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
