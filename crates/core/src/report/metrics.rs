//! Standard 14 font metrics used to align text.

/// Ascender of Helvetica and Helvetica-Bold, per 1000 units of em.
pub const ASCENDER: f32 = 0.718;

/// Helvetica advance widths for `' '..='~'`.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // ' ' ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for `' '..='~'`.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // ' ' ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // { | } ~
    389, 280, 389, 584,
];

/// Helvetica advance widths for WinAnsi codes `0x80..=0xFF`; 0 marks unused codes.
#[rustfmt::skip]
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    // 0x80 Windows-1252 extras
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 0xA0 nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0 ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0 À-Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0 Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0 à-ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0 ð-ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold advance widths for WinAnsi codes `0x80..=0xFF`; 0 marks unused codes.
#[rustfmt::skip]
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    // 0x80 Windows-1252 extras
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    // 0xA0 nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0 ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0 À-Ï
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0 Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0 à-ï
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0 ð-ÿ
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Maps a character to its `WinAnsiEncoding` code.
///
/// Returns `None` for characters the encoding lacks and for control characters.
#[must_use]
pub fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => return u8::try_from(ch).ok(),
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(code)
}

/// The two faces the report draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

impl Font {
    /// PostScript name of the base font.
    #[must_use]
    pub const fn base_font(self) -> &'static [u8] {
        match self {
            Self::Regular => b"Helvetica",
            Self::Bold => b"Helvetica-Bold",
        }
    }

    /// Name under which the font is registered in page resources.
    #[must_use]
    pub const fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Regular => b"F1",
            Self::Bold => b"F2",
        }
    }

    /// Advance width of `ch` in thousandths of an em.
    ///
    /// Characters without a WinAnsi code are measured as the `?` drawn in
    /// their place.
    #[must_use]
    pub fn glyph_width(self, ch: char) -> u16 {
        let (ascii, high) = match self {
            Self::Regular => (&HELVETICA_WIDTHS, &HELVETICA_HIGH_WIDTHS),
            Self::Bold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_HIGH_WIDTHS),
        };

        let code = usize::from(win_ansi_code(ch).unwrap_or(b'?'));
        match code {
            0x20..=0x7e => ascii[code - 0x20],
            0x80..=0xff => high[code - 0x80],
            _ => ascii[usize::from(b'?') - 0x20],
        }
    }

    /// Width of `text` set at `size` points.
    #[must_use]
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.glyph_width(ch))).sum();
        #[allow(clippy::cast_precision_loss)]
        let units = units as f32;
        units * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_tables_cover_printable_ascii() {
        assert_eq!(Font::Regular.glyph_width(' '), 278);
        assert_eq!(Font::Regular.glyph_width('~'), 584);
        assert_eq!(Font::Bold.glyph_width('~'), 584);
        assert_eq!(Font::Regular.glyph_width('W'), 944);
        assert_eq!(Font::Bold.glyph_width('m'), 889);
    }

    #[test]
    fn test_latin1_widths() {
        assert_eq!(Font::Regular.glyph_width('é'), 556);
        assert_eq!(Font::Regular.glyph_width('ç'), 500);
        assert_eq!(Font::Regular.glyph_width('Æ'), 1000);
        assert_eq!(Font::Bold.glyph_width('Ö'), 778);
        assert_eq!(Font::Bold.glyph_width('ñ'), 611);
        assert_eq!(Font::Regular.glyph_width('—'), 1000);
    }

    #[test]
    fn test_unencodable_characters_measure_as_question_mark() {
        assert_eq!(Font::Regular.glyph_width('₹'), Font::Regular.glyph_width('?'));
        assert_eq!(Font::Bold.glyph_width('ක'), 611);
    }

    #[test]
    fn test_accented_month_width() {
        // "Août" in bold = 722 + 611 + 611 + 333
        assert!(approx_eq(Font::Bold.text_width("Août", 10.0), 22.77));
    }

    #[test]
    fn test_win_ansi_codes() {
        assert_eq!(win_ansi_code('A'), Some(b'A'));
        assert_eq!(win_ansi_code('é'), Some(0xe9));
        assert_eq!(win_ansi_code('€'), Some(0x80));
        assert_eq!(win_ansi_code('\t'), None);
        assert_eq!(win_ansi_code('₹'), None);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        // "Rs." = 722 + 500 + 278
        assert!(approx_eq(Font::Regular.text_width("Rs.", 10.0), 15.0));
        assert!(approx_eq(Font::Regular.text_width("Rs.", 20.0), 30.0));
        assert!(approx_eq(Font::Bold.text_width("", 12.0), 0.0));
    }
}
