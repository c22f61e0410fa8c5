// Character classification: letters, combining marks, whitespace, other.

/// Classification of a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// A base letter with its code (1..=34).
    Letter(u8),
    /// A combining diacritical mark with its code (1..=8).
    Mark(u8),
    Whitespace,
    /// Anything else (punctuation, digits, other scripts). Dropped by the encoder.
    Other,
}

/// A combining mark together with its code and conventional name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub ch: char,
    pub code: u8,
    pub name: &'static str,
}

// Letter table (34 entries). Order defines the codes and must never change.
pub const LETTERS: &[(char, u8)] = &[
    ('ا', 1), ('ب', 2), ('ت', 3), ('ث', 4), ('ج', 5), ('ح', 6), ('خ', 7), ('د', 8),
    ('ذ', 9), ('ر', 10), ('ز', 11), ('س', 12), ('ش', 13), ('ص', 14), ('ض', 15),
    ('ط', 16), ('ظ', 17), ('ع', 18), ('غ', 19), ('ف', 20), ('ق', 21), ('ك', 22),
    ('ل', 23), ('م', 24), ('ن', 25), ('ه', 26), ('و', 27), ('ي', 28), ('ء', 29),
    ('ى', 30), ('آ', 31), ('ة', 32), ('ؤ', 33), ('ئ', 34),
];

// Harakat, tanween, shadda and sukun (U+064B..=U+0652).
pub const MARKS: &[Mark] = &[
    Mark { ch: '\u{064B}', code: 1, name: "Fathatan" },
    Mark { ch: '\u{064C}', code: 2, name: "Dammatan" },
    Mark { ch: '\u{064D}', code: 3, name: "Kasratan" },
    Mark { ch: '\u{064E}', code: 4, name: "Fatha" },
    Mark { ch: '\u{064F}', code: 5, name: "Damma" },
    Mark { ch: '\u{0650}', code: 6, name: "Kasra" },
    Mark { ch: '\u{0651}', code: 7, name: "Shadda" },
    Mark { ch: '\u{0652}', code: 8, name: "Sukun" },
];

pub const SHADDA: u8 = 7;
pub const TANWEEN: &[u8] = &[1, 2, 3];
pub const TA_MARBUTA: u8 = 32;

/// Classify one character against the letter and mark tables.
pub fn classify(c: char) -> CharClass {
    if let Some(&(_, code)) = LETTERS.iter().find(|(l, _)| *l == c) {
        return CharClass::Letter(code);
    }
    if let Some(m) = MARKS.iter().find(|m| m.ch == c) {
        return CharClass::Mark(m.code);
    }
    if c.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Other
    }
}
