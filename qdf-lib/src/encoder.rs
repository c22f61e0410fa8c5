// Letter/diacritic encoder: Arabic text to bracketed numeric notation.
//
// Each letter becomes one unit; marks that follow a letter attach to it in
// the order they were written. Every whitespace character closes the current
// word and emits exactly one separator space, so runs of whitespace are kept
// as runs of spaces.

use std::fmt;

use crate::grapheme::{self, CharClass};
use crate::types::*;

const UNIT_SEPARATOR: &str = " - ";

/// Encode text and render it, trimming leading and trailing separators.
pub fn encode(text: &str) -> String {
    encode_text(text).to_string().trim().to_string()
}

/// Like [`encode`], with tracker flags appended inside each word's brackets.
pub fn encode_with_trackers(text: &str) -> String {
    encode_text(text).render_with_trackers().trim().to_string()
}

/// Encode text into its structured form.
pub fn encode_text(text: &str) -> EncodedText {
    let mut segments = Vec::new();
    let mut word = EncodedWord::default();
    let mut pending: Option<EncodedUnit> = None;

    for c in text.chars() {
        match grapheme::classify(c) {
            CharClass::Letter(code) => {
                if let Some(unit) = pending.take() {
                    word.units.push(unit);
                }
                pending = Some(EncodedUnit {
                    letter: code,
                    marks: Vec::new(),
                });
            }
            CharClass::Mark(code) => {
                // A mark with no letter before it has nothing to attach to.
                if let Some(unit) = pending.as_mut() {
                    unit.marks.push(code);
                }
            }
            CharClass::Whitespace => {
                if let Some(unit) = pending.take() {
                    word.units.push(unit);
                }
                if !word.units.is_empty() {
                    segments.push(Segment::Word(std::mem::take(&mut word)));
                }
                segments.push(Segment::Space);
            }
            CharClass::Other => {}
        }
    }

    if let Some(unit) = pending.take() {
        word.units.push(unit);
    }
    if !word.units.is_empty() {
        segments.push(Segment::Word(word));
    }

    EncodedText { segments }
}

impl EncodedWord {
    /// Summarize shadda, tanween and ta marbuta occurrences.
    pub fn trackers(&self) -> Trackers {
        let mut t = Trackers::default();
        for unit in &self.units {
            t.shadda |= unit.marks.contains(&grapheme::SHADDA);
            t.tanween |= unit.marks.iter().any(|m| grapheme::TANWEEN.contains(m));
            t.ta_marbuta |= unit.letter == grapheme::TA_MARBUTA;
        }
        t
    }

    /// Bracketed rendering with tracker flags before the closing bracket.
    pub fn render_with_trackers(&self) -> String {
        let body = self.to_string();
        let flags = self.trackers();
        match body.strip_suffix(']') {
            Some(open) if flags.any() => format!("{open}{flags}]"),
            _ => body,
        }
    }
}

impl EncodedText {
    /// The encoded words, skipping separators.
    pub fn words(&self) -> impl Iterator<Item = &EncodedWord> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Word(w) => Some(w),
            Segment::Space => None,
        })
    }

    pub fn render_with_trackers(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Word(w) => w.render_with_trackers(),
                Segment::Space => " ".to_string(),
            })
            .collect()
    }
}

impl fmt::Display for EncodedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        if !self.marks.is_empty() {
            let marks = self
                .marks
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "({marks})")?;
        }
        Ok(())
    }
}

impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self
            .units
            .iter()
            .map(|u| u.to_string())
            .collect::<Vec<_>>()
            .join(UNIT_SEPARATOR);
        write!(f, "[{units}]")
    }
}

impl fmt::Display for EncodedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.segments {
            match s {
                Segment::Word(w) => write!(f, "{w}")?,
                Segment::Space => f.write_str(" ")?,
            }
        }
        Ok(())
    }
}
