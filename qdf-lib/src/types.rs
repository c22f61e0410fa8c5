use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// One letter with the diacritics attached to it, in stroke order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedUnit {
    pub letter: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<u8>,
}

/// The encoded units of one whitespace-delimited word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedWord {
    pub units: Vec<EncodedUnit>,
}

/// A piece of encoder output: a bracketed word or a single separator space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Word(EncodedWord),
    Space,
}

/// Structured encoder output. `Display` renders it untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedText {
    pub segments: Vec<Segment>,
}

/// Flags summarizing notable marks in an encoded word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trackers {
    pub shadda: bool,
    pub tanween: bool,
    pub ta_marbuta: bool,
}

impl Trackers {
    pub fn any(&self) -> bool {
        self.shadda || self.tanween || self.ta_marbuta
    }
}

impl fmt::Display for Trackers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shadda {
            f.write_str("S")?;
        }
        if self.tanween {
            f.write_str("T")?;
        }
        if self.ta_marbuta {
            f.write_str("M")?;
        }
        Ok(())
    }
}

/// Inclusive, ascending range of 1-based indices.
///
/// All empty ranges share one canonical representation, so `5-3` and the
/// empty token compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IndexRange {
    start: i64,
    end: i64,
}

impl IndexRange {
    pub const EMPTY: IndexRange = IndexRange { start: 1, end: 0 };

    pub fn new(start: i64, end: i64) -> Self {
        if end < start {
            Self::EMPTY
        } else {
            Self { start, end }
        }
    }

    pub fn single(n: i64) -> Self {
        Self { start: n, end: n }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end.abs_diff(self.start).saturating_add(1)
        }
    }

    /// The part of this range that falls inside `1..=count`.
    pub fn within(&self, count: usize) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self::new(self.start.max(1), self.end.min(count))
    }

    pub fn iter(&self) -> RangeInclusive<i64> {
        self.start..=self.end
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl IntoIterator for IndexRange {
    type Item = i64;
    type IntoIter = RangeInclusive<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            Ok(())
        } else if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A parsed filter clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Address {
    /// `b`: every verse of a book.
    WholeBook { book: i64 },
    /// `b:v` or `b:v1-v2`.
    VerseRange { book: i64, verses: IndexRange },
    /// `b:v:w` or `b:v:w1-w2`.
    WordRange { book: i64, verse: i64, words: IndexRange },
}

impl Address {
    pub fn book(&self) -> i64 {
        match *self {
            Address::WholeBook { book }
            | Address::VerseRange { book, .. }
            | Address::WordRange { book, .. } => book,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::WholeBook { book } => write!(f, "{book}"),
            Address::VerseRange { book, verses } => write!(f, "{book}:{verses}"),
            Address::WordRange { book, verse, words } => write!(f, "{book}:{verse}:{words}"),
        }
    }
}

/// A single verse pulled from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseResult {
    pub book: u32,
    pub number: u32,
    pub text: String,
}

/// A whole book, every verse in corpus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    pub number: u32,
    pub content: Vec<VerseResult>,
}

/// Selected words of one verse, combined into a single result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub book: u32,
    pub verse: u32,
    /// 1-based indices of the words that were found, in range order.
    pub words: Vec<u32>,
    /// The selected words joined by single spaces.
    pub text: String,
}

/// One entry of a resolved filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultNode {
    Book(BookResult),
    Verse(VerseResult),
    Word(WordResult),
}

impl ResultNode {
    /// Book number this result belongs to.
    pub fn book(&self) -> u32 {
        match self {
            ResultNode::Book(b) => b.number,
            ResultNode::Verse(v) => v.book,
            ResultNode::Word(w) => w.book,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ranges_are_equal() {
        assert_eq!(IndexRange::new(5, 3), IndexRange::EMPTY);
        assert!(IndexRange::EMPTY.is_empty());
        assert_eq!(IndexRange::EMPTY.len(), 0);
        assert_eq!(IndexRange::EMPTY.to_vec(), Vec::<i64>::new());
    }

    #[test]
    fn test_range_iteration() {
        let r = IndexRange::new(3, 5);
        assert_eq!(r.len(), 3);
        assert_eq!(r.to_vec(), vec![3, 4, 5]);
        assert_eq!(IndexRange::single(7).to_vec(), vec![7]);
    }

    #[test]
    fn test_range_within() {
        assert_eq!(IndexRange::new(0, 9).within(4), IndexRange::new(1, 4));
        assert_eq!(IndexRange::new(-5, -1).within(4), IndexRange::EMPTY);
        assert_eq!(IndexRange::new(6, 8).within(4), IndexRange::EMPTY);
        assert_eq!(IndexRange::new(2, i64::MAX).within(3).to_vec(), vec![2, 3]);
        assert!(IndexRange::single(1).within(0).is_empty());
    }

    #[test]
    fn test_huge_range_len() {
        assert_eq!(IndexRange::new(1, 4_294_967_296).len(), 4_294_967_296);
        assert_eq!(IndexRange::new(i64::MIN, i64::MAX).len(), u64::MAX);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(IndexRange::new(1, 3).to_string(), "1-3");
        assert_eq!(IndexRange::single(9).to_string(), "9");
        assert_eq!(IndexRange::EMPTY.to_string(), "");
    }

    #[test]
    fn test_address_display() {
        assert_eq!(Address::WholeBook { book: 2 }.to_string(), "2");
        let verses = Address::VerseRange { book: 2, verses: IndexRange::new(3, 4) };
        assert_eq!(verses.to_string(), "2:3-4");
        let words = Address::WordRange {
            book: 2,
            verse: 3,
            words: IndexRange::new(1, 2),
        };
        assert_eq!(words.to_string(), "2:3:1-2");
        assert_eq!(words.book(), 2);
    }

    #[test]
    fn test_trackers_display() {
        let t = Trackers { shadda: true, tanween: false, ta_marbuta: true };
        assert_eq!(t.to_string(), "SM");
        assert!(t.any());
        assert_eq!(Trackers::default().to_string(), "");
        assert!(!Trackers::default().any());
    }

    #[test]
    fn test_result_node_tag() {
        let node = ResultNode::Verse(VerseResult {
            book: 1,
            number: 2,
            text: "x".to_string(),
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "verse");
        assert_eq!(json["book"], 1);
        assert_eq!(json["number"], 2);
        let back: ResultNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
