// Translation lookup keyed by book, verse and word index.

use crate::corpus::Corpus;

/// Source of translated verse text.
pub trait TranslationLookup {
    /// Translated text of a whole verse.
    fn verse_text(&self, book: u32, verse: u32) -> Option<&str>;

    /// Translated 1-based `word` of a verse, by whitespace position.
    ///
    /// Word positions in a translation rarely line up with the source text,
    /// so this is an approximation at best.
    fn word(&self, book: u32, verse: u32, word: u32) -> Option<&str> {
        let n = usize::try_from(word).ok()?.checked_sub(1)?;
        self.verse_text(book, verse)?.split_whitespace().nth(n)
    }
}

impl TranslationLookup for Corpus {
    fn verse_text(&self, book: u32, verse: u32) -> Option<&str> {
        self.book(book)?.verse(verse).map(|v| v.text.as_str())
    }

    fn word(&self, book: u32, verse: u32, word: u32) -> Option<&str> {
        self.book(book)?.verse(verse)?.word(word)
    }
}
