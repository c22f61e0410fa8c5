// Immutable book/verse tree and its XML loader.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::CorpusError;

const BOOK_TAG: &[u8] = b"sura";
const VERSE_TAG: &[u8] = b"aya";
const INDEX_ATTR: &[u8] = b"index";
const TEXT_ATTR: &[u8] = b"text";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const ROOT_CLOSE: &str = "</quran>";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// One verse: its index within the book and its space-separated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub index: u32,
    pub text: String,
}

impl Verse {
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self { index, text: text.into() }
    }

    /// Words of the verse, split on whitespace.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// The 1-based `n`th word.
    pub fn word(&self, n: u32) -> Option<&str> {
        let n = usize::try_from(n).ok()?.checked_sub(1)?;
        self.words().nth(n)
    }
}

/// One book with its verses in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub index: u32,
    pub verses: Vec<Verse>,
}

impl Book {
    pub fn new(index: u32, verses: Vec<Verse>) -> Self {
        Self { index, verses }
    }

    /// The 1-based `n`th verse. Verse indices are dense, so position and
    /// index agree.
    pub fn verse(&self, n: u32) -> Option<&Verse> {
        let n = usize::try_from(n).ok()?.checked_sub(1)?;
        self.verses.get(n)
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }
}

/// Read-only corpus: an ordered list of books with lookup by book index.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    books: Vec<Book>,
    by_index: HashMap<u32, usize>,
}

impl Corpus {
    /// Build a corpus from books. When two books share an index, the first
    /// one wins lookups.
    pub fn new(books: Vec<Book>) -> Self {
        let mut by_index = HashMap::new();
        for (pos, book) in books.iter().enumerate() {
            by_index.entry(book.index).or_insert(pos);
        }
        Self { books, by_index }
    }

    /// Build a corpus from `(book index, verse texts)` pairs, numbering verses
    /// from 1.
    pub fn from_texts<I, S>(books: I) -> Self
    where
        I: IntoIterator<Item = (u32, Vec<S>)>,
        S: Into<String>,
    {
        let books = books
            .into_iter()
            .map(|(index, texts)| {
                let verses = texts
                    .into_iter()
                    .zip(1u32..)
                    .map(|(text, n)| Verse::new(n, text))
                    .collect();
                Book::new(index, verses)
            })
            .collect();
        Self::new(books)
    }

    pub fn book(&self, index: u32) -> Option<&Book> {
        self.by_index.get(&index).map(|&pos| &self.books[pos])
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn verse_count(&self) -> usize {
        self.books.iter().map(Book::verse_count).sum()
    }

    /// Read a corpus file, normalize it and parse it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        let corpus = Self::from_xml(&normalize_document(&content))?;
        log::info!(
            "loaded {} books ({} verses) from {}",
            corpus.len(),
            corpus.verse_count(),
            path.display()
        );
        Ok(corpus)
    }

    /// Parse a `<sura index><aya index text/></sura>` document.
    pub fn from_xml(xml: &str) -> Result<Self, CorpusError> {
        let mut reader = Reader::from_str(xml);
        let mut books = Vec::new();
        let mut current: Option<Book> = None;
        let mut depth = 0usize;
        let mut saw_element = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    saw_element = true;
                    let name = e.name();
                    if name.as_ref() == BOOK_TAG {
                        if current.is_some() {
                            return Err(CorpusError::invalid("nested <sura> element"));
                        }
                        current = Some(Book::new(read_index(e, "sura")?, Vec::new()));
                    } else if name.as_ref() == VERSE_TAG {
                        push_verse(current.as_mut(), e)?;
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    saw_element = true;
                    let name = e.name();
                    if name.as_ref() == BOOK_TAG {
                        if current.is_some() {
                            return Err(CorpusError::invalid("nested <sura> element"));
                        }
                        books.push(Book::new(read_index(e, "sura")?, Vec::new()));
                    } else if name.as_ref() == VERSE_TAG {
                        push_verse(current.as_mut(), e)?;
                    }
                }
                Ok(Event::End(ref e)) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| CorpusError::invalid("unmatched closing tag"))?;
                    if e.name().as_ref() == BOOK_TAG {
                        if let Some(book) = current.take() {
                            books.push(book);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(CorpusError::invalid(format!(
                        "at byte {}: {e}",
                        reader.buffer_position()
                    )))
                }
                _ => {}
            }
        }

        if !saw_element {
            return Err(CorpusError::invalid("no root element"));
        }
        if depth != 0 {
            return Err(CorpusError::invalid(format!(
                "unexpected end of document with {depth} unclosed element(s)"
            )));
        }

        Ok(Self::new(books))
    }
}

fn push_verse(book: Option<&mut Book>, e: &BytesStart) -> Result<(), CorpusError> {
    let index = read_index(e, "aya")?;
    let text = read_attr(e, TEXT_ATTR)?.unwrap_or_default();
    match book {
        Some(book) => book.verses.push(Verse::new(index, text)),
        None => log::warn!("ignoring <aya index=\"{index}\"> outside of any <sura>"),
    }
    Ok(())
}

fn read_index(e: &BytesStart, tag: &str) -> Result<u32, CorpusError> {
    let raw = read_attr(e, INDEX_ATTR)?
        .ok_or_else(|| CorpusError::invalid(format!("<{tag}> without an index attribute")))?;
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CorpusError::invalid(format!("<{tag}> has a non-numeric index '{raw}'")))
}

fn read_attr(e: &BytesStart, key: &[u8]) -> Result<Option<String>, CorpusError> {
    let attr = e
        .try_get_attribute(key)
        .map_err(|err| CorpusError::invalid(err.to_string()))?;
    match attr {
        Some(a) => {
            let value = a
                .unescape_value()
                .map_err(|err| CorpusError::invalid(err.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// Clean up a raw corpus file: strip a byte-order mark and surrounding
/// whitespace, add an XML declaration if missing, and close the root element
/// if the file never does.
pub fn normalize_document(content: &str) -> String {
    let content = content.trim_matches(BYTE_ORDER_MARK).trim();
    let mut doc = String::with_capacity(content.len() + XML_DECLARATION.len() + ROOT_CLOSE.len() + 2);
    if !content.starts_with("<?xml") {
        doc.push_str(XML_DECLARATION);
        doc.push('\n');
    }
    doc.push_str(content);
    if !content.contains(ROOT_CLOSE) {
        doc.push('\n');
        doc.push_str(ROOT_CLOSE);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<quran>
  <sura index="1" name="first">
    <aya index="1" text="a b c"/>
    <aya index="2" text="d e"/>
  </sura>
  <sura index="2">
    <aya index="1" text="f &amp; g"></aya>
  </sura>
</quran>"#;

    #[test]
    fn test_from_xml() {
        let corpus = Corpus::from_xml(SAMPLE).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.verse_count(), 3);
        let book = corpus.book(1).unwrap();
        assert_eq!(book.verse_count(), 2);
        assert_eq!(book.verse(2).unwrap().text, "d e");
        assert_eq!(corpus.book(2).unwrap().verse(1).unwrap().text, "f & g");
        assert!(corpus.book(3).is_none());
    }

    #[test]
    fn test_verse_lookup_bounds() {
        let corpus = Corpus::from_xml(SAMPLE).unwrap();
        let book = corpus.book(1).unwrap();
        assert!(book.verse(0).is_none());
        assert!(book.verse(3).is_none());
    }

    #[test]
    fn test_word_lookup() {
        let verse = Verse::new(1, "  alpha   beta gamma ");
        assert_eq!(verse.word(1), Some("alpha"));
        assert_eq!(verse.word(3), Some("gamma"));
        assert_eq!(verse.word(0), None);
        assert_eq!(verse.word(4), None);
    }

    #[test]
    fn test_missing_text_is_empty() {
        let corpus = Corpus::from_xml(r#"<q><sura index="1"><aya index="1"/></sura></q>"#).unwrap();
        assert_eq!(corpus.book(1).unwrap().verse(1).unwrap().text, "");
    }

    #[test]
    fn test_duplicate_book_first_wins() {
        let corpus = Corpus::from_texts(vec![(1, vec!["first"]), (1, vec!["second"])]);
        assert_eq!(corpus.book(1).unwrap().verse(1).unwrap().text, "first");
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_malformed_xml() {
        let err = Corpus::from_xml("<quran><sura index=\"1\"></quran>").unwrap_err();
        assert!(matches!(err, CorpusError::InvalidDocument { .. }));
    }

    #[test]
    fn test_nested_book_rejected() {
        for xml in [
            r#"<q><sura index="1"><sura index="2"></sura></sura></q>"#,
            r#"<q><sura index="1"><sura index="2"/></sura></q>"#,
        ] {
            let err = Corpus::from_xml(xml).unwrap_err();
            assert!(err.to_string().contains("nested"), "{xml}: got {err:?}");
        }
        let corpus = Corpus::from_xml(r#"<q><sura index="1"/><sura index="2"/></q>"#).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_unclosed_root() {
        let err = Corpus::from_xml("<quran><sura index=\"1\"></sura>").unwrap_err();
        assert!(matches!(err, CorpusError::InvalidDocument { .. }));
    }

    #[test]
    fn test_no_root_element() {
        let err = Corpus::from_xml("just some text").unwrap_err();
        assert!(matches!(err, CorpusError::InvalidDocument { .. }));
    }

    #[test]
    fn test_missing_index() {
        let err = Corpus::from_xml("<quran><sura><aya index=\"1\" text=\"x\"/></sura></quran>")
            .unwrap_err();
        assert!(err.to_string().contains("without an index"));
    }

    #[test]
    fn test_non_numeric_index() {
        let err = Corpus::from_xml("<quran><sura index=\"one\"></sura></quran>").unwrap_err();
        assert!(err.to_string().contains("non-numeric"));
    }

    #[test]
    fn test_normalize_adds_declaration_and_root_close() {
        let doc = normalize_document("\u{feff}  <quran><sura index=\"1\"></sura>\n");
        assert!(doc.starts_with(XML_DECLARATION));
        assert!(doc.ends_with("</quran>"));
        let corpus = Corpus::from_xml(&doc).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_normalize_leaves_complete_document() {
        assert_eq!(normalize_document(SAMPLE), SAMPLE);
    }

    #[test]
    fn test_normalize_empty_is_invalid() {
        let doc = normalize_document("");
        assert!(Corpus::from_xml(&doc).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Corpus::load("/nonexistent/qdf/corpus.xml").unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
