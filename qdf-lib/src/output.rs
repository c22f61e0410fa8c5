// Output formatting for resolved filters.
//
// `render` walks a result list once and lays it out the same way for every
// renderer; a `Render` implementation only decides how a verse's or a word
// selection's text is shown.

use crate::encoder;
use crate::translation::TranslationLookup;
use crate::types::*;

pub const NOT_AVAILABLE: &str = "[Translation not available]";

/// Text of one verse or word selection, as a renderer shows it.
pub trait Render {
    fn verse(&self, book: u32, number: u32, text: &str) -> String;
    fn words(&self, selection: &WordResult) -> String;
}

/// The corpus text as-is.
pub struct Plain;

impl Render for Plain {
    fn verse(&self, _book: u32, _number: u32, text: &str) -> String {
        text.to_string()
    }

    fn words(&self, selection: &WordResult) -> String {
        selection.text.clone()
    }
}

/// The encoded notation, optionally with tracker flags.
#[derive(Default)]
pub struct Digitized {
    pub trackers: bool,
}

impl Digitized {
    fn encode(&self, text: &str) -> String {
        if self.trackers {
            encoder::encode_with_trackers(text)
        } else {
            encoder::encode(text)
        }
    }
}

impl Render for Digitized {
    fn verse(&self, _book: u32, _number: u32, text: &str) -> String {
        self.encode(text)
    }

    fn words(&self, selection: &WordResult) -> String {
        self.encode(&selection.text)
    }
}

/// Text looked up in a translation, by verse and by word position.
pub struct Translated<'a, T: TranslationLookup> {
    pub lookup: &'a T,
}

impl<T: TranslationLookup> Render for Translated<'_, T> {
    fn verse(&self, book: u32, number: u32, _text: &str) -> String {
        self.lookup
            .verse_text(book, number)
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    }

    fn words(&self, selection: &WordResult) -> String {
        selection
            .words
            .iter()
            .map(|&i| {
                self.lookup
                    .word(selection.book, selection.verse, i)
                    .unwrap_or(NOT_AVAILABLE)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lay out results as text.
///
/// A `Book N:` header opens each run of results from the same book; verses
/// are one per line as `N. text`; word selections run inline.
pub fn render(results: &[ResultNode], renderer: &dyn Render) -> String {
    let mut out = String::new();
    let mut current_book: Option<u32> = None;

    for node in results {
        match node {
            ResultNode::Book(b) => {
                open_book(&mut out, &mut current_book, b.number, format!("Book {}:", b.number));
                for v in &b.content {
                    push_verse(&mut out, v, renderer);
                }
            }
            ResultNode::Verse(v) => {
                open_book(&mut out, &mut current_book, v.book, format!("Book {}:", v.book));
                push_verse(&mut out, v, renderer);
            }
            ResultNode::Word(w) => {
                let header = format!("Book {}, Verse {}:", w.book, w.verse);
                open_book(&mut out, &mut current_book, w.book, header);
                out.push_str(&renderer.words(w));
                out.push(' ');
            }
        }
    }

    out.trim().to_string()
}

fn open_book(out: &mut String, current: &mut Option<u32>, book: u32, header: String) {
    if *current != Some(book) {
        out.push_str("\n\n");
        out.push_str(&header);
        out.push('\n');
        *current = Some(book);
    }
}

fn push_verse(out: &mut String, v: &VerseResult, renderer: &dyn Render) {
    out.push_str(&format!("{}. {}\n", v.number, renderer.verse(v.book, v.number, &v.text)));
}

/// Serialize results as JSON.
pub fn to_json(results: &[ResultNode], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string(results)
    }
}
