// Compound filter resolution: "1,3;2:5;4:1:2-3" against a corpus.
//
// Groups are separated by ';' and clauses within a group by ','. Every clause
// is parsed before anything is resolved, so one malformed clause fails the
// whole filter. Lookup misses only ever drop that clause's contribution.

use crate::address::parse_address;
use crate::corpus::{Book, Corpus};
use crate::error::FilterError;
use crate::types::*;

const GROUP_SEPARATOR: char = ';';
const CLAUSE_SEPARATOR: char = ',';

/// Parse every clause of a filter string, in order.
pub fn parse_filter(filter: &str) -> Result<Vec<Address>, FilterError> {
    let mut addresses = Vec::new();
    for group in filter.split(GROUP_SEPARATOR) {
        for clause in group.split(CLAUSE_SEPARATOR) {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            addresses.push(parse_address(clause)?);
        }
    }
    Ok(addresses)
}

/// Parse and resolve a filter string against a corpus.
///
/// Results come back in clause order, without deduplication or sorting.
pub fn resolve(corpus: &Corpus, filter: &str) -> Result<Vec<ResultNode>, FilterError> {
    let addresses = parse_filter(filter)?;
    Ok(resolve_addresses(corpus, &addresses))
}

/// Resolve already-parsed addresses. Never fails; misses contribute nothing.
pub fn resolve_addresses(corpus: &Corpus, addresses: &[Address]) -> Vec<ResultNode> {
    let mut results = Vec::new();
    for address in addresses {
        log::debug!("resolving clause {address}");
        resolve_address(corpus, address, &mut results);
    }
    results
}

fn resolve_address(corpus: &Corpus, address: &Address, out: &mut Vec<ResultNode>) {
    let Some(book) = u32::try_from(address.book()).ok().and_then(|b| corpus.book(b)) else {
        log::warn!("book {} not found (clause {address})", address.book());
        return;
    };

    match *address {
        Address::WholeBook { .. } => out.push(ResultNode::Book(whole_book(book))),
        Address::VerseRange { verses, .. } => {
            let found = verses
                .within(book.verse_count())
                .iter()
                .filter_map(|i| u32::try_from(i).ok());
            for number in found {
                let Some(verse) = book.verse(number) else {
                    break;
                };
                out.push(ResultNode::Verse(VerseResult {
                    book: book.index,
                    number,
                    text: verse.text.clone(),
                }));
            }
        }
        Address::WordRange { verse, words, .. } => {
            let found = u32::try_from(verse)
                .ok()
                .and_then(|n| book.verse(n).map(|v| (n, v)));
            let Some((number, v)) = found else {
                log::warn!("verse {verse} not found in book {} (clause {address})", book.index);
                return;
            };
            let picked = words
                .within(v.words().count())
                .iter()
                .filter_map(|i| u32::try_from(i).ok());
            out.push(ResultNode::Word(select_words(book.index, number, &v.text, picked)));
        }
    }
}

fn whole_book(book: &Book) -> BookResult {
    BookResult {
        number: book.index,
        content: book
            .verses
            .iter()
            .map(|v| VerseResult {
                book: book.index,
                number: v.index,
                text: v.text.clone(),
            })
            .collect(),
    }
}

/// Combine the words of `text` at the given 1-based indices into one result.
///
/// `indices` must be ascending. Index 0 and indices past the last word are
/// skipped.
pub fn select_words<I>(book: u32, verse: u32, text: &str, indices: I) -> WordResult
where
    I: IntoIterator<Item = u32>,
{
    let all: Vec<&str> = text.split_whitespace().collect();
    let (indices, picked): (Vec<u32>, Vec<&str>) = indices
        .into_iter()
        .filter(|&i| i >= 1)
        .take_while(|&i| i as usize <= all.len())
        .map(|i| (i, all[i as usize - 1]))
        .unzip();
    WordResult {
        book,
        verse,
        words: indices,
        text: picked.join(" "),
    }
}

/// Build one clause from separate book, verse and word inputs.
///
/// Empty inputs count as absent. Words need a verse, and everything needs a
/// book. The result is checked with the clause parser before it is returned.
pub fn format_clause(
    book: Option<&str>,
    verse: Option<&str>,
    word: Option<&str>,
) -> Result<String, FilterError> {
    fn present(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    let book = present(book).ok_or(FilterError::MissingBook)?;

    let clause = match (present(verse), present(word)) {
        (None, None) => book.to_string(),
        (Some(v), None) => format!("{book}:{v}"),
        (None, Some(_)) => return Err(FilterError::WordWithoutVerse),
        (Some(v), Some(w)) => format!("{book}:{v}:{w}"),
    };
    parse_address(&clause)?;
    Ok(clause)
}

/// Append a clause to a running filter, keeping it `;`-terminated.
pub fn append_clause(filter: &str, clause: &str) -> String {
    let mut out = filter.to_string();
    if !out.is_empty() && !out.ends_with(GROUP_SEPARATOR) {
        out.push(GROUP_SEPARATOR);
    }
    out.push_str(clause);
    out.push(GROUP_SEPARATOR);
    out
}
