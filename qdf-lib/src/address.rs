// Clause addresses: "book", "book:verses", "book:verse:words".

use crate::error::FilterError;
use crate::range::parse_range;
use crate::types::Address;

const PART_SEPARATOR: char = ':';

/// Parse one clause into an [`Address`].
///
/// Parts beyond the third are ignored. Any integer is accepted as a book or
/// verse number; one that names nothing is a lookup miss later on. A part
/// that is not an integer is a
/// [`FilterError::MalformedAddress`]; a bad range token is reported as
/// [`FilterError::MalformedRange`].
pub fn parse_address(clause: &str) -> Result<Address, FilterError> {
    let parts: Vec<&str> = clause.split(PART_SEPARATOR).collect();
    let book = parse_index(clause, "book", parts[0])?;

    match parts.len() {
        1 => Ok(Address::WholeBook { book }),
        2 => Ok(Address::VerseRange {
            book,
            verses: parse_range(parts[1])?,
        }),
        _ => Ok(Address::WordRange {
            book,
            verse: parse_index(clause, "verse", parts[1])?,
            words: parse_range(parts[2])?,
        }),
    }
}

fn parse_index(clause: &str, what: &str, part: &str) -> Result<i64, FilterError> {
    part.trim()
        .parse::<i64>()
        .map_err(|e| FilterError::MalformedAddress {
            clause: clause.to_string(),
            reason: format!("{what} '{}' is not a valid number ({e})", part.trim()),
        })
}
