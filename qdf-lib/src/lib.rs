pub mod types;
pub mod error;
pub mod grapheme;
pub mod encoder;
pub mod range;
pub mod address;
pub mod corpus;
pub mod filter;
pub mod translation;
pub mod output;

pub use address::parse_address;
pub use corpus::{Book, Corpus, Verse};
pub use encoder::{encode, encode_text, encode_with_trackers};
pub use error::{CorpusError, FilterError, QdfError};
pub use filter::{append_clause, format_clause, parse_filter, resolve, resolve_addresses, select_words};
pub use range::parse_range;
pub use translation::TranslationLookup;
pub use types::{Address, IndexRange, ResultNode};
