// Range tokens: "", "n", "a-b".

use crate::error::FilterError;
use crate::types::IndexRange;

const RANGE_SEPARATOR: char = '-';

/// Parse a range token into an inclusive range.
///
/// An empty token is an empty range, as is `a-b` with `b < a`.
pub fn parse_range(token: &str) -> Result<IndexRange, FilterError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(IndexRange::EMPTY);
    }
    match token.split_once(RANGE_SEPARATOR) {
        Some((start, end)) => {
            let start = parse_bound(token, start)?;
            let end = parse_bound(token, end)?;
            Ok(IndexRange::new(start, end))
        }
        None => Ok(IndexRange::single(parse_bound(token, token)?)),
    }
}

fn parse_bound(token: &str, bound: &str) -> Result<i64, FilterError> {
    bound
        .trim()
        .parse::<i64>()
        .map_err(|e| FilterError::MalformedRange {
            token: token.to_string(),
            reason: format!("'{}' is not a valid index ({e})", bound.trim()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(token: &str) -> Vec<i64> {
        parse_range(token).unwrap().to_vec()
    }

    #[test]
    fn test_span() {
        assert_eq!(range("3-5"), vec![3, 4, 5]);
        assert_eq!(range("1-1"), vec![1]);
    }

    #[test]
    fn test_reversed_span_is_empty() {
        assert_eq!(range("5-3"), Vec::<i64>::new());
        assert_eq!(parse_range("5-3").unwrap(), IndexRange::EMPTY);
    }

    #[test]
    fn test_single() {
        assert_eq!(range("7"), vec![7]);
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(range(""), Vec::<i64>::new());
        assert_eq!(range("   "), Vec::<i64>::new());
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(range(" 2 - 4 "), vec![2, 3, 4]);
    }

    #[test]
    fn test_huge_span_is_lazy() {
        let r = parse_range("1-4000000000").unwrap();
        assert_eq!(r.len(), 4_000_000_000);
        assert_eq!(r.iter().take(2).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_bounds_past_u32() {
        let r = parse_range("1-4294967296").unwrap();
        assert_eq!(r.len(), 4_294_967_296);
        assert_eq!(range("4294967296"), vec![4_294_967_296]);
    }

    #[test]
    fn test_malformed() {
        for bad in ["x", "1-", "-3", "a-2", "1-b", "1-2-3", "1.5", "+-"] {
            let err = parse_range(bad).unwrap_err();
            assert!(
                matches!(err, FilterError::MalformedRange { .. }),
                "{bad:?} should be a malformed range, got {err:?}"
            );
        }
    }
}
