//! Secret spec parser
//!
//! A spec is a comma-separated list of `path#key#name` entries:
//!
//! ```text
//! secret/db#password#DB_PASS, secret/api#token#API_KEY
//! ```
//!
//! There is no escaping for a literal `#` or `,`.

use vaultenv_errors::ParseError;

use crate::SecretRef;

/// Parse a spec into secret references, in spec order.
///
/// Fails on the first malformed entry without returning partial results.
/// An empty or blank spec is rejected with [`ParseError::Empty`].
pub fn parse(spec: &str) -> Result<Vec<SecretRef>, ParseError> {
    if spec.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    spec.split(',').map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let refs = parse("secret/db#password#DB_PASS, secret/api#token#API_KEY,kv/x#y#Z").unwrap();

        let triples: Vec<_> = refs.iter().map(|r| (r.path(), r.key(), r.name())).collect();
        assert_eq!(
            triples,
            vec![
                ("secret/db", "password", "DB_PASS"),
                ("secret/api", "token", "API_KEY"),
                ("kv/x", "y", "Z"),
            ]
        );
        assert!(refs.iter().all(|r| !r.is_resolved()));
    }

    #[test]
    fn test_parse_round_trip() {
        let triples: Vec<(String, String, String)> = (0..25)
            .map(|i| (format!("secret/app{i}"), format!("field{i}"), format!("NAME_{i}")))
            .collect();
        let spec = triples
            .iter()
            .map(|(p, k, n)| format!("{p}#{k}#{n}"))
            .collect::<Vec<_>>()
            .join(" , ");

        let refs = parse(&spec).unwrap();
        assert_eq!(refs.len(), triples.len());
        for (secret, (p, k, n)) in refs.iter().zip(&triples) {
            assert_eq!(secret.path(), p);
            assert_eq!(secret.key(), k);
            assert_eq!(secret.name(), n);
        }
    }

    #[test]
    fn test_parse_single_entry() {
        let refs = parse("secret/db#password#DB_PASS").unwrap();
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_entry_among_good_ones() {
        for bad in ["secret/db", "secret/db#password", "a#b#c#d"] {
            let spec = format!("ok/one#k#ONE, {bad}, ok/two#k#TWO");
            assert_eq!(parse(&spec).unwrap_err(), ParseError::invalid_entry(bad));
        }
    }

    #[test]
    fn test_parse_empty_spec_is_error() {
        assert_eq!(parse("").unwrap_err(), ParseError::Empty);
        assert_eq!(parse("   ").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_parse_trailing_comma_is_error() {
        assert_eq!(
            parse("secret/db#password#DB_PASS,").unwrap_err(),
            ParseError::invalid_entry("")
        );
    }

    #[test]
    fn test_parse_allows_duplicate_names() {
        let refs = parse("a#k#SAME, b#k#SAME").unwrap();
        assert_eq!(refs[0].name(), refs[1].name());
    }
}
