//! URL query string access (`key=value&key2=value2`).

use heapless::{String, Vec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// A `%` escape is not followed by two hex digits
    InvalidEscape,
    /// Decoded bytes are not valid UTF-8
    InvalidUtf8,
    /// Decoded value does not fit the output buffer
    Overflow,
}

/// Borrowed view over a raw query string.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    raw: &'a str,
}

impl<'a> Query<'a> {
    pub const fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub const fn empty() -> Self {
        Self { raw: "" }
    }

    /// Iterate over `(key, raw value)` pairs. A key without `=` has an empty value.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.raw
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
    }

    /// Raw value of the first pair with this key.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Decimal value of the first pair with this key.
    ///
    /// Returns `None` when the key is missing or the value is not a number.
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse::<u32>().ok())
    }

    /// Percent-decoded value of the first pair with this key.
    pub fn get_decoded<const N: usize>(&self, key: &str) -> Option<Result<String<N>, QueryError>> {
        self.get(key).map(|raw| {
            let mut out = String::new();
            decode_into(raw, &mut out).map(|()| out)
        })
    }
}

/// Percent-decode `raw` into `out`, treating `+` as a space.
pub fn decode_into<const N: usize>(raw: &str, out: &mut String<N>) -> Result<(), QueryError> {
    let mut bytes = Vec::<u8, N>::new();
    let mut input = raw.bytes();
    while let Some(b) = input.next() {
        let decoded = match b {
            b'+' => b' ',
            b'%' => {
                let hi = input.next().and_then(hex_value);
                let lo = input.next().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => (hi << 4) | lo,
                    _ => return Err(QueryError::InvalidEscape),
                }
            }
            other => other,
        };
        bytes.push(decoded).map_err(|_| QueryError::Overflow)?;
    }

    let text = core::str::from_utf8(&bytes).map_err(|_| QueryError::InvalidUtf8)?;
    out.clear();
    out.push_str(text).map_err(|()| QueryError::Overflow)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_key_wins() {
        let query = Query::new("red=10&green=20&red=30");
        assert_eq!(query.get("red"), Some("10"));
        assert_eq!(query.get("green"), Some("20"));
        assert_eq!(query.get("blue"), None);
    }

    #[test]
    fn keys_match_exactly() {
        let query = Query::new("reddish=1&red=2");
        assert_eq!(query.get("red"), Some("2"));
    }

    #[test]
    fn numbers_are_parsed_and_garbage_is_ignored() {
        let query = Query::new("speed=42&bright=abc&strip=");
        assert_eq!(query.get_u32("speed"), Some(42));
        assert_eq!(query.get_u32("bright"), None);
        assert_eq!(query.get_u32("strip"), None);
    }

    #[test]
    fn flag_without_value_is_present() {
        let query = Query::new("power&x=1");
        assert_eq!(query.get("power"), Some(""));
    }

    #[test]
    fn empty_pairs_are_skipped() {
        let query = Query::new("&&a=1&");
        assert_eq!(query.pairs().count(), 1);
    }

    #[test]
    fn percent_escapes_are_decoded() {
        let query = Query::new("name=Kitchen+Shelf%20%C3%A4");
        let name: String<32> = query.get_decoded("name").unwrap().unwrap();
        assert_eq!(name.as_str(), "Kitchen Shelf ä");
    }

    #[test]
    fn broken_escape_is_an_error() {
        let mut out = String::<8>::new();
        assert_eq!(decode_into("%G1", &mut out), Err(QueryError::InvalidEscape));
        assert_eq!(decode_into("%4", &mut out), Err(QueryError::InvalidEscape));
    }

    #[test]
    fn long_value_overflows() {
        let mut out = String::<4>::new();
        assert_eq!(decode_into("abcdef", &mut out), Err(QueryError::Overflow));
    }
}
