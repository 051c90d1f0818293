//! Value sanitizers.
//!
//! Every sanitizer is a plain `ExtractedValue -> ExtractedValue` function so it
//! can sit in a [`crate::Pipeline`] or inside [`crate::compose!`]. Sanitizers
//! never fail; input they cannot handle becomes [`ExtractedValue::Null`].

use std::sync::LazyLock;

use regex::Regex;

use crate::value::{ExtractedValue, Record};

static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:)?//").expect("scheme prefix pattern is valid"));

static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*:)?//[^/]").expect("absolute url pattern is valid")
});

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("numeric filter pattern is valid"));

/// Signature shared by every named sanitizer.
pub type Sanitizer = fn(ExtractedValue) -> ExtractedValue;

/// Rewrites a leading `http://`, `https://` or `//` to `https://`.
///
/// Text without such a prefix is returned unchanged; non-text becomes `Null`.
pub fn enforce_https(value: ExtractedValue) -> ExtractedValue {
    match value {
        ExtractedValue::Text(url) => ExtractedValue::Text(SCHEME_PREFIX.replace(&url, "https://").into_owned()),
        _ => ExtractedValue::Null,
    }
}

/// Strips everything but digits, `-` and `.` from text. Numbers pass through.
pub fn sanitize_numeric_string(value: ExtractedValue) -> ExtractedValue {
    match value {
        ExtractedValue::Text(s) => ExtractedValue::Text(NON_NUMERIC.replace_all(&s, "").into_owned()),
        n @ (ExtractedValue::Integer(_) | ExtractedValue::Float(_)) => n,
        _ => ExtractedValue::Null,
    }
}

/// Parses the leading integer of a text value.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. Floats are truncated. Anything without a leading integer, empty
/// text included, is `Null`: an unavailable number, never zero.
pub fn parse_integer(value: ExtractedValue) -> ExtractedValue {
    match value {
        ExtractedValue::Text(s) => leading_integer(&s).map_or(ExtractedValue::Null, ExtractedValue::Integer),
        ExtractedValue::Integer(n) => ExtractedValue::Integer(n),
        ExtractedValue::Float(f) if f.is_finite() => ExtractedValue::Integer(f.trunc() as i64),
        _ => ExtractedValue::Null,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(matches!(s.as_bytes().first(), Some(b'-' | b'+')));
    let digits = &s[sign_len..];

    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    s[..sign_len + end].parse().ok()
}

/// Removes `Null` entries from a list. Non-lists become an empty list.
pub fn drop_nulls(value: ExtractedValue) -> ExtractedValue {
    match value {
        ExtractedValue::List(items) => ExtractedValue::List(items.into_iter().filter(|v| !v.is_null()).collect()),
        _ => ExtractedValue::List(Vec::new()),
    }
}

/// Folds a list of single-key records into one record.
///
/// Later entries overwrite earlier ones on key collision while the key keeps
/// the position of its first occurrence. Entries that are not records are
/// skipped. Run [`drop_nulls`] first; [`from_pairs_to_record`] does both.
pub fn merge_keyed_fragments(value: ExtractedValue) -> ExtractedValue {
    let ExtractedValue::List(items) = value else {
        return ExtractedValue::Record(Record::new());
    };

    let merged = items
        .into_iter()
        .filter_map(ExtractedValue::into_record)
        .fold(Record::new(), |mut acc, pair| {
            acc.extend(pair);
            acc
        });

    ExtractedValue::Record(merged)
}

/// Drops unresolved fragments, then merges the rest into one record.
pub fn from_pairs_to_record(value: ExtractedValue) -> ExtractedValue {
    crate::compose!(merge_keyed_fragments, drop_nulls)(value)
}

pub fn lowercase(value: ExtractedValue) -> ExtractedValue {
    match value {
        ExtractedValue::Text(s) => ExtractedValue::Text(s.to_lowercase()),
        _ => ExtractedValue::Null,
    }
}

pub fn trim(value: ExtractedValue) -> ExtractedValue {
    match value {
        ExtractedValue::Text(s) => ExtractedValue::Text(s.trim().to_string()),
        _ => ExtractedValue::Null,
    }
}

/// Resolves a path-only URL against `base`, with exactly one `/` between them.
///
/// URLs that already carry a scheme, or a `//` directly followed by a host, are
/// left alone. Non-text becomes `Null`.
pub fn resolve_site_url(base: &str) -> impl Fn(ExtractedValue) -> ExtractedValue + Send + Sync + 'static {
    let base = base.trim_end_matches('/').to_string();
    move |value| match value {
        ExtractedValue::Text(url) if ABSOLUTE_URL.is_match(&url) => ExtractedValue::Text(url),
        ExtractedValue::Text(path) => ExtractedValue::Text(format!("{}/{}", base, path.trim_start_matches('/'))),
        _ => ExtractedValue::Null,
    }
}

/// Converts a name such as `stack-overflow` or `linkedIn` to snake_case.
///
/// Words break at separators, at a lower to upper case change, between
/// letters and digits, and before the last capital of an acronym run, so
/// `500px` is `500_px` and `HTMLParser` is `html_parser`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            prev = None;
            continue;
        }

        let boundary = match prev {
            None => !out.is_empty(),
            Some(p) => {
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                p.is_ascii_digit() != ch.is_ascii_digit()
                    || (p.is_lowercase() && ch.is_uppercase())
                    || (p.is_uppercase() && ch.is_uppercase() && next_lower)
            }
        };
        if boundary {
            out.push('_');
        }

        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }

    out
}

/// Looks up a sanitizer by its configuration name.
pub fn by_name(name: &str) -> Option<Sanitizer> {
    let sanitizer: Sanitizer = match name {
        "https" => enforce_https,
        "numeric" => sanitize_numeric_string,
        "integer" => parse_integer,
        "drop_nulls" => drop_nulls,
        "merge" => merge_keyed_fragments,
        "lowercase" => lowercase,
        "trim" => trim,
        _ => return None,
    };
    Some(sanitizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(s: &str) -> ExtractedValue {
        ExtractedValue::Text(s.to_string())
    }

    #[rstest]
    #[case("http://a.com", "https://a.com")]
    #[case("https://a.com", "https://a.com")]
    #[case("//a.com", "https://a.com")]
    #[case("//cdn.scotch.io/img.png?x=http://y", "https://cdn.scotch.io/img.png?x=http://y")]
    #[case("/tutorials/x", "/tutorials/x")]
    #[case("ftp://a.com", "ftp://a.com")]
    fn test_enforce_https(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(enforce_https(text(input)), text(expected));
    }

    #[test]
    fn test_enforce_https_non_text() {
        assert_eq!(enforce_https(ExtractedValue::Integer(42)), ExtractedValue::Null);
        assert_eq!(enforce_https(ExtractedValue::Null), ExtractedValue::Null);
    }

    #[rstest]
    #[case("1,234 views", "1234")]
    #[case("-3.5k", "-3.5")]
    #[case("none", "")]
    fn test_sanitize_numeric_string(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_numeric_string(text(input)), text(expected));
    }

    #[test]
    fn test_sanitize_numeric_passthrough() {
        assert_eq!(sanitize_numeric_string(ExtractedValue::Integer(7)), ExtractedValue::Integer(7));
        assert_eq!(sanitize_numeric_string(ExtractedValue::Float(1.5)), ExtractedValue::Float(1.5));
        assert_eq!(sanitize_numeric_string(vec!["1"].into()), ExtractedValue::Null);
    }

    #[rstest]
    #[case("1234", Some(1234))]
    #[case("  42abc", Some(42))]
    #[case("-17", Some(-17))]
    #[case("12.9", Some(12))]
    #[case("1-2", Some(1))]
    #[case("", None)]
    #[case("-", None)]
    #[case(".5", None)]
    #[case("99999999999999999999999", None)]
    #[case("-9223372036854775808", Some(i64::MIN))]
    #[case("+8", Some(8))]
    fn test_parse_integer(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_integer(text(input)), ExtractedValue::from(expected));
    }

    #[test]
    fn test_parse_integer_numbers() {
        assert_eq!(parse_integer(ExtractedValue::Float(3.99)), ExtractedValue::Integer(3));
        assert_eq!(parse_integer(ExtractedValue::Float(f64::NAN)), ExtractedValue::Null);
        assert_eq!(parse_integer(ExtractedValue::Null), ExtractedValue::Null);
    }

    #[test]
    fn test_numeric_text_to_integer() {
        let value = parse_integer(sanitize_numeric_string(text("1,234 views")));
        assert_eq!(value, ExtractedValue::Integer(1234));
    }

    #[test]
    fn test_drop_nulls() {
        let input = ExtractedValue::List(vec![
            ExtractedValue::Integer(1),
            ExtractedValue::Null,
            ExtractedValue::Integer(2),
            ExtractedValue::Null,
        ]);
        assert_eq!(drop_nulls(input), vec![1i64, 2].into());
        assert_eq!(drop_nulls(text("nope")), ExtractedValue::List(vec![]));
    }

    #[test]
    fn test_merge_keyed_fragments_later_wins_first_order() {
        let input = ExtractedValue::List(vec![
            ExtractedValue::singleton("a", 1i64.into()),
            ExtractedValue::singleton("b", 2i64.into()),
            ExtractedValue::singleton("a", 3i64.into()),
        ]);

        let merged = merge_keyed_fragments(input).into_record().unwrap();
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(merged["a"], ExtractedValue::Integer(3));
        assert_eq!(merged["b"], ExtractedValue::Integer(2));
    }

    #[test]
    fn test_merge_non_list() {
        assert_eq!(merge_keyed_fragments(ExtractedValue::Null), ExtractedValue::Record(Record::new()));
    }

    #[test]
    fn test_from_pairs_drops_unresolved() {
        let input = ExtractedValue::List(vec![
            ExtractedValue::Null,
            ExtractedValue::singleton("github", "https://github.com/x".into()),
            ExtractedValue::Null,
        ]);

        let merged = from_pairs_to_record(input).into_record().unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["github"], text("https://github.com/x"));
    }

    #[rstest]
    #[case("/tutorials/x", "https://scotch.io/tutorials/x")]
    #[case("tutorials/x", "https://scotch.io/tutorials/x")]
    #[case("///tutorials/x", "https://scotch.io/tutorials/x")]
    #[case("https://other.io/a", "https://other.io/a")]
    #[case("//cdn.scotch.io/a.png", "//cdn.scotch.io/a.png")]
    #[case("/search?next=http://x.io", "https://scotch.io/search?next=http://x.io")]
    fn test_resolve_site_url(#[case] input: &str, #[case] expected: &str) {
        let resolve = resolve_site_url("https://scotch.io/");
        assert_eq!(resolve(text(input)), text(expected));
    }

    #[rstest]
    #[case("twitter", "twitter")]
    #[case("stack-overflow", "stack_overflow")]
    #[case("linkedIn", "linked_in")]
    #[case("Google Plus", "google_plus")]
    #[case("500px", "500_px")]
    #[case("google-plus2", "google_plus_2")]
    #[case("HTMLParser", "html_parser")]
    fn test_snake_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_case(input), expected);
    }

    #[test]
    fn test_by_name() {
        let https = by_name("https").unwrap();
        assert_eq!(https(text("//a.com")), text("https://a.com"));
        assert!(by_name("uppercase").is_none());
    }
}
