use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BASE_URL_REGEX: Regex =
        Regex::new(r"^(?P<base_url>[a-zA-Z][a-zA-Z0-9+.\-]*://[^/?#]+)").unwrap();
}

/// Returns the `scheme://authority` part of `url`, or an empty string for relative URLs.
pub fn base_url_of(url: &str) -> String {
    BASE_URL_REGEX
        .captures(url)
        .map(|captures| String::from(&captures["base_url"]))
        .unwrap_or_default()
}

pub fn contains_header_name<'a, I: IntoIterator<Item = &'a str>>(names: I, name: &str) -> bool {
    names
        .into_iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Escapes `value` so it can be placed between double quotes in the generated script.
pub fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '$' => escaped.push_str("$$"),
            c => escaped.push(c),
        }
    }

    escaped
}
