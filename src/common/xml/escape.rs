use super::chars::is_xml_char;
use aho_corasick::AhoCorasick;
use memchr::memchr;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'", "\r"])
        .expect("Failed to build XML text escaper")
});

// Attribute values additionally protect whitespace from attribute-value normalization
static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'", "\r", "\n", "\t"])
        .expect("Failed to build XML attribute escaper")
});

/// Escape XML special characters in character data.
///
/// Carriage returns are written as character references so that they survive
/// end-of-line normalization when the text is read back.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&#13;"])
}

/// Escape an attribute value.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::escape_attr;
/// assert_eq!(escape_attr("a\tb"), "a&#9;b");
/// assert_eq!(escape_attr("line1\nline2"), "line1&#10;line2");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> String {
    ATTR_ESCAPER.replace_all(
        s,
        &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&#13;", "&#10;", "&#9;"],
    )
}

/// Resolve the body of an entity or character reference (the part between
/// `&` and `;`).
///
/// Only the five predefined entities and numeric character references are
/// known; anything else yields `None`. So does a numeric reference to a
/// code point XML does not allow (`&#1;`).
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp"), Some('&'));
/// assert_eq!(resolve_entity("#x41"), Some('A'));
/// assert_eq!(resolve_entity("#66"), Some('B'));
/// assert_eq!(resolve_entity("#0066"), Some('B'));
/// assert_eq!(resolve_entity("nbsp"), None);
/// assert_eq!(resolve_entity("#1"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x') {
                Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                },
                Some(_) => return None,
                None => atoi_simd::parse_pos::<u32, true>(num.as_bytes()).ok()?,
            };
            char::from_u32(code).filter(|&c| is_xml_char(c))
        },
    }
}

/// Unescape XML character data.
///
/// Replaces predefined entities and numeric character references. Returns the
/// offending reference as the error when a reference is unknown or
/// unterminated.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;").unwrap(), "<a & b>");
/// assert_eq!(unescape_xml("&#x263A;").unwrap(), "\u{263A}");
/// assert_eq!(unescape_xml("&amp;lt;").unwrap(), "&lt;"); // no double unescaping
/// assert!(unescape_xml("&invalid;").is_err());
/// assert!(unescape_xml("&amp").is_err()); // incomplete, no semicolon
/// ```
pub fn unescape_xml(s: &str) -> Result<Cow<'_, str>, String> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Ok(Cow::Borrowed(s));
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut rest = &s[first..];

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let semi = memchr(b';', tail.as_bytes())
            .ok_or_else(|| format!("unterminated reference '&{}'", tail))?;
        let name = &tail[..semi];
        let ch = resolve_entity(name).ok_or_else(|| format!("unknown reference '&{};'", name))?;
        out.push(ch);
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}
