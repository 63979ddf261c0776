//! Character and name rules shared by the reader and the writer.
//!
//! Anything [`parse`](super::parse) accepts, [`serialize`](super::serialize)
//! can write back, so both directions check against these predicates.

/// Deepest element nesting accepted in either direction.
pub const MAX_DEPTH: usize = 1024;

/// Whether `c` is in the XML 1.0 `Char` production.
#[inline]
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

#[inline]
pub fn is_xml_chars(s: &str) -> bool {
    s.chars().all(is_xml_char)
}

/// Whether `s` consists of XML whitespace only (`S` production).
#[inline]
pub fn is_xml_whitespace(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Loose XML `Name` check: ASCII is validated strictly, anything above
/// U+007F is accepted as long as it is an XML character.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::is_xml_name;
/// assert!(is_xml_name("p:sldId"));
/// assert!(is_xml_name("_x"));
/// assert!(!is_xml_name("1bad"));
/// assert!(!is_xml_name("a b"));
/// assert!(!is_xml_name(""));
/// ```
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii());
    valid_start
        && chars.all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-' | '.') || !c.is_ascii()
        })
        && is_xml_chars(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_characters_rejected() {
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{7}'));
        assert!(!is_xml_char('\u{FFFE}'));
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('é'));
        assert!(!is_xml_chars("bell\u{7}"));
    }

    #[test]
    fn test_names() {
        assert!(is_xml_name("Relationship"));
        assert!(is_xml_name("a:t"));
        assert!(is_xml_name("xml-stylesheet.v2"));
        assert!(is_xml_name("名前"));
        assert!(!is_xml_name("-a"));
        assert!(!is_xml_name(".a"));
        assert!(!is_xml_name("a\u{1}"));
    }
}
