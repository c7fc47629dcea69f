//! Validation of XML names.
//!
//! The encoder lets callers pick the element and attribute names that appear
//! in its output, and column names flow straight into attribute names when the
//! attribute format is selected. None of those strings are under the crate's
//! control, so they are checked against the `Name` production of XML 1.0
//! before anything is written.

/// Returns `true` when `name` matches the XML 1.0 `Name` production.
///
/// An empty string is not a name. Colons are accepted, as the grammar allows
/// them; namespace well-formedness is the caller's concern.
///
/// # Examples
///
/// ```
/// use xmlify_rs::core::name::is_valid_xml_name;
///
/// assert!(is_valid_xml_name("col"));
/// assert!(is_valid_xml_name("_x2009"));
/// assert!(is_valid_xml_name("année"));
///
/// assert!(!is_valid_xml_name(""));
/// assert!(!is_valid_xml_name("2col"));
/// assert!(!is_valid_xml_name("first name"));
/// ```
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(ch: char) -> bool {
    matches!(ch,
        ':'
        | '_'
        | 'A'..='Z'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(ch: char) -> bool {
    is_name_start_char(ch)
        || matches!(ch,
            '-'
            | '.'
            | '0'..='9'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ascii_names() {
        for name in ["row", "col", "name", "null", "a", "_tag", "ns:row"] {
            assert!(is_valid_xml_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn accepts_digits_and_punctuation_after_the_first_char() {
        for name in ["col1", "x-ray", "a.b", "v2.0-rc"] {
            assert!(is_valid_xml_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn accepts_names_outside_ascii() {
        for name in ["année", "名前", "Ω", "größe"] {
            assert!(is_valid_xml_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_empty_and_bad_start_chars() {
        for name in ["", "1col", "-col", ".col", " col"] {
            assert!(!is_valid_xml_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn rejects_forbidden_interior_chars() {
        for name in ["first name", "a\tb", "a<b", "a&b", "a\"b", "a/b"] {
            assert!(!is_valid_xml_name(name), "{name:?} should be rejected");
        }
    }
}
