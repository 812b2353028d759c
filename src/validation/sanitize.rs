//! Sanitizers applied to every submission, valid or not

use chrono::NaiveDate;

use super::{parse_iso8601, FormInput};

/// Replace HTML-sensitive characters with entities
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trimmed and escaped first value of a field, empty when absent
pub fn text(input: &FormInput, field: &str) -> String {
    input.value(field).map(|v| escape_html(v.trim())).unwrap_or_default()
}

/// Date value of a field; blank or unparseable values become `None`
pub fn date(input: &FormInput, field: &str) -> Option<NaiveDate> {
    input.value(field).and_then(parse_iso8601)
}

/// Every value of a multi-valued field, trimmed and escaped.
///
/// An absent field yields an empty list and a single value a one-element list.
pub fn list(input: &FormInput, field: &str) -> Vec<String> {
    input
        .values(field)
        .iter()
        .map(|v| escape_html(v.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;&#x2F;b&gt;"
        );
        assert_eq!(escape_html("Sci-Fi"), "Sci-Fi");
    }

    #[test]
    fn test_text_trims_then_escapes() {
        let input = FormInput::from_pairs([("name", "  Sci-Fi  "), ("title", " a<b ")]);
        assert_eq!(text(&input, "name"), "Sci-Fi");
        assert_eq!(text(&input, "title"), "a&lt;b");
        assert_eq!(text(&input, "missing"), "");
    }

    #[test]
    fn test_date() {
        let input = FormInput::from_pairs([("a", "1999-12-31"), ("b", ""), ("c", "never")]);
        assert_eq!(date(&input, "a"), NaiveDate::from_ymd_opt(1999, 12, 31));
        assert_eq!(date(&input, "b"), None);
        assert_eq!(date(&input, "c"), None);
        assert_eq!(date(&input, "d"), None);
    }

    #[test]
    fn test_list_coerces_to_array() {
        let none = FormInput::new();
        assert!(list(&none, "genre").is_empty());

        let one = FormInput::from_pairs([("genre", " x ")]);
        assert_eq!(list(&one, "genre"), vec!["x".to_string()]);

        let many = FormInput::from_pairs([("genre", "x"), ("genre", "y")]);
        assert_eq!(list(&many, "genre"), vec!["x".to_string(), "y".to_string()]);
    }
}
