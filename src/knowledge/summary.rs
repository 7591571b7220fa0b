//! Summary-stage response parsing.

use super::FetchError;
use serde_json::Value;

/// Fields read from a page summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Canonical page title.
    pub title: Option<String>,
    /// Display title with markup stripped.
    pub display_title: Option<String>,
    /// Plain-text extract.
    pub extract: Option<String>,
    /// Desktop page URL.
    pub page_url: Option<String>,
    /// Cross-reference id for the entity stage.
    pub wikibase_item: Option<String>,
}

impl Summary {
    /// Read a summary document. Absent or non-string fields become `None`.
    pub fn from_json(document: &Value) -> Result<Self, FetchError> {
        if !document.is_object() {
            return Err(FetchError::Shape(
                "summary response is not a JSON object".to_string(),
            ));
        }

        Ok(Self {
            title: text_at(document, "/title"),
            display_title: text_at(document, "/displaytitle").map(|t| strip_markup(&t)),
            extract: text_at(document, "/extract"),
            page_url: text_at(document, "/content_urls/desktop/page"),
            wikibase_item: text_at(document, "/wikibase_item"),
        })
    }
}

/// Non-empty string at a JSON pointer.
fn text_at(document: &Value, pointer: &str) -> Option<String> {
    document
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Remove HTML tags such as `<i>`/`<span class=...>` from a display title.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    decode_entities(&out)
}

/// Decode named entities common in titles plus numeric references.
///
/// Unknown or malformed references are kept verbatim.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let decoded = candidate
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&candidate[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_summary() {
        let document = json!({
            "title": "Psidium guajava",
            "displaytitle": "<i>Psidium guajava</i>",
            "extract": "Psidium guajava, the common guava, is a small tree.",
            "wikibase_item": "Q156790",
            "content_urls": {
                "desktop": { "page": "https://en.wikipedia.org/wiki/Psidium_guajava" },
                "mobile": { "page": "https://en.m.wikipedia.org/wiki/Psidium_guajava" }
            }
        });

        let summary = Summary::from_json(&document).unwrap();
        assert_eq!(summary.title.as_deref(), Some("Psidium guajava"));
        assert_eq!(summary.display_title.as_deref(), Some("Psidium guajava"));
        assert_eq!(summary.wikibase_item.as_deref(), Some("Q156790"));
        assert_eq!(
            summary.page_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Psidium_guajava")
        );
    }

    #[test]
    fn test_missing_fields_are_none() {
        let summary = Summary::from_json(&json!({ "title": "Ti" })).unwrap();
        assert_eq!(summary.title.as_deref(), Some("Ti"));
        assert!(summary.extract.is_none());
        assert!(summary.page_url.is_none());
        assert!(summary.wikibase_item.is_none());
    }

    #[test]
    fn test_wrong_types_and_empty_strings_are_none() {
        let document = json!({
            "title": 42,
            "extract": "   ",
            "content_urls": { "desktop": "https://example.org" }
        });
        let summary = Summary::from_json(&document).unwrap();
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_non_object_is_shape_error() {
        assert!(matches!(
            Summary::from_json(&json!(["not", "a", "summary"])),
            Err(FetchError::Shape(_))
        ));
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<i>Cordyline fruticosa</i>"), "Cordyline fruticosa");
        assert_eq!(
            strip_markup("<span class=\"mw-page-title-main\">Ivy</span> tree"),
            "Ivy tree"
        );
        assert_eq!(strip_markup("plain"), "plain");
    }

    #[test]
    fn test_display_title_entities_are_decoded() {
        assert_eq!(
            strip_markup("<i>Pelargonium</i> &amp; allies"),
            "Pelargonium & allies"
        );
        assert_eq!(strip_markup("Painter&#39;s palette"), "Painter's palette");
        assert_eq!(strip_markup("Painter&#x27;s &lt;palette&gt;"), "Painter's <palette>");
        assert_eq!(strip_markup("AT&T; &bogus; & more"), "AT&T; &bogus; & more");
    }

    #[test]
    fn test_summary_display_title_decodes_entities() {
        let document = json!({ "title": "Caladium", "displaytitle": "<i>Caladium</i> &quot;bicolor&quot;" });
        let summary = Summary::from_json(&document).unwrap();
        assert_eq!(summary.display_title.as_deref(), Some("Caladium \"bicolor\""));
    }
}
