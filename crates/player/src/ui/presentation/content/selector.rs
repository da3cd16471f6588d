//! Minimal CSS selectors: `tag`, `.class`, `[attr]`, `[attr=value]` and
//! compounds of those (`li.entry[data-kind=spell]`).

use std::fmt;
use std::str::FromStr;

use super::tree::Element;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,
    #[error("Unsupported selector '{selector}': {reason}")]
    Unsupported { selector: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Tag(String),
    Class(String),
    HasAttribute(String),
    AttributeEquals(String, String),
}

/// A compound selector; every part must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    parts: Vec<Part>,
}

impl Selector {
    pub fn matches(&self, element: &Element) -> bool {
        self.parts.iter().all(|part| match part {
            Part::Tag(tag) => element.tag == *tag,
            Part::Class(class) => element.has_class(class),
            Part::HasAttribute(name) => element.attribute(name).is_some(),
            Part::AttributeEquals(name, value) => element.attribute(name) == Some(value.as_str()),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let unsupported = |reason: &str| SelectorError::Unsupported {
            selector: source.to_string(),
            reason: reason.to_string(),
        };
        if source.contains(char::is_whitespace) || source.contains(['>', '+', '~', ',']) {
            return Err(unsupported("combinators are not supported"));
        }

        let mut parts = Vec::new();
        let mut rest = source;

        let tag_len = rest
            .find(['.', '['])
            .unwrap_or(rest.len());
        if tag_len > 0 {
            parts.push(Part::Tag(rest[..tag_len].to_ascii_lowercase()));
            rest = &rest[tag_len..];
        }

        while !rest.is_empty() {
            if let Some(after_dot) = rest.strip_prefix('.') {
                let end = after_dot.find(['.', '[']).unwrap_or(after_dot.len());
                if end == 0 {
                    return Err(unsupported("empty class name"));
                }
                parts.push(Part::Class(after_dot[..end].to_string()));
                rest = &after_dot[end..];
            } else if let Some(after_bracket) = rest.strip_prefix('[') {
                let end = after_bracket
                    .find(']')
                    .ok_or_else(|| unsupported("unclosed attribute selector"))?;
                let body = &after_bracket[..end];
                let part = match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        Part::AttributeEquals(name.trim().to_string(), value.to_string())
                    }
                    None => Part::HasAttribute(body.trim().to_string()),
                };
                if matches!(&part, Part::HasAttribute(n) | Part::AttributeEquals(n, _) if n.is_empty())
                {
                    return Err(unsupported("empty attribute name"));
                }
                parts.push(part);
                rest = &after_bracket[end + 1..];
            } else {
                return Err(unsupported("unexpected character"));
            }
        }

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Selector {
        s.parse().expect("valid selector")
    }

    #[test]
    fn simple_selectors() {
        let option = Element::new("option").with_class("choice");
        assert!(sel("option").matches(&option));
        assert!(sel(".choice").matches(&option));
        assert!(!sel("li").matches(&option));

        let marked = Element::new("div").with_attribute("data-render-mode", "name");
        assert!(sel("[data-render-mode]").matches(&marked));
        assert!(sel("[data-render-mode=name]").matches(&marked));
        assert!(sel(r#"[data-render-mode="name"]"#).matches(&marked));
        assert!(!sel("[data-render-mode=tooltip]").matches(&marked));
    }

    #[test]
    fn compound_selector_needs_every_part() {
        let element = Element::new("li").with_class("entry").with_attribute("data-kind", "spell");
        assert!(sel("li.entry[data-kind=spell]").matches(&element));
        assert!(!sel("li.entry.other").matches(&element));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert_eq!("  ".parse::<Selector>(), Err(SelectorError::Empty));
        assert!(matches!(
            "div p".parse::<Selector>(),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            "[data-x".parse::<Selector>(),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            "div.".parse::<Selector>(),
            Err(SelectorError::Unsupported { .. })
        ));
    }
}
