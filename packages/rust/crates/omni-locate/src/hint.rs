//! Match hints and the hint normalizer.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use omni_ast::JsxElement;
use omni_types::EditInstruction;

static ATTRIBUTE_SELECTOR: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r#"^\[\s*([^=\]\s]+)\s*=\s*["']?([^"'\]]*)["']?\s*\]$"#).ok()
});

/// One piece of evidence about the source element.
///
/// Hints are combined with OR semantics: any single hint qualifies an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchHint {
    /// Element tag identifier.
    Tag(String),
    /// Exact literal `className` value.
    Class(String),
    /// Exact literal `id` value.
    Id(String),
    /// Attribute `name` with exact literal `value`.
    Attribute(String, String),
}

impl MatchHint {
    /// Whether `element` satisfies this hint.
    #[must_use]
    pub fn matches(&self, element: &JsxElement<'_>) -> bool {
        match self {
            Self::Tag(name) => element.tag().is_some_and(|tag| tag == *name),
            Self::Class(name) => literal_equals(element, "className", name),
            Self::Id(name) => literal_equals(element, "id", name),
            Self::Attribute(attr, value) => literal_equals(element, attr, value),
        }
    }
}

fn literal_equals(element: &JsxElement<'_>, attr: &str, expected: &str) -> bool {
    element
        .attributes()
        .iter()
        .filter(|a| a.name() == attr)
        .filter_map(omni_ast::JsxAttribute::string_literal)
        .any(|literal| literal.value == expected)
}

/// Diagnostic label, e.g. `className:card` or `data-testid:hero`.
impl fmt::Display for MatchHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(name) => write!(f, "tagName:{name}"),
            Self::Class(name) => write!(f, "className:{name}"),
            Self::Id(name) => write!(f, "id:{name}"),
            Self::Attribute(attr, value) => write!(f, "{attr}:{value}"),
        }
    }
}

/// A match hint with the reason label reported when it is satisfied.
///
/// Hints taken from identity fields are labeled by their own display form;
/// selector hints keep the raw selector, e.g. `selector:.card`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// What an element must carry.
    pub matcher: MatchHint,
    /// Candidate reason label.
    pub reason: String,
}

impl Hint {
    /// Parse `selector`, labeling the hint with the selector as written.
    #[must_use]
    pub fn from_selector(selector: &str) -> Option<Self> {
        parse_selector(selector).map(|matcher| Self {
            matcher,
            reason: format!("selector:{selector}"),
        })
    }

    /// Whether `element` satisfies the underlying matcher.
    #[must_use]
    pub fn matches(&self, element: &JsxElement<'_>) -> bool {
        self.matcher.matches(element)
    }
}

impl From<MatchHint> for Hint {
    fn from(matcher: MatchHint) -> Self {
        let reason = matcher.to_string();
        Self { matcher, reason }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Parse a raw selector string into a hint.
///
/// Recognized forms: `.class`, `#id`, `[name=value]` (value optionally
/// quoted), and a bare alphanumeric tag. Anything else yields `None`.
#[must_use]
pub fn parse_selector(selector: &str) -> Option<MatchHint> {
    let selector = selector.trim();
    if let Some(class) = selector.strip_prefix('.') {
        return (!class.is_empty()).then(|| MatchHint::Class(class.to_string()));
    }
    if let Some(id) = selector.strip_prefix('#') {
        return (!id.is_empty()).then(|| MatchHint::Id(id.to_string()));
    }
    if selector.starts_with('[') {
        let captures = (*ATTRIBUTE_SELECTOR).as_ref()?.captures(selector)?;
        return Some(MatchHint::Attribute(
            captures[1].to_string(),
            captures[2].to_string(),
        ));
    }
    let is_tag = !selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric());
    is_tag.then(|| MatchHint::Tag(selector.to_string()))
}

/// Build the ordered hint list for an instruction.
///
/// The selector hint comes first, then one hint per identity field present:
/// `tagName`, `className`, `id`, `dataComponent`, `dataTestid`. Nothing is
/// deduplicated.
#[must_use]
pub fn hints_from_instruction(instruction: &EditInstruction) -> Vec<Hint> {
    let mut hints = Vec::new();
    if let Some(hint) = instruction.selector.as_deref().and_then(Hint::from_selector) {
        hints.push(hint);
    }
    let fields = [
        instruction.tag_name.clone().map(MatchHint::Tag),
        instruction.class_name.clone().map(MatchHint::Class),
        instruction.id.clone().map(MatchHint::Id),
        instruction
            .data_component
            .clone()
            .map(|component| MatchHint::Attribute("data-component".to_string(), component)),
        instruction
            .data_testid
            .clone()
            .map(|testid| MatchHint::Attribute("data-testid".to_string(), testid)),
    ];
    hints.extend(fields.into_iter().flatten().map(Hint::from));
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_forms() {
        assert_eq!(parse_selector(".card"), Some(MatchHint::Class("card".into())));
        assert_eq!(parse_selector("#main"), Some(MatchHint::Id("main".into())));
        assert_eq!(parse_selector("button"), Some(MatchHint::Tag("button".into())));
        assert_eq!(
            parse_selector(r#"[data-testid="hero"]"#),
            Some(MatchHint::Attribute("data-testid".into(), "hero".into()))
        );
        assert_eq!(
            parse_selector("[data-component='Card']"),
            Some(MatchHint::Attribute("data-component".into(), "Card".into()))
        );
        assert_eq!(
            parse_selector("[role=button]"),
            Some(MatchHint::Attribute("role".into(), "button".into()))
        );
    }

    #[test]
    fn test_parse_selector_rejects_other_forms() {
        assert_eq!(parse_selector(""), None);
        assert_eq!(parse_selector("."), None);
        assert_eq!(parse_selector("div > span"), None);
        assert_eq!(parse_selector("[disabled]"), None);
        assert_eq!(parse_selector("my-element"), None);
    }

    #[test]
    fn test_hints_keep_every_source_in_order() {
        let instruction = EditInstruction {
            selector: Some(".card".into()),
            tag_name: Some("div".into()),
            class_name: Some("card".into()),
            id: Some("main".into()),
            data_component: Some("Card".into()),
            data_testid: Some("card-1".into()),
            ..EditInstruction::new("color", "red", "blue")
        };

        let hints = hints_from_instruction(&instruction);
        assert_eq!(hints[0].matcher, MatchHint::Class("card".into()));
        let labels: Vec<_> = hints.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "selector:.card",
                "tagName:div",
                "className:card",
                "id:main",
                "data-component:Card",
                "data-testid:card-1",
            ]
        );
    }

    #[test]
    fn test_selector_reason_keeps_raw_selector() {
        let hint = Hint::from_selector(r#"[data-testid="hero"]"#).unwrap();
        assert_eq!(
            hint.matcher,
            MatchHint::Attribute("data-testid".into(), "hero".into())
        );
        assert_eq!(hint.to_string(), r#"selector:[data-testid="hero"]"#);
        assert!(Hint::from_selector("div > span").is_none());
    }

    #[test]
    fn test_no_hints_without_identity() {
        let instruction = EditInstruction {
            selector: Some("ul li:first-child".into()),
            ..EditInstruction::new("color", "red", "blue")
        };
        assert!(hints_from_instruction(&instruction).is_empty());
    }
}
