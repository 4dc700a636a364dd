//! omni-types - Wire types for the visual patch pipeline
//!
//! Shared data structures exchanged between the capturing tool, the HTTP tool
//! endpoint, the CLI and the resolution/mutation crates.
//!
//! # Schema Singularity
//! `EditInstruction` derives `schemars::JsonSchema` so the tool endpoint can
//! advertise an authoritative input schema generated from the Rust type.

#![allow(clippy::doc_markdown)]

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One captured style edit, as produced by the visual editor.
///
/// `prop`, `oldValue` and `newValue` are required. Everything else is an
/// optional disambiguator used to locate the source element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditInstruction {
    /// Property to change: `className`, or an inline style key such as `color`.
    pub prop: String,
    /// Value currently expected in source.
    pub old_value: String,
    /// Replacement value.
    pub new_value: String,
    /// Explicit source file; bypasses resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// `path:line` locator; the path segment bypasses resolution.
    #[serde(default, alias = "dataSrc", skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    /// Raw CSS-like selector (`.class`, `#id`, `[name=value]`, `tag`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// DOM `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// DOM class list as a single string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Element tag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// `data-component` attribute value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_component: Option<String>,
    /// `data-testid` attribute value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_testid: Option<String>,
}

impl EditInstruction {
    /// Build a bare instruction with no disambiguators.
    #[must_use]
    pub fn new(
        prop: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            prop: prop.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            ..Self::default()
        }
    }
}

/// Terminal status of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditStatus {
    /// The source file was rewritten.
    #[serde(rename = "applied")]
    Applied,
    /// The old value was not present; nothing was written.
    #[serde(rename = "not found or unchanged")]
    NotFoundOrUnchanged,
    /// Resolution or I/O failed.
    #[serde(rename = "error")]
    Error,
}

impl fmt::Display for EditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Applied => "applied",
            Self::NotFoundOrUnchanged => "not found or unchanged",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// A source file containing at least one element that satisfied a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Path of the candidate file.
    pub file: String,
    /// Hints that matched, in first-seen order (e.g. `className:card`).
    #[serde(rename = "matchedReasons")]
    pub reasons: Vec<String>,
}

/// Structured result returned for every instruction, success or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    /// Terminal status.
    pub status: EditStatus,
    /// File that was (or would have been) edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Echo of the instruction when resolution failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<EditInstruction>,
    /// Unified diff, present for previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Competing files when resolution was ambiguous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
}

impl EditOutcome {
    /// The file was rewritten.
    #[must_use]
    pub fn applied(file: impl Into<String>) -> Self {
        Self::with_status(EditStatus::Applied, Some(file.into()))
    }

    /// Nothing matched the old value.
    #[must_use]
    pub fn unchanged(file: impl Into<String>) -> Self {
        Self::with_status(EditStatus::NotFoundOrUnchanged, Some(file.into()))
    }

    /// A failure tied to a known file.
    #[must_use]
    pub fn file_error(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::with_status(EditStatus::Error, Some(file.into()))
        }
    }

    /// A failure before any file was chosen; echoes the instruction.
    #[must_use]
    pub fn unresolved(error: impl Into<String>, instruction: EditInstruction) -> Self {
        Self {
            error: Some(error.into()),
            instruction: Some(instruction),
            ..Self::with_status(EditStatus::Error, None)
        }
    }

    fn with_status(status: EditStatus, file: Option<String>) -> Self {
        Self {
            status,
            file,
            error: None,
            instruction: None,
            diff: None,
            candidates: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_accepts_camel_case_and_data_src() {
        let raw = r#"{
            "prop": "color",
            "oldValue": "red",
            "newValue": "blue",
            "dataSrc": "src/App.tsx:12",
            "dataTestid": "hero"
        }"#;
        let instruction: EditInstruction = serde_json::from_str(raw).unwrap();
        assert_eq!(instruction.old_value, "red");
        assert_eq!(instruction.locator.as_deref(), Some("src/App.tsx:12"));
        assert_eq!(instruction.data_testid.as_deref(), Some("hero"));
        assert!(instruction.file.is_none());
    }

    #[test]
    fn test_instruction_requires_values() {
        let raw = r#"{ "prop": "color", "oldValue": "red" }"#;
        assert!(serde_json::from_str::<EditInstruction>(raw).is_err());
    }

    #[test]
    fn test_status_wire_names() {
        let outcome = EditOutcome::unchanged("a.tsx");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "not found or unchanged");
        assert_eq!(value["file"], "a.tsx");
        assert!(value.get("error").is_none());
        assert_eq!(EditStatus::Applied.to_string(), "applied");
    }

    #[test]
    fn test_unresolved_echoes_instruction() {
        let instruction = EditInstruction::new("className", "a", "b");
        let outcome = EditOutcome::unresolved("No file found for instruction", instruction.clone());
        assert_eq!(outcome.status, EditStatus::Error);
        assert_eq!(outcome.instruction, Some(instruction));
        assert!(outcome.file.is_none());
    }
}
