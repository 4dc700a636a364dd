//! Core style editor implementation.
//!
//! Walks every JSX attribute in a parsed source and rewrites the literals
//! that carry the requested old value.

use std::ops::Range;
use std::path::Path;

use omni_ast::{
    JsxAttribute, Lang, Literal, ParsedSource, Quoting, StringLiteral, SyntaxError, line_column,
};

use crate::diff::generate_unified_diff;
use crate::error::EditError;
use crate::lock::with_path_lock;
use crate::types::{
    CLASS_LIST_PROP, ClassMatchPolicy, EditConfig, EditLocation, EditResult, StyleEdit,
};

const STYLE_PROP: &str = "style";

/// One byte-range replacement in the original text.
struct Splice {
    range: Range<usize>,
    text: String,
}

/// StyleEditor - lossless JSX attribute rewriting.
///
/// # Example
///
/// ```rust,ignore
/// use omni_ast::Lang;
/// use omni_edit::{ClassMatchPolicy, StyleEdit, StyleEditor};
///
/// let result = StyleEditor::rewrite(
///     r#"<p style={{ color: "red" }} />"#,
///     Lang::Tsx,
///     &StyleEdit::new("color", "red", "blue"),
///     ClassMatchPolicy::Substring,
/// )?;
/// assert_eq!(result.modified, r#"<p style={{ color: "blue" }} />"#);
/// ```
pub struct StyleEditor;

impl StyleEditor {
    /// Rewrite `content` in memory.
    ///
    /// `className` edits replace the first occurrence of the old value inside
    /// each literal class string. Any other prop is looked up as a key of
    /// inline `style` objects, and entries whose literal value equals the old
    /// value exactly are replaced.
    ///
    /// # Errors
    /// Returns the first syntax error when `content` does not parse.
    pub fn rewrite(
        content: &str,
        lang: Lang,
        edit: &StyleEdit,
        policy: ClassMatchPolicy,
    ) -> Result<EditResult, SyntaxError> {
        Self::rewrite_labeled(content, lang, edit, policy, "source")
    }

    fn rewrite_labeled(
        content: &str,
        lang: Lang,
        edit: &StyleEdit,
        policy: ClassMatchPolicy,
        label: &str,
    ) -> Result<EditResult, SyntaxError> {
        let parsed = ParsedSource::parse(content, lang)?;

        let mut splices: Vec<Splice> = parsed
            .attributes()
            .iter()
            .flat_map(|attr| collect_splices(attr, edit, policy))
            .collect();

        if splices.is_empty() {
            return Ok(EditResult {
                original: content.to_string(),
                modified: content.to_string(),
                count: 0,
                diff: String::new(),
                edits: Vec::new(),
            });
        }

        // Apply back to front so earlier offsets stay valid
        splices.sort_by(|a, b| b.range.start.cmp(&a.range.start));

        let mut modified = content.to_string();
        let mut edits = Vec::with_capacity(splices.len());

        for splice in &splices {
            let (line, column) = line_column(content, splice.range.start);
            let original_text = content[splice.range.clone()].to_string();
            tracing::debug!(line, column, from = %original_text, to = %splice.text, "rewriting literal");

            modified.replace_range(splice.range.clone(), &splice.text);
            edits.push(EditLocation {
                line,
                column,
                original_text,
                new_text: splice.text.clone(),
            });
        }

        edits.reverse();
        let diff = generate_unified_diff(content, &modified, label);

        Ok(EditResult {
            original: content.to_string(),
            modified,
            count: edits.len(),
            diff,
            edits,
        })
    }

    /// Rewrite a file on disk.
    ///
    /// The whole read-parse-write sequence holds the file's path lock. The
    /// file is written only when something changed, `config.preview_only`
    /// is false, and `config.gate` (when set) can still be committed.
    ///
    /// # Errors
    /// `Read` when the file cannot be read or is not UTF-8, `Parse` when it
    /// is not valid JSX/TSX, `Cancelled` when the gate was cancelled before
    /// the write, `Write` when the result cannot be written back.
    pub fn rewrite_file<P: AsRef<Path>>(
        path: P,
        edit: &StyleEdit,
        config: &EditConfig,
    ) -> Result<EditResult, EditError> {
        let path = path.as_ref();
        with_path_lock(path, || Self::rewrite_locked(path, edit, config))
    }

    fn rewrite_locked(
        path: &Path,
        edit: &StyleEdit,
        config: &EditConfig,
    ) -> Result<EditResult, EditError> {
        let shown = path.display().to_string();

        let content = omni_io::read_text_safe(path, config.max_file_size).map_err(|source| {
            EditError::Read {
                path: shown.clone(),
                source,
            }
        })?;

        let lang = Lang::from_path_or_tsx(path);
        let result = Self::rewrite_labeled(&content, lang, edit, config.class_match, &shown)
            .map_err(|source| EditError::Parse {
                path: shown.clone(),
                source,
            })?;

        if !result.changed() {
            tracing::info!(path = %shown, prop = %edit.prop, "no literal matched old value");
            return Ok(result);
        }

        if config.preview_only {
            tracing::info!(path = %shown, replacements = result.count, "preview only; file untouched");
            return Ok(result);
        }

        if let Some(gate) = &config.gate
            && !gate.commit()
        {
            tracing::warn!(path = %shown, "write cancelled before commit; file untouched");
            return Err(EditError::Cancelled { path: shown });
        }

        omni_io::write_text(path, &result.modified).map_err(|source| EditError::Write {
            path: shown.clone(),
            source,
        })?;
        tracing::info!(path = %shown, replacements = result.count, "file updated");

        Ok(result)
    }

    /// Preview a file rewrite (no file modification).
    ///
    /// # Errors
    /// Same as [`StyleEditor::rewrite_file`], minus `Write`.
    pub fn preview<P: AsRef<Path>>(path: P, edit: &StyleEdit) -> Result<EditResult, EditError> {
        Self::rewrite_file(
            path,
            edit,
            &EditConfig {
                preview_only: true,
                ..Default::default()
            },
        )
    }

    /// Apply a file rewrite with default configuration.
    ///
    /// # Errors
    /// Same as [`StyleEditor::rewrite_file`].
    pub fn apply<P: AsRef<Path>>(path: P, edit: &StyleEdit) -> Result<EditResult, EditError> {
        Self::rewrite_file(path, edit, &EditConfig::default())
    }
}

fn collect_splices(attr: &JsxAttribute<'_>, edit: &StyleEdit, policy: ClassMatchPolicy) -> Vec<Splice> {
    if edit.is_class_list() {
        if attr.name() != CLASS_LIST_PROP {
            return Vec::new();
        }
        let Some(literal) = attr.string_literal() else {
            return Vec::new();
        };
        return policy
            .find(&literal.value, &edit.old_value)
            .map(|offset| {
                let start = literal.content.start + offset;
                Splice {
                    range: start..start + edit.old_value.len(),
                    text: literal.encode(&edit.new_value),
                }
            })
            .into_iter()
            .collect();
    }

    if attr.name() != STYLE_PROP {
        return Vec::new();
    }
    let Some(entries) = attr.object_entries() else {
        return Vec::new();
    };
    entries
        .into_iter()
        .filter(|entry| entry.key == edit.prop)
        .filter_map(|entry| entry.value)
        .filter(|value| value.value() == edit.old_value)
        .map(|value| replace_literal(&value, &edit.new_value))
        .collect()
}

fn replace_literal(value: &Literal, new_value: &str) -> Splice {
    match value {
        Literal::Str(literal) => Splice {
            range: literal.content.clone(),
            text: literal.encode(new_value),
        },
        Literal::Number { range, .. } => Splice {
            range: range.clone(),
            text: number_or_string(new_value),
        },
    }
}

/// Numbers stay bare; anything else becomes a double-quoted string.
fn number_or_string(value: &str) -> String {
    let numeric = value.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
        && value.parse::<f64>().is_ok_and(f64::is_finite);
    if numeric {
        return value.to_string();
    }
    let quoted = StringLiteral {
        value: String::new(),
        content: 0..0,
        quote: '"',
        quoting: Quoting::Script,
    };
    format!("\"{}\"", quoted.encode(value))
}
