//! Candidate Resolver - exhaustive, parallel hint matching across a project.
//!
//! Every discovered source is read and parsed on the rayon pool. Files that
//! cannot be read or parsed are skipped; they are never candidates and never
//! abort the scan. The decision is taken only after the whole tree has been
//! examined, so the outcome does not depend on scheduling order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use omni_ast::{Lang, ParsedSource};
use omni_io::{DiscoverOptions, discover_sources, read_text_safe};
use omni_types::Candidate;

use crate::error::ResolveError;
use crate::hint::Hint;

const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Resolves match hints to a single source file under a project root.
#[derive(Debug, Clone)]
pub struct CandidateResolver {
    root: PathBuf,
    options: DiscoverOptions,
    max_file_size: u64,
}

impl CandidateResolver {
    /// Create a resolver with default discovery options.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            options: DiscoverOptions::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Replace the discovery options (extensions, skipped directories).
    #[must_use]
    pub fn with_options(mut self, options: DiscoverOptions) -> Self {
        self.options = options;
        self
    }

    /// Files above this size are skipped.
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Project root being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every file holding at least one element that satisfies a hint.
    ///
    /// Reasons list each satisfied hint once, in first-seen order. The
    /// result is sorted by path.
    #[must_use]
    pub fn scan(&self, hints: &[Hint]) -> Vec<Candidate> {
        if hints.is_empty() {
            return Vec::new();
        }

        let files = discover_sources(&self.root, &self.options);
        tracing::debug!(root = %self.root.display(), files = files.len(), "scanning sources");

        let mut candidates: Vec<Candidate> = files
            .par_iter()
            .filter_map(|path| self.scan_file(path, hints))
            .collect();

        candidates.sort_by(|a, b| a.file.cmp(&b.file));
        candidates
    }

    fn scan_file(&self, path: &Path, hints: &[Hint]) -> Option<Candidate> {
        let content = match read_text_safe(path, self.max_file_size) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        };

        let reasons = match match_source(&content, Lang::from_path_or_tsx(path), hints) {
            Ok(reasons) => reasons,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unparsable file");
                return None;
            }
        };

        (!reasons.is_empty()).then(|| Candidate {
            file: path.display().to_string(),
            reasons,
        })
    }

    /// Resolve hints to exactly one file.
    ///
    /// # Errors
    /// `NoFileResolved` when there are no hints or no file matches;
    /// `AmbiguousResolution` when more than one file matches.
    pub fn resolve(&self, hints: &[Hint]) -> Result<PathBuf, ResolveError> {
        let mut candidates = self.scan(hints);
        match candidates.len() {
            0 => {
                tracing::info!(hints = hints.len(), "no candidate file");
                Err(ResolveError::NoFileResolved)
            }
            1 => {
                let candidate = candidates.remove(0);
                tracing::info!(file = %candidate.file, reasons = ?candidate.reasons, "resolved source file");
                Ok(PathBuf::from(candidate.file))
            }
            n => {
                tracing::info!(candidates = n, "ambiguous resolution");
                Err(ResolveError::AmbiguousResolution { candidates })
            }
        }
    }
}

/// Labels of the hints satisfied by some element in `content`.
///
/// Each label appears once, in the order it was first satisfied while
/// walking elements in document order.
///
/// # Errors
/// Returns the syntax error when `content` does not parse.
pub fn match_source(
    content: &str,
    lang: Lang,
    hints: &[Hint],
) -> Result<Vec<String>, omni_ast::SyntaxError> {
    let parsed = ParsedSource::parse(content, lang)?;
    let mut reasons: Vec<String> = Vec::new();

    for element in parsed.elements() {
        for hint in hints {
            if !hint.matches(&element) {
                continue;
            }
            let label = hint.to_string();
            if !reasons.contains(&label) {
                reasons.push(label);
            }
        }
    }

    Ok(reasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::MatchHint;

    #[test]
    fn test_match_source_reasons_are_unique() {
        let content = r#"const A = () => (
  <div className="card">
    <div className="card" id="main" />
  </div>
);
"#;
        let hints: Vec<Hint> = vec![
            MatchHint::Class("card".into()).into(),
            MatchHint::Id("main".into()).into(),
            MatchHint::Class("card".into()).into(),
        ];
        let reasons = match_source(content, Lang::Tsx, &hints).expect("Should parse");
        assert_eq!(reasons, vec!["className:card", "id:main"]);
    }

    #[test]
    fn test_class_hint_requires_exact_literal() {
        let content = r#"const A = () => <div className="card shadow" />;"#;
        let hints = vec![Hint::from(MatchHint::Class("card".into()))];
        assert!(match_source(content, Lang::Tsx, &hints).expect("Should parse").is_empty());
    }

    #[test]
    fn test_member_expression_tags() {
        let content = "const A = () => <Foo.Bar />;";
        let hints = vec![Hint::from(MatchHint::Tag("Foo.Bar".into()))];
        assert_eq!(
            match_source(content, Lang::Tsx, &hints).expect("Should parse"),
            vec!["tagName:Foo.Bar"]
        );
    }

    #[test]
    fn test_selector_and_field_reasons_are_distinct() {
        let content = r#"const A = () => <div className="card" />;"#;
        let hints = vec![
            Hint::from_selector(".card").expect("Valid selector"),
            Hint::from(MatchHint::Class("card".into())),
        ];
        assert_eq!(
            match_source(content, Lang::Tsx, &hints).expect("Should parse"),
            vec!["selector:.card", "className:card"]
        );
    }

    #[test]
    fn test_empty_hints_scan_nothing() {
        let resolver = CandidateResolver::new("/nonexistent");
        assert!(resolver.scan(&[]).is_empty());
        assert_eq!(resolver.resolve(&[]), Err(ResolveError::NoFileResolved));
    }
}
