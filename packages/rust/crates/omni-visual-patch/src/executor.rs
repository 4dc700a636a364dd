//! Edit Instruction Executor.
//!
//! Chooses the file an instruction targets, then hands it to the style
//! rewriter. Every path through here ends in an [`EditOutcome`]; nothing
//! panics or propagates past the caller.

use std::path::{Path, PathBuf};

use omni_edit::{EditConfig, StyleEdit, StyleEditor, WriteGate};
use omni_io::DiscoverOptions;
use omni_locate::{CandidateResolver, Hint, ResolveError, hints_from_instruction};
use omni_types::{Candidate, EditInstruction, EditOutcome};

/// Resolved executor configuration.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Root for relative paths and for hint resolution.
    pub project_root: PathBuf,
    pub discover: DiscoverOptions,
    pub edit: EditConfig,
}

impl ExecutorConfig {
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            discover: DiscoverOptions::default(),
            edit: EditConfig::default(),
        }
    }
}

/// Where the target file of an instruction comes from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// `file` was supplied.
    ExplicitFile(PathBuf),
    /// Path segment of `locator` (`path:line`).
    DerivedFromLocator(PathBuf),
    /// Nothing explicit; resolve these hints against the project.
    ResolvedByHints(Vec<Hint>),
}

impl FileSource {
    #[must_use]
    pub fn from_instruction(instruction: &EditInstruction) -> Self {
        if let Some(file) = non_empty(instruction.file.as_deref()) {
            return Self::ExplicitFile(PathBuf::from(file));
        }
        let locator_path = instruction
            .locator
            .as_deref()
            .and_then(|locator| locator.split(':').next());
        if let Some(path) = non_empty(locator_path) {
            return Self::DerivedFromLocator(PathBuf::from(path));
        }
        Self::ResolvedByHints(hints_from_instruction(instruction))
    }

    /// Short label used in logs and CLI output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExplicitFile(_) => "explicit_file",
            Self::DerivedFromLocator(_) => "derived_from_locator",
            Self::ResolvedByHints(_) => "resolved_by_hints",
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Runs edit instructions against one project.
#[derive(Debug, Clone)]
pub struct EditExecutor {
    config: ExecutorConfig,
    resolver: CandidateResolver,
}

impl EditExecutor {
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        let resolver = CandidateResolver::new(config.project_root.clone())
            .with_options(config.discover.clone())
            .with_max_file_size(config.edit.max_file_size);
        Self { config, resolver }
    }

    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Apply the instruction, writing the file when something changed.
    #[must_use]
    pub fn execute(&self, instruction: &EditInstruction) -> EditOutcome {
        self.execute_with(instruction, self.config.edit.preview_only, None)
    }

    /// Like [`EditExecutor::execute`], but the write happens only if `gate`
    /// is still open once the new content is ready.
    ///
    /// A caller that stops waiting cancels the gate; the outcome then reports
    /// the cancellation and the file is left as it was.
    #[must_use]
    pub fn execute_gated(&self, instruction: &EditInstruction, gate: WriteGate) -> EditOutcome {
        self.execute_with(instruction, self.config.edit.preview_only, Some(gate))
    }

    /// Compute the outcome and its diff without touching the file.
    #[must_use]
    pub fn preview(&self, instruction: &EditInstruction) -> EditOutcome {
        self.execute_with(instruction, true, None)
    }

    fn execute_with(
        &self,
        instruction: &EditInstruction,
        preview: bool,
        gate: Option<WriteGate>,
    ) -> EditOutcome {
        let source = FileSource::from_instruction(instruction);
        tracing::debug!(source = source.kind(), prop = %instruction.prop, "executing instruction");

        let path = match self.target(&source) {
            Ok(path) => path,
            Err(error) => {
                tracing::info!(error = %error, "instruction not resolved; nothing modified");
                let mut outcome = EditOutcome::unresolved(error.to_string(), instruction.clone());
                outcome.candidates = error.candidates().map(<[Candidate]>::to_vec);
                return outcome;
            }
        };

        self.mutate(&path, instruction, preview, gate)
    }

    /// Target file for an instruction, without mutating anything.
    ///
    /// # Errors
    /// Propagates the resolver failure when no explicit file is given.
    pub fn locate(&self, instruction: &EditInstruction) -> Result<PathBuf, ResolveError> {
        self.target(&FileSource::from_instruction(instruction))
    }

    /// Every candidate file for the instruction's hints.
    #[must_use]
    pub fn candidates(&self, instruction: &EditInstruction) -> Vec<Candidate> {
        self.resolver.scan(&hints_from_instruction(instruction))
    }

    fn target(&self, source: &FileSource) -> Result<PathBuf, ResolveError> {
        match source {
            FileSource::ExplicitFile(path) | FileSource::DerivedFromLocator(path) => {
                Ok(self.absolutize(path))
            }
            FileSource::ResolvedByHints(hints) => self.resolver.resolve(hints),
        }
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config.project_root.join(path)
        }
    }

    fn mutate(
        &self,
        path: &Path,
        instruction: &EditInstruction,
        preview: bool,
        gate: Option<WriteGate>,
    ) -> EditOutcome {
        let file = path.display().to_string();
        let edit = StyleEdit::new(
            instruction.prop.as_str(),
            instruction.old_value.as_str(),
            instruction.new_value.as_str(),
        );
        let config = EditConfig {
            preview_only: preview,
            gate,
            ..self.config.edit.clone()
        };

        match StyleEditor::rewrite_file(path, &edit, &config) {
            Ok(result) if result.changed() => {
                let mut outcome = EditOutcome::applied(file);
                if preview {
                    outcome.diff = Some(result.diff);
                }
                outcome
            }
            Ok(_) => EditOutcome::unchanged(file),
            Err(error) => {
                tracing::warn!(path = %file, error = %error, "edit failed");
                EditOutcome::file_error(file, error.to_string())
            }
        }
    }
}
