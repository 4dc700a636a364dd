//! Language support for UI component sources.
//!
//! Maps file extensions onto the ast-grep grammars that understand JSX.

use std::path::Path;

use crate::re_exports::SupportLang;

/// Source dialects handled by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// TypeScript with JSX (`.tsx`)
    Tsx,
    /// TypeScript without JSX (`.ts`, `.mts`, `.cts`)
    TypeScript,
    /// JavaScript, including JSX (`.js`, `.jsx`, `.mjs`, `.cjs`)
    JavaScript,
}

impl Lang {
    /// The ast-grep grammar for this dialect.
    #[must_use]
    pub fn support_lang(&self) -> SupportLang {
        match self {
            Self::Tsx => SupportLang::Tsx,
            Self::TypeScript => SupportLang::TypeScript,
            Self::JavaScript => SupportLang::JavaScript,
        }
    }

    /// Try to detect language from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }

    /// Detect from the path, falling back to TSX, the most permissive grammar.
    #[must_use]
    pub fn from_path_or_tsx(path: &Path) -> Self {
        Self::from_path(path).unwrap_or(Self::Tsx)
    }

    /// Try to detect language from extension string
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "tsx" => Some(Self::Tsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }
}
