//! Runtime settings loader for visual-patch.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/visual-patch.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-dev-fusion/visual-patch.yaml`
//!
//! Merge precedence is user over system. Command-line flags override both.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use omni_edit::{ClassMatchPolicy, EditConfig};
use omni_io::DiscoverOptions;

use crate::executor::ExecutorConfig;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/visual-patch.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-dev-fusion/visual-patch.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
const DEFAULT_BIND: &str = "127.0.0.1:3333";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchSettings {
    /// Root scanned by the resolver; relative paths are taken from `PRJ_ROOT`.
    pub project_root: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub skip_dirs: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
    pub class_match: Option<ClassMatchPolicy>,
    pub bind: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl PatchSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            project_root: overlay.project_root.or(self.project_root),
            extensions: overlay.extensions.or(self.extensions),
            skip_dirs: overlay.skip_dirs.or(self.skip_dirs),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            class_match: overlay.class_match.or(self.class_match),
            bind: overlay.bind.or(self.bind),
            request_timeout_secs: overlay.request_timeout_secs.or(self.request_timeout_secs),
        }
    }

    /// Executor configuration; `root_override` (from `--root`) wins over settings.
    #[must_use]
    pub fn executor_config(&self, root_override: Option<&Path>) -> ExecutorConfig {
        let project_root = match (root_override, self.project_root.as_deref()) {
            (Some(root), _) => root.to_path_buf(),
            (None, Some(configured)) if !configured.trim().is_empty() => {
                absolutize(&project_root(), PathBuf::from(configured.trim()))
            }
            _ => project_root(),
        };

        let defaults = DiscoverOptions::default();
        let discover = DiscoverOptions {
            extensions: self.extensions.clone().unwrap_or(defaults.extensions),
            skip_dirs: self.skip_dirs.clone().unwrap_or(defaults.skip_dirs),
            skip_hidden: defaults.skip_hidden,
        };

        let edit_defaults = EditConfig::default();
        let edit = EditConfig {
            max_file_size: self.max_file_size.unwrap_or(edit_defaults.max_file_size),
            class_match: self.class_match.unwrap_or(edit_defaults.class_match),
            ..edit_defaults
        };

        ExecutorConfig {
            project_root,
            discover,
            edit,
        }
    }

    #[must_use]
    pub fn bind(&self) -> String {
        self.bind
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}

#[must_use]
pub fn load_patch_settings() -> PatchSettings {
    let (system_path, user_path) = patch_settings_paths();
    load_patch_settings_from_paths(&system_path, &user_path)
}

#[must_use]
pub fn patch_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[must_use]
pub fn load_patch_settings_from_paths(system: &Path, user: &Path) -> PatchSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> PatchSettings {
    if !path.exists() {
        return PatchSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return PatchSettings::default();
        }
    };
    // An empty file deserializes to unit, not a mapping.
    if raw.trim().is_empty() {
        return PatchSettings::default();
    }
    match serde_yaml::from_str::<PatchSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            PatchSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Override the config home directory (`--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PatchSettings::default();
        assert_eq!(settings.bind(), "127.0.0.1:3333");
        assert_eq!(settings.request_timeout_secs(), 30);

        let config = settings.executor_config(Some(Path::new("/srv/app")));
        assert_eq!(config.project_root, PathBuf::from("/srv/app"));
        assert_eq!(config.edit.class_match, ClassMatchPolicy::Substring);
        assert_eq!(config.discover.extensions, vec!["tsx", "jsx", "ts", "js"]);
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let system = PatchSettings {
            bind: Some("0.0.0.0:9000".into()),
            max_file_size: Some(10),
            ..PatchSettings::default()
        };
        let user = PatchSettings {
            bind: Some("127.0.0.1:4000".into()),
            ..PatchSettings::default()
        };
        let merged = system.merge(user);
        assert_eq!(merged.bind(), "127.0.0.1:4000");
        assert_eq!(merged.max_file_size, Some(10));
    }

    #[test]
    fn test_absolute_configured_root() {
        let settings = PatchSettings {
            project_root: Some("/opt/web".into()),
            ..PatchSettings::default()
        };
        assert_eq!(
            settings.executor_config(None).project_root,
            PathBuf::from("/opt/web")
        );
    }
}
