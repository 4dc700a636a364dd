//! Config namespace: YAML settings loading.

mod settings;

pub use settings::{
    PatchSettings, load_patch_settings, load_patch_settings_from_paths, patch_settings_paths,
    set_config_home_override,
};
