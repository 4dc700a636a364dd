//! Visual patch: map a style edit captured on a rendered page back to the
//! JSX element it came from, and rewrite that element's source in place.
//!
//! - **Executor**: picks the target file (explicit, from a locator, or by
//!   resolving DOM hints), then runs the lossless style rewrite.
//! - **Gateway**: HTTP tool endpoint (`GET /tools`, `POST /tools/{tool}`).
//! - **Config**: YAML settings merged system-then-user.

#![allow(missing_docs)]

mod config;
mod executor;
mod gateway;
mod tools;

pub use config::{
    PatchSettings, load_patch_settings, load_patch_settings_from_paths, patch_settings_paths,
    set_config_home_override,
};
pub use executor::{EditExecutor, ExecutorConfig, FileSource};
pub use gateway::{GatewayHealthResponse, GatewayState, router, run_http};
pub use tools::{EDIT_INSTRUCTION_TOOL, ToolSpec, ToolsResponse, tool_registry};
