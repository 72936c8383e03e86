//! Polling, masking and file helpers for tarry
//!
//! - [`wait`]: a cancellable, bounded-retry poller with boolean, error and
//!   value-returning probe shapes.
//! - [`masked`]: [`MaskedString`], a secret that displays masked.
//! - [`files`]: existence checks and "wait for files".
//! - [`paths`]: `~` / `$VAR` expansion and safe open helpers.
//! - [`persist`]: JSON/YAML struct persistence chosen by extension.
//! - [`template`]: Jinja-style string templates rendered from serde data.
//! - [`env`]: environment lookups with defaults.

pub mod atomic_file;
pub mod env;
pub mod files;
pub mod logging;
pub mod masked;
pub mod paths;
pub mod persist;
pub mod template;
pub mod wait;

pub use atomic_file::write_atomic;
pub use env::{
    lookup_env_bool, lookup_env_bool_in, lookup_env_parsed, lookup_env_with_default,
    lookup_env_with_default_in, EnvLookup, ProcessEnv,
};
pub use files::{file_exists, files_exist, wait_for_file, wait_for_files};
pub use masked::{MaskConfig, MaskedString};
pub use paths::{clean_open, clean_open_with, clean_path, create_dir_path, expand_path};
pub use persist::{load_struct_from_file, save_struct_to_file, Format};
pub use template::expand_string_template;
pub use wait::{
    wait_for, wait_for_ok, wait_for_value, wait_until, WaitOptions, WaitOutcome,
};

pub use tokio_util::sync::CancellationToken;
