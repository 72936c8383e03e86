/// Constants used throughout the tarry codebase
use std::time::Duration;

// Polling defaults
pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_WAIT_MAX_TRIES: u32 = 10;

// Environment variable names
pub const TARRY_WAIT_INTERVAL_MS_VAR: &str = "TARRY_WAIT_INTERVAL_MS";
pub const TARRY_WAIT_MAX_TRIES_VAR: &str = "TARRY_WAIT_MAX_TRIES";
pub const TARRY_LOG_VAR: &str = "TARRY_LOG";

// Masking
pub const DEFAULT_MASK: &str = "*";
pub const DEFAULT_OBFUSCATION_BOUND: usize = 8;

// Persistence
pub const JSON_EXTENSIONS: &[&str] = &["json"];
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

// Permissions applied on unix
pub const PERSISTED_FILE_MODE: u32 = 0o600;
pub const CREATED_DIR_MODE: u32 = 0o750;
