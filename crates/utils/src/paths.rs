//! Path expansion and safe open helpers
//!
//! Paths handed to these helpers may use `~`, `$VAR` and `${VAR}`; they are
//! expanded, cleaned lexically and made absolute before touching the file
//! system, so `..` segments never survive into the final path.

use std::env::{self, VarError};
use std::fs::{self, File, OpenOptions};
use std::path::{Component, Path, PathBuf};
use tarry_core::{Error, Result, CREATED_DIR_MODE};
use tracing::debug;

/// Expand `~` and environment variables, clean and absolutize `path`.
///
/// Unset variables expand to the empty string. An empty path resolves to
/// the current directory.
///
/// ```rust,no_run
/// let config = tarry_utils::paths::expand_path("~/Documents/${APP_DIR}/config.json")?;
/// assert!(config.is_absolute());
/// # Ok::<(), tarry_core::Error>(())
/// ```
pub fn expand_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let raw = path_str(path.as_ref())?;

    let expanded = shellexpand::full_with_context(raw, home_dir, |name: &str| {
        Ok::<_, VarError>(Some(env::var(name).unwrap_or_default()))
    })
    .map_err(|e| Error::path_expansion(raw, e.to_string()))?;

    absolutize(&clean_path(expanded.as_ref()))
}

/// Lexically normalize `path`: drop `.` segments and duplicate separators,
/// resolve `..` against preceding segments. Empty input becomes `.`.
pub fn clean_path(path: impl AsRef<Path>) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}

fn home_dir() -> Option<String> {
    dirs::home_dir().and_then(|home| home.to_str().map(str::to_owned))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir()
        .map_err(|e| Error::file_system(path, "resolve current directory", e))?;
    Ok(clean_path(cwd.join(path)))
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        Error::path_expansion(path.to_string_lossy(), "path is not valid UTF-8")
    })
}

/// Open `path` read-only after expanding it
pub fn clean_open(path: impl AsRef<Path>) -> Result<File> {
    let expanded = expand_path(path)?;
    File::open(&expanded).map_err(|e| Error::file_system(&expanded, "open", e))
}

/// Open `path` with `options` after expanding it
///
/// ```rust,no_run
/// use std::fs::OpenOptions;
///
/// let mut options = OpenOptions::new();
/// options.read(true).write(true).create(true);
/// let file = tarry_utils::paths::clean_open_with("~/config.json", &options)?;
/// # Ok::<(), tarry_core::Error>(())
/// ```
pub fn clean_open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<File> {
    let expanded = expand_path(path)?;
    options
        .open(&expanded)
        .map_err(|e| Error::file_system(&expanded, "open", e))
}

/// Create `path` (or `default` when `path` is empty) and its parents.
///
/// Returns the expanded, absolute directory. On unix new directories get
/// mode 0750.
pub fn create_dir_path(path: impl AsRef<Path>, default: impl AsRef<Path>) -> Result<PathBuf> {
    let chosen = if path.as_ref().as_os_str().is_empty() {
        default.as_ref()
    } else {
        path.as_ref()
    };
    let expanded = expand_path(chosen)?;

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(CREATED_DIR_MODE);
    }
    builder
        .create(&expanded)
        .map_err(|e| Error::file_system(&expanded, "create directory", e))?;

    debug!(path = %expanded.display(), "directory ready");
    Ok(expanded)
}
