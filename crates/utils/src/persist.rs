//! Saving and loading serde types as JSON or YAML files
//!
//! The encoding is chosen from the file extension: `.json`, `.yaml` or
//! `.yml`. Anything else is rejected with [`Error::UnsupportedFormat`].
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//! use tarry_utils::persist::{load_struct_from_file, save_struct_to_file};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Config {
//!     server_name: String,
//!     port: u16,
//! }
//!
//! # fn example() -> tarry_core::Result<()> {
//! let config = Config { server_name: "api-server".into(), port: 8080 };
//! save_struct_to_file(&config, "~/.myapp/config.yaml")?;
//! let loaded: Config = load_struct_from_file("~/.myapp/config.yaml")?;
//! # Ok(())
//! # }
//! ```

use crate::atomic_file::write_atomic;
use crate::paths::{clean_open, create_dir_path, expand_path};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tarry_core::{Error, Result, ResultExt, JSON_EXTENSIONS, PERSISTED_FILE_MODE, YAML_EXTENSIONS};
use tracing::debug;

/// Structured encodings understood by the persistence helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the encoding from the extension of `path`
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        if JSON_EXTENSIONS.contains(&extension) {
            Some(Format::Json)
        } else if YAML_EXTENSIONS.contains(&extension) {
            Some(Format::Yaml)
        } else {
            None
        }
    }
}

/// Encode `value` into `writer`
pub fn to_writer<T, W>(format: Format, value: &T, mut writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.write_all(b"\n")?;
        }
        Format::Yaml => serde_yaml::to_writer(&mut writer, value)?,
    }
    Ok(())
}

/// Decode a `T` from `reader`, rejecting empty documents
pub fn from_reader<T, R>(format: Format, reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    decode(format, reader, Path::new("<reader>"))
}

fn decode<T: DeserializeOwned, R: Read>(format: Format, mut reader: R, origin: &Path) -> Result<T> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| Error::file_system(origin, "read", e))?;
    if content.trim().is_empty() {
        return Err(Error::empty_document(origin));
    }

    match format {
        Format::Json => {
            let document: serde_json::Value = serde_json::from_str(&content)?;
            let empty = match &document {
                serde_json::Value::Null => true,
                serde_json::Value::Object(map) => map.is_empty(),
                _ => false,
            };
            if empty {
                return Err(Error::empty_document(origin));
            }
            Ok(serde_json::from_value(document)?)
        }
        Format::Yaml => {
            let document: serde_yaml::Value = serde_yaml::from_str(&content)?;
            let empty = match &document {
                serde_yaml::Value::Null => true,
                serde_yaml::Value::Mapping(map) => map.is_empty(),
                _ => false,
            };
            if empty {
                return Err(Error::empty_document(origin));
            }
            Ok(serde_yaml::from_value(document)?)
        }
    }
}

fn format_for(path: &Path) -> Result<Format> {
    if path.as_os_str().is_empty() {
        return Err(Error::usage("file path is empty"));
    }
    Format::from_path(path).ok_or_else(|| {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Error::unsupported_format(path, extension)
    })
}

/// Load a `T` from `path`.
///
/// Only a document with no data at all is rejected as
/// [`Error::EmptyDocument`]: an empty or whitespace-only file, `null`, or an
/// empty mapping. A document whose fields are all zero values, such as
/// `{"name": "", "value": 0}`, is present data and loads successfully.
pub fn load_struct_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let format = format_for(path)?;

    let file = clean_open(path)?;
    let value = decode(format, BufReader::new(file), path)
        .with_context(|| format!("failed to load data from {}", path.display()))?;

    debug!(path = %path.display(), ?format, "loaded struct");
    Ok(value)
}

/// Save `value` to `path`, creating parent directories as needed.
///
/// The file is replaced atomically and, on unix, readable by the owner only.
pub fn save_struct_to_file<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = format_for(path)?;

    let target = expand_path(path)?;
    if let Some(parent) = target.parent() {
        create_dir_path(parent, "")?;
    }

    let mut encoded = Vec::new();
    to_writer(format, value, &mut encoded)
        .with_context(|| format!("failed to encode data to {}", path.display()))?;
    write_atomic(&target, &encoded, PERSISTED_FILE_MODE)?;

    debug!(path = %target.display(), ?format, "saved struct");
    Ok(())
}
