//! String templating over serde data
//!
//! Templates use Jinja syntax (`{{ name }}`, `{% if %}`, filters) and are
//! rendered against anything that implements [`Serialize`].
//!
//! ```rust
//! use serde::Serialize;
//! use tarry_utils::template::expand_string_template;
//!
//! #[derive(Serialize)]
//! struct Target {
//!     host: String,
//!     port: u16,
//! }
//!
//! let url = expand_string_template(
//!     "http://{{ host }}:{{ port }}/health",
//!     &Target { host: "localhost".into(), port: 8080 },
//! )?;
//! assert_eq!(url, "http://localhost:8080/health");
//! # Ok::<(), tarry_core::Error>(())
//! ```

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use tarry_core::{Error, Result};
use tracing::debug;

/// Render `template` with `data` as its context.
///
/// Referencing a field that `data` does not have is an error rather than an
/// empty string, as is a template that fails to parse.
pub fn expand_string_template<T: Serialize + ?Sized>(template: &str, data: &T) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    env.render_str(template, data).map_err(|e| {
        debug!(error = %e, "template rendering failed");
        Error::template(e.to_string(), e)
    })
}
