//! Strings that render masked when displayed or logged
//!
//! [`MaskedString`] keeps a sensitive value out of logs and user interfaces:
//! `Display` and `Debug` print a masked rendering, while the real value is
//! only reachable through [`MaskedString::unmasked`]. Structured
//! serialization (serde) always carries the real value, so configuration
//! files round-trip unchanged.
//!
//! ```rust
//! use tarry_utils::masked::{MaskConfig, MaskedString};
//!
//! let mut password = MaskedString::new("sensitive-password");
//! assert!(password.to_string().chars().all(|c| c == '*'));
//!
//! password.set_config(MaskConfig::reveal(1, 1).with_mask("X"));
//! assert_eq!(password.to_string(), "sXXXXXXXXXXXXXXXXd");
//! assert_eq!(password.unmasked(), "sensitive-password");
//! ```
//!
//! This is not secure storage. The value is zeroized on drop, but it lives
//! in an ordinary heap `String` while in use.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tarry_core::{DEFAULT_MASK, DEFAULT_OBFUSCATION_BOUND};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// How a [`MaskedString`] is rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Number of leading characters shown in clear
    pub prefix_count: usize,
    /// Number of trailing characters shown in clear
    pub suffix_count: usize,
    /// Mask used for hidden positions; `None` or empty means `*`
    pub mask: Option<String>,
    /// Reveal nothing unless at least this many characters stay masked
    pub min_mask: usize,
    /// Render `obfuscated_length` positions instead of the real length
    pub obfuscate_length: bool,
    pub obfuscated_length: usize,
}

impl MaskConfig {
    /// Show `prefix` leading and `suffix` trailing characters
    pub fn reveal(prefix: usize, suffix: usize) -> Self {
        Self {
            prefix_count: prefix,
            suffix_count: suffix,
            ..Self::default()
        }
    }

    /// Render a fixed number of positions regardless of the real length
    pub fn obfuscated(length: usize) -> Self {
        Self {
            obfuscate_length: true,
            obfuscated_length: length,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    #[must_use]
    pub fn with_min_mask(mut self, min_mask: usize) -> Self {
        self.min_mask = min_mask;
        self
    }

    #[must_use]
    pub fn with_obfuscated_length(mut self, length: usize) -> Self {
        self.obfuscate_length = true;
        self.obfuscated_length = length;
        self
    }

    fn mask_str(&self) -> &str {
        match self.mask.as_deref() {
            Some(mask) if !mask.is_empty() => mask,
            _ => DEFAULT_MASK,
        }
    }
}

/// A sensitive string that displays masked
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MaskedString {
    value: String,
    #[zeroize(skip)]
    config: MaskConfig,
}

impl MaskedString {
    /// Wrap `value` with the default configuration: fully masked, with a
    /// random display length so the real length is not revealed.
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_rng(value, &mut rand::thread_rng())
    }

    /// Like [`MaskedString::new`], drawing the display length from `rng`
    pub fn with_rng<R: Rng + ?Sized>(value: impl Into<String>, rng: &mut R) -> Self {
        let value = value.into();
        let length = random_obfuscated_length(value.chars().count(), rng);
        Self {
            value,
            config: MaskConfig::obfuscated(length),
        }
    }

    pub fn with_config(value: impl Into<String>, config: MaskConfig) -> Self {
        Self {
            value: value.into(),
            config,
        }
    }

    /// The masked rendering, also used by `Display`
    pub fn masked(&self) -> String {
        let config = &self.config;
        let true_len = self.value.chars().count();
        let effective_len = if config.obfuscate_length {
            config.obfuscated_length
        } else {
            true_len
        };

        let mut prefix_count = config.prefix_count;
        if prefix_count > effective_len {
            prefix_count = 0;
        }
        let mut suffix_count = config.suffix_count;
        if suffix_count > effective_len {
            suffix_count = 0;
        }

        let unmasked_total = prefix_count + suffix_count;
        let chars_to_mask = effective_len.saturating_sub(unmasked_total);

        if config.min_mask > 0 && config.min_mask > chars_to_mask {
            prefix_count = 0;
            suffix_count = 0;
        }

        // Never reveal the whole real value, whatever the display length.
        if unmasked_total >= true_len {
            prefix_count = 0;
            suffix_count = 0;
        }

        let padding = effective_len.saturating_sub(prefix_count + suffix_count);
        let mut rendered: String = self.value.chars().take(prefix_count).collect();
        rendered.push_str(&config.mask_str().repeat(padding));
        rendered.extend(self.value.chars().skip(true_len - suffix_count));
        rendered
    }

    /// The real value. Use with care: this exposes the secret.
    pub fn unmasked(&self) -> &str {
        &self.value
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MaskConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: MaskConfig) {
        self.config = config;
    }

    /// Real length in characters
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Uniform in `[0, bound)` where `bound` is 1.5x the real length, or
/// [`DEFAULT_OBFUSCATION_BOUND`] when that rounds down to zero.
fn random_obfuscated_length<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    let bound = len * 3 / 2;
    let bound = if bound == 0 {
        DEFAULT_OBFUSCATION_BOUND
    } else {
        bound
    };
    rng.gen_range(0..bound)
}

impl fmt::Display for MaskedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for MaskedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MaskedString").field(&self.masked()).finish()
    }
}

impl From<String> for MaskedString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for MaskedString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl FromStr for MaskedString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Serialize for MaskedString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for MaskedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = String::deserialize(deserializer)?;
        let masked = Self::new(value.as_str());
        value.zeroize();
        Ok(masked)
    }
}
