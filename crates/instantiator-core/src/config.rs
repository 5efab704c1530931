//! Instantiation options.

use crate::Visibility;

/// Options controlling constructor resolution.
///
/// # Example
///
/// ```
/// use instantiator_core::{InstantiatorConfig, Visibility};
///
/// let config = InstantiatorConfig::default()
///     .with_min_visibility(Visibility::Protected)
///     .with_default_param_fallback(false);
///
/// assert_eq!(config.min_visibility, Visibility::Protected);
/// assert!(!config.default_param_fallback);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantiatorConfig {
    /// Fall back to a constructor whose parameters are all defaulted when no
    /// zero-argument constructor exists.
    pub default_param_fallback: bool,
    /// Least visible constructor that may be selected.
    pub min_visibility: Visibility,
}

impl Default for InstantiatorConfig {
    fn default() -> Self {
        Self {
            default_param_fallback: true,
            min_visibility: Visibility::Public,
        }
    }
}

impl InstantiatorConfig {
    /// Only consider zero-argument constructors.
    pub fn zero_argument_only() -> Self {
        Self::default().with_default_param_fallback(false)
    }

    pub fn with_default_param_fallback(mut self, enabled: bool) -> Self {
        self.default_param_fallback = enabled;
        self
    }

    pub fn with_min_visibility(mut self, visibility: Visibility) -> Self {
        self.min_visibility = visibility;
        self
    }
}
