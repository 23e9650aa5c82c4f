//! The feature flag capability.

use crate::Result;
use std::sync::Arc;

/// Boolean feature flag lookup.
///
/// This is the type application code depends on; concrete services are
/// chosen once at startup and shared as [`SharedFeatureFlag`].
pub trait FeatureFlag: Send + Sync {
    /// Value of the flag `key`, or `default_value` when the flag cannot be
    /// evaluated.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key, `InvalidOperation` when the
    /// backing client is not ready.
    fn get_feature_flag(&self, key: &str, default_value: bool) -> Result<bool>;

    /// Shorthand for a lookup that defaults to off.
    fn is_enabled(&self, key: &str) -> Result<bool> {
        self.get_feature_flag(key, false)
    }
}

pub type SharedFeatureFlag = Arc<dyn FeatureFlag>;

impl<T: FeatureFlag + ?Sized> FeatureFlag for Arc<T> {
    fn get_feature_flag(&self, key: &str, default_value: bool) -> Result<bool> {
        (**self).get_feature_flag(key, default_value)
    }
}
