//! # Utility Functions Module
//!
//! This module provides utility functions that improve code readability
//! and reduce boilerplate across the application.

/// Converts a vector of string-like items to Vec<String>.
///
/// Codec command lines mix flags, paths and numeric settings; this helper
/// eliminates the repetitive `.to_string()` calls when building them.
///
/// # Example
/// ```rust
/// use site_image_optimizer::utils::to_string_vec;
///
/// let quality = 85.to_string();
/// let args = to_string_vec(["-quality", quality.as_str(), "-progressive"]);
/// assert_eq!(args.len(), 3);
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Macro for even more convenient argument building.
///
/// # Example
/// ```rust
/// use site_image_optimizer::args;
///
/// let args = args!["-optimize", "-progressive"];
/// assert_eq!(args, vec!["-optimize".to_string(), "-progressive".to_string()]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        $crate::utils::to_string_vec([$($item),*])
    };
}
