//! Optional extensions to the base navigation.

#[cfg(feature = "extension_pivot_indicator")]
pub mod pivot_indicator;
