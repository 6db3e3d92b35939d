#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod macros;

// Type definitions
mod types;
pub use types::*;

// Dynamic values
mod value;
pub use value::*;

mod error;
pub use error::*;

mod bean;
pub use bean::*;

// Definition for `core::` types
mod impls_core;

// Definition for `alloc::` types
mod impls_alloc;

// Definition for `std::` types (that aren't in `alloc` or `core)
mod impls_std;

#[cfg(feature = "chrono")]
mod impls_chrono;

/// Ties a Rust type to its [`Shape`], and converts values of that type to and
/// from the dynamic [`Value`] representation.
///
/// `to_value` followed by `from_value` must give back an equal value: that is
/// what lets a typed instance be copied into a mapping and back without loss.
pub trait Reflect: Sized {
    /// The static description of this type.
    const SHAPE: &'static Shape;

    /// Captures this value as a dynamic [`Value`].
    ///
    /// Structs become [`Value::Map`]s with one entry per readable property, in
    /// declaration order.
    fn to_value(&self) -> Value;

    /// Rebuilds a value of this type from a dynamic [`Value`].
    ///
    /// This is a strict extraction: the value must already have the form
    /// `to_value` would produce (modulo integer widths). Coercing between
    /// shapes is the copy engine's job, not this one's.
    fn from_value(value: Value) -> Result<Self, AccessError>;
}
