#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Lets `::beancopy::` paths emitted by the derive resolve inside this crate
extern crate self as beancopy;

pub use beancopy_core::*;

/// Derive [`Reflect`] and [`Bean`] for structs with named fields.
///
/// Every field becomes a property, named after the field. Field types must
/// implement [`Reflect`].
///
/// ```rust
/// # use beancopy::Bean;
/// #[derive(Bean, Default)]
/// struct Invoice {
///     number: String,
///     total: f64,
/// }
/// ```
///
/// # Container Attributes
///
/// * `rename_all = ".."` Rename all the properties according to the given
///   case convention: `"snake_case"`, `"SCREAMING_SNAKE_CASE"`,
///   `"PascalCase"`, `"camelCase"`, `"kebab-case"` or
///   `"SCREAMING-KEBAB-CASE"`.
///
/// # Field Attributes
///
/// ```rust
/// # use beancopy::Bean;
/// #[derive(Bean, Default)]
/// struct Invoice {
///     #[bean(read_only)]
///     number: String,
///     #[bean(date_pattern = "%d.%m.%Y")]
///     issued: Option<chrono::NaiveDate>,
///     #[bean(number_pattern = "#,##0.00")]
///     total: String,
///     #[bean(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// * `rename = ".."` The property's name
/// * `skip` The field is not a property at all
/// * `read_only` Copies read the property but never write it
/// * `write_only` Copies write the property but never read it
/// * `date_pattern = ".."` A `chrono` format tried when converting this
///   property to or from a date. May be repeated; the first match wins.
/// * `number_pattern = ".."` A decimal pattern such as `#,##0.00` used when
///   converting this property to or from a number. May be repeated.
pub use beancopy_derive::Bean;

mod error;
pub use error::*;

mod convert;
pub use convert::*;

mod classify;
pub use classify::*;

mod coerce;
pub use coerce::{Rule, rule};

mod select;
pub use select::selected_names;

mod options;
pub use options::*;

mod expression;

mod copy;
mod element;

mod copier;
pub use copier::*;

/// Creates a `T` and copies every property of `source` into it
pub fn create_and_copy<T: Bean + Default>(source: &dyn Bean) -> Result<T, CopyError> {
    Copier::new().create_and_copy(source)
}

/// Creates a `T` and copies only the named properties of `source` into it
pub fn create_and_copy_includes<T: Bean + Default>(
    source: &dyn Bean,
    includes: &[&str],
) -> Result<T, CopyError> {
    Copier::with_options(CopyOptions::includes(includes)).create_and_copy(source)
}

/// Creates a `T` and copies all but the named properties of `source` into it
pub fn create_and_copy_excludes<T: Bean + Default>(
    source: &dyn Bean,
    excludes: &[&str],
) -> Result<T, CopyError> {
    Copier::with_options(CopyOptions::excludes(excludes)).create_and_copy(source)
}

/// Creates a `T` and copies `source` into it under `options`
pub fn create_and_copy_with<T: Bean + Default>(
    source: &dyn Bean,
    options: CopyOptions,
) -> Result<T, CopyError> {
    Copier::with_options(options).create_and_copy(source)
}

/// Copies every property of `source` into `target`
pub fn copy(source: &dyn Bean, target: &mut dyn Bean) -> Result<(), CopyError> {
    Copier::new().copy(source, target)
}

/// Copies only the named properties of `source` into `target`
pub fn copy_includes(
    source: &dyn Bean,
    target: &mut dyn Bean,
    includes: &[&str],
) -> Result<(), CopyError> {
    Copier::with_options(CopyOptions::includes(includes)).copy(source, target)
}

/// Copies all but the named properties of `source` into `target`
pub fn copy_excludes(
    source: &dyn Bean,
    target: &mut dyn Bean,
    excludes: &[&str],
) -> Result<(), CopyError> {
    Copier::with_options(CopyOptions::excludes(excludes)).copy(source, target)
}

/// Copies the non-null properties of `source` into `target`, leaving the
/// rest of `target` as it is
pub fn copy_excludes_null(source: &dyn Bean, target: &mut dyn Bean) -> Result<(), CopyError> {
    let options = CopyOptions::builder().excludes_null().build();
    Copier::with_options(options).copy(source, target)
}

/// Copies `source` into `target` under `options`
pub fn copy_with(
    source: &dyn Bean,
    target: &mut dyn Bean,
    options: CopyOptions,
) -> Result<(), CopyError> {
    Copier::with_options(options).copy(source, target)
}

/// Captures the readable properties of `source` into a map
pub fn create_map_and_copy(source: &dyn Bean) -> Result<ValueMap, CopyError> {
    Copier::new().create_map_and_copy(source)
}

/// Captures only the named properties of `source` into a map
pub fn create_map_and_copy_includes(
    source: &dyn Bean,
    includes: &[&str],
) -> Result<ValueMap, CopyError> {
    Copier::with_options(CopyOptions::includes(includes)).create_map_and_copy(source)
}

/// Captures all but the named properties of `source` into a map
pub fn create_map_and_copy_excludes(
    source: &dyn Bean,
    excludes: &[&str],
) -> Result<ValueMap, CopyError> {
    Copier::with_options(CopyOptions::excludes(excludes)).create_map_and_copy(source)
}

/// Captures `source` into a map under `options`
pub fn create_map_and_copy_with(
    source: &dyn Bean,
    options: CopyOptions,
) -> Result<ValueMap, CopyError> {
    Copier::with_options(options).create_map_and_copy(source)
}

/// Captures `source` into a map, nested structs spelled out as dotted keys
pub fn create_flat_map_and_copy(source: &dyn Bean) -> Result<ValueMap, CopyError> {
    Copier::new().create_flat_map_and_copy(source)
}

/// Reads the property at `expression` as a `T`; see
/// [`Copier::get_property_as`]
pub fn get_property_as<T: Reflect>(bean: &dyn Bean, expression: &str) -> Result<T, CopyError> {
    Copier::new().get_property_as(bean, expression)
}

/// Sets the property at `expression`; see [`Copier::set_property`]
pub fn set_property(
    bean: &mut dyn Bean,
    expression: &str,
    value: impl Into<Value>,
) -> Result<(), CopyError> {
    Copier::new().set_property(bean, expression, value)
}
