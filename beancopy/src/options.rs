use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use beancopy_core::{ScalarType, Value};

use crate::ConversionError;
use crate::select::Selection;

/// A custom conversion, registered with [`CopyOptionsBuilder::converter`] or
/// [`CopyOptionsBuilder::converter_by_name`].
///
/// Its output goes through [`BasicConverter`](crate::BasicConverter) once
/// more, so returning e.g. a string for an integer target is fine.
pub type ConverterFn = Arc<dyn Fn(Value) -> Result<Value, ConversionError> + Send + Sync>;

/// Nesting limit when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for one copy: which properties, how nulls are treated, and how
/// scalars are converted.
///
/// Names given to the `*_by_name` settings are dotted paths relative to the
/// root of the copy, without indices: `address.zip` applies to the `zip`
/// property of the `address` property, and `lines.price` to the `price` of
/// every element of `lines`.
#[derive(Clone, Default)]
pub struct CopyOptions {
    pub(crate) selection: Selection,
    pub(crate) excludes_null: bool,
    typed_converters: Vec<(ScalarType, ConverterFn)>,
    named_converters: Vec<(String, ConverterFn)>,
    date_patterns: Vec<String>,
    number_patterns: Vec<String>,
    named_date_patterns: Vec<(String, Vec<String>)>,
    named_number_patterns: Vec<(String, Vec<String>)>,
    max_depth: Option<usize>,
}

impl CopyOptions {
    /// Starts building options
    pub fn builder() -> CopyOptionsBuilder {
        CopyOptionsBuilder::default()
    }

    /// Options that only copy the given properties
    pub fn includes(names: &[&str]) -> Self {
        Self::builder().includes(names).build()
    }

    /// Options that copy everything but the given properties
    pub fn excludes(names: &[&str]) -> Self {
        Self::builder().excludes(names).build()
    }

    /// Returns true if null source values are skipped
    pub fn is_excludes_null(&self) -> bool {
        self.excludes_null
    }

    /// The nesting limit
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Combines these options with `lower` ones: anything set here wins, and
    /// converters and named patterns of both are kept, these first. A
    /// selection is taken whole: any include or exclude given here replaces
    /// both lists of `lower`.
    pub fn merged_over(&self, lower: &CopyOptions) -> CopyOptions {
        fn first_non_empty<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
            if a.is_empty() { b.to_vec() } else { a.to_vec() }
        }
        fn concat<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
            a.iter().chain(b).cloned().collect()
        }

        CopyOptions {
            selection: if self.selection.is_empty() {
                lower.selection.clone()
            } else {
                self.selection.clone()
            },
            excludes_null: self.excludes_null || lower.excludes_null,
            typed_converters: concat(&self.typed_converters, &lower.typed_converters),
            named_converters: concat(&self.named_converters, &lower.named_converters),
            date_patterns: first_non_empty(&self.date_patterns, &lower.date_patterns),
            number_patterns: first_non_empty(&self.number_patterns, &lower.number_patterns),
            named_date_patterns: concat(&self.named_date_patterns, &lower.named_date_patterns),
            named_number_patterns: concat(
                &self.named_number_patterns,
                &lower.named_number_patterns,
            ),
            max_depth: self.max_depth.or(lower.max_depth),
        }
    }

    /// The converter for a property: registered by name first, by type second
    pub(crate) fn converter_for(&self, name: &str, target: ScalarType) -> Option<&ConverterFn> {
        self.named_converters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .or_else(|| {
                self.typed_converters
                    .iter()
                    .find(|(t, _)| *t == target)
                    .map(|(_, f)| f)
            })
    }

    /// Date patterns for a property: by name, then those declared on the
    /// field, then the general ones
    pub(crate) fn date_patterns_for<'a>(
        &'a self,
        name: &str,
        declared: &'static [&'static str],
    ) -> Vec<&'a str> {
        patterns_for(&self.named_date_patterns, name, declared, &self.date_patterns)
    }

    /// Number patterns for a property, looked up like
    /// [`date_patterns_for`](Self::date_patterns_for)
    pub(crate) fn number_patterns_for<'a>(
        &'a self,
        name: &str,
        declared: &'static [&'static str],
    ) -> Vec<&'a str> {
        patterns_for(
            &self.named_number_patterns,
            name,
            declared,
            &self.number_patterns,
        )
    }
}

fn patterns_for<'a>(
    named: &'a [(String, Vec<String>)],
    name: &str,
    declared: &'static [&'static str],
    general: &'a [String],
) -> Vec<&'a str> {
    if let Some((_, patterns)) = named.iter().find(|(n, _)| n == name) {
        return patterns.iter().map(String::as_str).collect();
    }
    if !declared.is_empty() {
        return declared.to_vec();
    }
    general.iter().map(String::as_str).collect()
}

impl core::fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let typed: Vec<_> = self.typed_converters.iter().map(|(t, _)| t).collect();
        let named: Vec<_> = self.named_converters.iter().map(|(n, _)| n).collect();
        f.debug_struct("CopyOptions")
            .field("includes", &self.selection.includes)
            .field("excludes", &self.selection.excludes)
            .field("excludes_null", &self.excludes_null)
            .field("typed_converters", &typed)
            .field("named_converters", &named)
            .field("date_patterns", &self.date_patterns)
            .field("number_patterns", &self.number_patterns)
            .field("named_date_patterns", &self.named_date_patterns)
            .field("named_number_patterns", &self.named_number_patterns)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Builds [`CopyOptions`].
///
/// ```
/// use beancopy::{CopyOptions, ScalarType, Value};
///
/// let options = CopyOptions::builder()
///     .excludes(&["password"])
///     .date_pattern("%Y/%m/%d")
///     .number_pattern_by_name("price", "#,##0.00")
///     .converter(ScalarType::String, |v| match v {
///         Value::String(s) => Ok(Value::String(s.trim().to_string())),
///         other => Ok(other),
///     })
///     .build();
/// assert!(!options.is_excludes_null());
/// ```
#[derive(Default)]
#[must_use]
pub struct CopyOptionsBuilder {
    options: CopyOptions,
}

impl CopyOptionsBuilder {
    /// Only copies the given top-level properties. Takes precedence over
    /// [`excludes`](Self::excludes).
    pub fn includes(mut self, names: &[&str]) -> Self {
        let includes = &mut self.options.selection.includes;
        includes.extend(names.iter().map(|n| String::from(*n)));
        self
    }

    /// Copies every top-level property except the given ones
    pub fn excludes(mut self, names: &[&str]) -> Self {
        let excludes = &mut self.options.selection.excludes;
        excludes.extend(names.iter().map(|n| String::from(*n)));
        self
    }

    /// Null source values never overwrite the target
    pub fn excludes_null(mut self) -> Self {
        self.options.excludes_null = true;
        self
    }

    /// Converts every value headed for a `target` scalar with `f`
    pub fn converter<F>(mut self, target: ScalarType, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        let f: ConverterFn = Arc::new(f);
        self.options.typed_converters.push((target, f));
        self
    }

    /// Converts the values of one property with `f`. Wins over
    /// [`converter`](Self::converter).
    pub fn converter_by_name<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        let f: ConverterFn = Arc::new(f);
        self.options.named_converters.push((String::from(name), f));
        self
    }

    /// Adds a date pattern (`chrono` format syntax) for every property
    pub fn date_pattern(mut self, pattern: &str) -> Self {
        self.options.date_patterns.push(String::from(pattern));
        self
    }

    /// Adds date patterns for every property, tried in order
    pub fn date_patterns(mut self, patterns: &[&str]) -> Self {
        let all = &mut self.options.date_patterns;
        all.extend(patterns.iter().map(|p| String::from(*p)));
        self
    }

    /// Adds a date pattern for one property
    pub fn date_pattern_by_name(self, name: &str, pattern: &str) -> Self {
        self.date_patterns_by_name(name, &[pattern])
    }

    /// Adds date patterns for one property, tried in order
    pub fn date_patterns_by_name(mut self, name: &str, patterns: &[&str]) -> Self {
        add_named(&mut self.options.named_date_patterns, name, patterns);
        self
    }

    /// Adds a number pattern (e.g. `#,##0.00`) for every property
    pub fn number_pattern(mut self, pattern: &str) -> Self {
        self.options.number_patterns.push(String::from(pattern));
        self
    }

    /// Adds number patterns for every property, tried in order
    pub fn number_patterns(mut self, patterns: &[&str]) -> Self {
        let all = &mut self.options.number_patterns;
        all.extend(patterns.iter().map(|p| String::from(*p)));
        self
    }

    /// Adds a number pattern for one property
    pub fn number_pattern_by_name(self, name: &str, pattern: &str) -> Self {
        self.number_patterns_by_name(name, &[pattern])
    }

    /// Adds number patterns for one property, tried in order
    pub fn number_patterns_by_name(mut self, name: &str, patterns: &[&str]) -> Self {
        add_named(&mut self.options.named_number_patterns, name, patterns);
        self
    }

    /// How deep the object graph may nest before the copy gives up
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }

    /// Finishes building
    pub fn build(self) -> CopyOptions {
        self.options
    }
}

fn add_named(named: &mut Vec<(String, Vec<String>)>, name: &str, patterns: &[&str]) {
    let patterns = patterns.iter().map(|p| String::from(*p));
    match named.iter_mut().find(|(n, _)| n == name) {
        Some((_, existing)) => existing.extend(patterns),
        None => named.push((String::from(name), patterns.collect())),
    }
}

static GLOBAL: RwLock<Option<Arc<CopyOptions>>> = RwLock::new(None);

/// Sets process-wide default options.
///
/// Every copy merges its own options over these (see
/// [`CopyOptions::merged_over`]). Typically used for date and number
/// patterns, or converters, that hold everywhere.
pub fn configure(options: CopyOptions) {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    *global = Some(Arc::new(options));
}

/// Drops the process-wide default options
pub fn reset_configuration() {
    let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    *global = None;
}

pub(crate) fn global() -> Option<Arc<CopyOptions>> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_patterns_beat_declared_beat_general() {
        let options = CopyOptions::builder()
            .date_pattern("%Y")
            .date_pattern_by_name("born", "%d.%m.%Y")
            .date_pattern_by_name("born", "%d/%m/%Y")
            .build();
        assert_eq!(
            options.date_patterns_for("born", &["%m-%d"]),
            ["%d.%m.%Y", "%d/%m/%Y"]
        );
        assert_eq!(options.date_patterns_for("died", &["%m-%d"]), ["%m-%d"]);
        assert_eq!(options.date_patterns_for("died", &[]), ["%Y"]);
        assert!(options.number_patterns_for("died", &[]).is_empty());
    }

    #[test]
    fn per_call_options_win_over_global_ones() {
        let global = CopyOptions::builder()
            .number_pattern("#,##0")
            .date_pattern("%Y%m%d")
            .excludes(&["secret"])
            .converter(ScalarType::Bool, |_| Ok(Value::Bool(true)))
            .max_depth(8)
            .build();
        let call = CopyOptions::builder()
            .date_pattern("%d/%m/%Y")
            .converter(ScalarType::Bool, |_| Ok(Value::Bool(false)))
            .build();

        let merged = call.merged_over(&global);
        assert_eq!(merged.date_patterns_for("x", &[]), ["%d/%m/%Y"]);
        assert_eq!(merged.number_patterns_for("x", &[]), ["#,##0"]);
        assert!(!merged.selection.is_selected("secret"));
        assert_eq!(merged.max_depth(), 8);

        let f = merged.converter_for("x", ScalarType::Bool).unwrap();
        assert_eq!(f(Value::Null), Ok(Value::Bool(false)));
    }

    #[test]
    fn a_per_call_selection_replaces_the_global_one() {
        let global = CopyOptions::builder().includes(&["id", "name"]).build();
        let call = CopyOptions::builder().excludes(&["name"]).build();

        let merged = call.merged_over(&global);
        assert!(merged.selection.includes.is_empty());
        assert!(!merged.selection.is_selected("name"));
        assert!(merged.selection.is_selected("other"));

        let merged = CopyOptions::default().merged_over(&global);
        assert!(merged.selection.is_selected("id"));
        assert!(!merged.selection.is_selected("other"));
    }

    #[test]
    fn converters_by_name_beat_converters_by_type() {
        let options = CopyOptions::builder()
            .converter(ScalarType::I32, |_| Ok(Value::I64(1)))
            .converter_by_name("qty", |_| Ok(Value::I64(2)))
            .build();
        let by_name = options.converter_for("qty", ScalarType::I32).unwrap();
        assert_eq!(by_name(Value::Null), Ok(Value::I64(2)));
        let by_type = options.converter_for("other", ScalarType::I32).unwrap();
        assert_eq!(by_type(Value::Null), Ok(Value::I64(1)));
        assert!(options.converter_for("other", ScalarType::I64).is_none());
        assert_eq!(CopyOptions::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn debug_lists_converter_keys() {
        let options = CopyOptions::builder()
            .converter_by_name("qty", Ok)
            .excludes_null()
            .build();
        let rendered = format!("{options:?}");
        assert!(rendered.contains("\"qty\""), "{rendered}");
        assert!(rendered.contains("excludes_null: true"), "{rendered}");
    }
}
