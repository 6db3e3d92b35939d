use alloc::borrow::Cow;
use alloc::string::ToString;
use alloc::sync::Arc;

use beancopy_core::{Bean, Reflect, Value, ValueMap};

use crate::copy::{self, Declared, Traversal};
use crate::expression::{self, Step};
use crate::options;
use crate::{BasicConverter, CopyError, CopyOptions, ScalarConverter};

/// Copies properties between beans with a fixed set of options and a scalar
/// converter.
///
/// Process-wide options set with [`configure`](crate::configure) are merged
/// under the copier's own at every call.
///
/// ```
/// use beancopy::{Bean, Copier, CopyOptions};
///
/// #[derive(Bean, Default)]
/// struct User {
///     id: u32,
///     name: String,
///     password: String,
/// }
///
/// #[derive(Bean, Default)]
/// struct PublicUser {
///     id: u64,
///     name: String,
/// }
///
/// let copier = Copier::with_options(CopyOptions::excludes(&["password"]));
/// let user = User { id: 7, name: "Ann".into(), password: "hunter2".into() };
/// let public: PublicUser = copier.create_and_copy(&user)?;
/// assert_eq!(public.id, 7);
/// assert_eq!(public.name, "Ann");
/// # Ok::<(), beancopy::CopyError>(())
/// ```
#[derive(Clone)]
pub struct Copier {
    options: CopyOptions,
    converter: Arc<dyn ScalarConverter>,
}

impl Default for Copier {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Copier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Copier")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Copier {
    /// A copier with default options and the [`BasicConverter`]
    pub fn new() -> Self {
        Self::with_options(CopyOptions::default())
    }

    /// A copier with the given options and the [`BasicConverter`]
    pub fn with_options(options: CopyOptions) -> Self {
        Self {
            options,
            converter: Arc::new(BasicConverter),
        }
    }

    /// Replaces the scalar converter
    #[must_use]
    pub fn with_converter(mut self, converter: impl ScalarConverter + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    /// The copier's own options, without the process-wide ones
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    fn effective_options(&self) -> Cow<'_, CopyOptions> {
        match options::global() {
            Some(global) => Cow::Owned(self.options.merged_over(&global)),
            None => Cow::Borrowed(&self.options),
        }
    }

    /// Copies the properties of `source` into `target`.
    ///
    /// Properties are matched by name; source properties the target lacks
    /// are skipped, and so are target properties the source lacks. Values are
    /// coerced to the target's declared types, nested structs are merged
    /// into, and collections are rebuilt.
    pub fn copy(&self, source: &dyn Bean, target: &mut dyn Bean) -> Result<(), CopyError> {
        let options = self.effective_options();
        Traversal::new(&options, &*self.converter).copy(source, target)
    }

    /// Creates a `T` from its [`Default`] and copies `source` into it
    pub fn create_and_copy<T: Bean + Default>(&self, source: &dyn Bean) -> Result<T, CopyError> {
        let mut target = T::default();
        self.copy(source, &mut target)?;
        Ok(target)
    }

    /// Captures the readable properties of `source` into a map, without
    /// converting them
    pub fn create_map_and_copy(&self, source: &dyn Bean) -> Result<ValueMap, CopyError> {
        copy::capture(source, &self.effective_options(), false)
    }

    /// Like [`create_map_and_copy`](Self::create_map_and_copy), with nested
    /// structs spelled out as dotted keys: `{"address.city": "Oslo"}`
    pub fn create_flat_map_and_copy(&self, source: &dyn Bean) -> Result<ValueMap, CopyError> {
        copy::capture(source, &self.effective_options(), true)
    }

    /// Sets the property at `expression`, e.g. `address.city` or
    /// `lines[0].quantity`, converting `value` to its declared type.
    ///
    /// Properties explicitly addressed this way must exist and be writable.
    /// Missing maps and lists along a nested path are created; an index may
    /// address an existing element or the one just past the end.
    pub fn set_property(
        &self,
        bean: &mut dyn Bean,
        expression: &str,
        value: impl Into<Value>,
    ) -> Result<(), CopyError> {
        let steps = expression::parse(expression)?;
        let Some((Step::Name(root), rest)) = steps.split_first() else {
            return Err(CopyError::InvalidExpression {
                expression: expression.to_string(),
                reason: "must start with a property name",
            });
        };
        let options = self.effective_options();
        Traversal::new(&options, &*self.converter).set_property(
            bean,
            expression,
            root,
            rest,
            value.into(),
        )
    }

    /// Reads the property at `expression` like [`get_property`], then
    /// converts it into a `T` the way a copy into a `T` property would.
    ///
    /// The date and number patterns declared on a top-level property apply.
    pub fn get_property_as<T: Reflect>(
        &self,
        bean: &dyn Bean,
        expression: &str,
    ) -> Result<T, CopyError> {
        let value = get_property(bean, expression)?;
        let declared = bean
            .property(expression)
            .map(|p| Declared {
                date: p.date_patterns,
                number: p.number_patterns,
            })
            .unwrap_or_default();

        let options = self.effective_options();
        let mut traversal = Traversal::new(&options, &*self.converter);
        let value = traversal.at(Step::Name(expression.to_string()), |t| {
            t.copy_element(value, T::SHAPE, None, declared)
        })?;
        T::from_value(value).map_err(|e| CopyError::from_access(expression.to_string(), e))
    }
}

/// Reads the property at `expression`, e.g. `address.city` or
/// `lines[0].quantity`.
///
/// A null on the way reads as null. A property or entry that does not exist
/// is [`CopyError::NoSuchProperty`].
pub fn get_property(bean: &dyn Bean, expression: &str) -> Result<Value, CopyError> {
    let steps = expression::parse(expression)?;
    let Some((Step::Name(root), rest)) = steps.split_first() else {
        return Err(CopyError::InvalidExpression {
            expression: expression.to_string(),
            reason: "must start with a property name",
        });
    };
    let value = bean
        .get(root)
        .map_err(|e| CopyError::from_access(root.clone(), e))?;
    expression::lookup(value, rest).ok_or_else(|| CopyError::NoSuchProperty {
        shape: bean.shape(),
        property: expression.to_string(),
    })
}
