use alloc::string::ToString;

use beancopy_core::{Shape, Value};
use log::trace;

use crate::classify::{TargetShape, ValueShape};
use crate::coerce::{Rule, rule};
use crate::copy::{Declared, Traversal};
use crate::{BasicConverter, ConversionContext, CopyError, ScalarConverter};

impl Traversal<'_> {
    /// Turns `value` into something `shape` accepts. `current` is what the
    /// target holds now; it only matters for structs, which are merged into
    /// rather than replaced.
    pub(crate) fn copy_element(
        &mut self,
        value: Value,
        shape: &'static Shape,
        current: Option<Value>,
        declared: Declared,
    ) -> Result<Value, CopyError> {
        let from = ValueShape::of(&value);
        let to = TargetShape::of(shape);
        let Some(rule) = rule(from, to) else {
            return Err(self.coercion_failed(
                value.kind(),
                shape,
                alloc::format!("cannot make a {} out of a {}", to.name(), from.name()),
            ));
        };
        trace!("{}: {} into {shape} by {rule:?}", self.path(), from.name());

        match rule {
            Rule::Null if shape.is_nullable() => Ok(Value::Null),
            Rule::Null => Err(self.coercion_failed("null", shape, "the element cannot be null")),
            Rule::PassThrough => Ok(value),
            Rule::Convert | Rule::Extract => self.convert_scalar(value, shape, declared),
            Rule::ToSequence | Rule::ToSet | Rule::ToArray => {
                self.descend(|t| t.coerce_collection(value, shape, to, declared))
            }
            Rule::ToMapping => self.descend(|t| t.coerce_mapping(value, shape, declared)),
            Rule::ToStruct => self.descend(|t| t.copy_struct(value, shape, current)),
        }
    }

    /// Runs the scalar converter for the current property: a converter
    /// registered for it by name or type, else the copier's own
    fn convert_scalar(
        &mut self,
        value: Value,
        shape: &'static Shape,
        declared: Declared,
    ) -> Result<Value, CopyError> {
        let Some(target) = shape.scalar_type() else {
            return Err(self.coercion_failed(value.kind(), shape, "not a scalar type"));
        };

        let names = self.names();
        let date_patterns = self.options.date_patterns_for(&names, declared.date);
        let number_patterns = self.options.number_patterns_for(&names, declared.number);
        let ctx = ConversionContext {
            property: &names,
            date_patterns: &date_patterns,
            number_patterns: &number_patterns,
            nullable: shape.is_nullable(),
        };

        let shown = value.to_string();
        let converted = match self.options.converter_for(&names, target) {
            // Whatever a custom converter hands back still has to fit the type
            Some(custom) => (**custom)(value).and_then(|v| BasicConverter.convert(v, target, &ctx)),
            None => self.converter.convert(value, target, &ctx),
        };
        converted.map_err(|error| CopyError::ConversionFailed {
            property: self.path(),
            target: shape,
            value: shown,
            error,
        })
    }

    fn copy_struct(
        &mut self,
        value: Value,
        shape: &'static Shape,
        current: Option<Value>,
    ) -> Result<Value, CopyError> {
        let (Some(def), Value::Map(entries)) = (shape.struct_def(), value) else {
            return Err(self.coercion_failed("value", shape, "not a struct"));
        };
        self.merge_struct(entries, shape.non_null(), def, current)
    }
}
