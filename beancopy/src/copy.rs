use alloc::string::{String, ToString};
use alloc::vec::Vec;

use beancopy_core::{
    AccessError, Bean, PropertyDescriptor, Reflect, Shape, StructDef, Value, ValueMap,
    struct_properties,
};
use log::{debug, trace};

use crate::expression::{self, Step};
use crate::select::Selection;
use crate::{CopyError, CopyOptions, ScalarConverter};

/// Patterns declared on the property a value is being copied into. Elements
/// of a collection inherit them; a nested struct's fields declare their own.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Declared {
    pub(crate) date: &'static [&'static str],
    pub(crate) number: &'static [&'static str],
}

/// One property of the target, owned so the target can be written while we
/// walk its properties
#[derive(Debug)]
struct Slot {
    name: String,
    shape: &'static Shape,
    readable: bool,
    writable: bool,
    declared: Declared,
}

impl From<PropertyDescriptor<'_>> for Slot {
    fn from(p: PropertyDescriptor<'_>) -> Self {
        Slot {
            name: p.name.to_string(),
            shape: p.shape,
            readable: p.is_readable(),
            writable: p.is_writable(),
            declared: Declared {
                date: p.date_patterns,
                number: p.number_patterns,
            },
        }
    }
}

/// State of one copy: the options in effect, where we are in the graph, and
/// how deep.
pub(crate) struct Traversal<'a> {
    pub(crate) options: &'a CopyOptions,
    pub(crate) converter: &'a dyn ScalarConverter,
    path: Vec<Step>,
    depth: usize,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(options: &'a CopyOptions, converter: &'a dyn ScalarConverter) -> Self {
        Self {
            options,
            converter,
            path: Vec::new(),
            depth: 0,
        }
    }

    /// Full path of the current property, e.g. `lines[2].quantity`
    pub(crate) fn path(&self) -> String {
        expression::render(&self.path)
    }

    /// Name-only path of the current property, e.g. `lines.quantity`
    pub(crate) fn names(&self) -> String {
        expression::render_names(&self.path)
    }

    /// Runs `f` one step further down the path
    pub(crate) fn at<T>(
        &mut self,
        step: Step,
        f: impl FnOnce(&mut Self) -> Result<T, CopyError>,
    ) -> Result<T, CopyError> {
        self.path.push(step);
        let result = f(self);
        self.path.pop();
        result
    }

    /// Runs `f` one level deeper into the graph, failing once the depth
    /// limit is reached
    pub(crate) fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CopyError>,
    ) -> Result<T, CopyError> {
        let limit = self.options.max_depth();
        if self.depth >= limit {
            return Err(CopyError::DepthLimitExceeded {
                property: self.path(),
                limit,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn coercion_failed(
        &self,
        from: &'static str,
        to: &'static Shape,
        reason: impl Into<String>,
    ) -> CopyError {
        CopyError::CoercionFailed {
            property: self.path(),
            from,
            to,
            reason: reason.into(),
        }
    }

    fn access_failed(&self, error: AccessError) -> CopyError {
        CopyError::from_access(self.path(), error)
    }

    /// Copies every selected property of `source` into `target`
    pub(crate) fn copy(&mut self, source: &dyn Bean, target: &mut dyn Bean) -> Result<(), CopyError> {
        let entries = source_entries(source)?;
        debug!(
            "Copying {} properties from {} into {}",
            entries.len(),
            source.shape(),
            target.shape()
        );
        let options = self.options;
        self.merge(entries, target, &options.selection)
    }

    /// Writes `entries` into `target`, property by property
    pub(crate) fn merge(
        &mut self,
        entries: ValueMap,
        target: &mut dyn Bean,
        selection: &Selection,
    ) -> Result<(), CopyError> {
        if target.is_open() {
            return self.merge_open(entries, target, selection);
        }

        let mut entries = entries;
        let slots: Vec<Slot> = target.properties().into_iter().map(Slot::from).collect();
        for name in entries.keys() {
            if !slots.iter().any(|s| s.name == name) {
                debug!("{} has no property {name}, skipping it", target.shape());
            }
        }

        for slot in slots {
            if !selection.is_selected(&slot.name) {
                trace!("{} is not selected", slot.name);
                continue;
            }
            let Some(value) = entries.remove(&slot.name) else {
                trace!("{} is absent from the source", slot.name);
                continue;
            };
            let explicit = selection.is_included(&slot.name);
            self.at(Step::Name(slot.name.clone()), |t| {
                t.write_property(target, &slot, value, explicit)
            })?;
        }
        Ok(())
    }

    /// Mappings take every entry as it is, under the same name
    fn merge_open(
        &mut self,
        entries: ValueMap,
        target: &mut dyn Bean,
        selection: &Selection,
    ) -> Result<(), CopyError> {
        for (name, value) in entries {
            if !selection.is_selected(&name) {
                trace!("{name} is not selected");
                continue;
            }
            if value.is_null() && self.options.excludes_null {
                debug!("Skipping null {name}");
                continue;
            }
            self.at(Step::Name(name.clone()), |t| {
                target.set(&name, value).map_err(|e| t.access_failed(e))
            })?;
        }
        Ok(())
    }

    /// Writes one value into one property of a closed target. The path
    /// already ends with the property's name.
    fn write_property(
        &mut self,
        target: &mut dyn Bean,
        slot: &Slot,
        value: Value,
        explicit: bool,
    ) -> Result<(), CopyError> {
        if !slot.writable {
            if explicit {
                return Err(CopyError::NotWritable {
                    shape: target.shape(),
                    property: self.path(),
                });
            }
            debug!("Skipping read-only {}", self.path());
            return Ok(());
        }

        if value.is_null() {
            if self.options.excludes_null {
                debug!("Skipping null {}", self.path());
                return Ok(());
            }
            if !slot.shape.is_nullable() {
                debug!(
                    "Leaving {} as it is: {} cannot hold null",
                    self.path(),
                    slot.shape
                );
                return Ok(());
            }
            trace!("Clearing {}", self.path());
            return target
                .set(&slot.name, Value::Null)
                .map_err(|e| self.access_failed(e));
        }

        // Nested structs are merged into what the target already holds
        let current = match slot.shape.struct_def() {
            Some(_) if slot.readable => target.get(&slot.name).ok(),
            _ => None,
        };
        let value = self.copy_element(value, slot.shape, current, slot.declared)?;
        trace!("Setting {} to {value}", self.path());
        target
            .set(&slot.name, value)
            .map_err(|e| self.access_failed(e))
    }

    /// Merges a mapping into a struct's fields, starting from `current` (the
    /// struct as it is now) when there is one
    pub(crate) fn merge_struct(
        &mut self,
        entries: ValueMap,
        shape: &'static Shape,
        def: StructDef,
        current: Option<Value>,
    ) -> Result<Value, CopyError> {
        let values = match current {
            Some(Value::Map(map)) => map,
            _ => ValueMap::new(),
        };
        let mut view = StructView {
            shape,
            def,
            values,
        };
        // Selections only ever name top-level properties
        self.merge(expression::unflatten(entries)?, &mut view, &Selection::default())?;
        Ok(Value::Map(view.values))
    }

    /// Sets the property `root`, or something below it when `rest` is not
    /// empty
    pub(crate) fn set_property(
        &mut self,
        target: &mut dyn Bean,
        full: &str,
        root: &str,
        rest: &[Step],
        value: Value,
    ) -> Result<(), CopyError> {
        let (slot, exists) = match target.property(root) {
            Some(p) => (Slot::from(p), true),
            None if target.is_open() => (Slot::from(PropertyDescriptor::dynamic(root)), false),
            None => {
                return Err(CopyError::NoSuchProperty {
                    shape: target.shape(),
                    property: root.to_string(),
                });
            }
        };

        let value = if rest.is_empty() {
            value
        } else {
            let mut tree = if exists && slot.readable {
                target
                    .get(root)
                    .map_err(|e| CopyError::from_access(root.to_string(), e))?
            } else {
                Value::Null
            };
            expression::assign(&mut tree, rest, value).map_err(|reason| {
                CopyError::InvalidExpression {
                    expression: full.to_string(),
                    reason,
                }
            })?;
            tree
        };

        self.at(Step::Name(root.to_string()), |t| {
            t.write_property(target, &slot, value, true)
        })
    }
}

/// Captures a source's properties. Dotted keys of a mapping source are
/// folded into nested entries.
pub(crate) fn source_entries(source: &dyn Bean) -> Result<ValueMap, CopyError> {
    let entries = source
        .to_value_map()
        .map_err(|e| CopyError::from_access(String::new(), e))?;
    if source.is_open() {
        expression::unflatten(entries)
    } else {
        Ok(entries)
    }
}

/// Captures a source into a map, honouring the selection and null policy of
/// `options`. With `flat`, nested structs are spelled out as dotted keys.
pub(crate) fn capture(
    source: &dyn Bean,
    options: &CopyOptions,
    flat: bool,
) -> Result<ValueMap, CopyError> {
    let entries = source
        .to_value_map()
        .map_err(|e| CopyError::from_access(String::new(), e))?;

    let mut out = ValueMap::with_capacity(entries.len());
    for (name, value) in entries {
        if !options.selection.is_selected(&name) {
            trace!("{name} is not selected");
            continue;
        }
        if value.is_null() && options.excludes_null {
            debug!("Skipping null {name}");
            continue;
        }
        if flat {
            let shape = source.property(&name).map_or(Value::SHAPE, |p| p.shape);
            expression::flatten_into(&mut out, &name, value, shape);
        } else {
            out.insert(name, value);
        }
    }
    Ok(out)
}

/// A struct under construction: its fields as a map, with the struct's
/// properties and flags
struct StructView {
    shape: &'static Shape,
    def: StructDef,
    values: ValueMap,
}

impl Bean for StructView {
    fn shape(&self) -> &'static Shape {
        self.shape
    }

    fn properties(&self) -> Vec<PropertyDescriptor<'_>> {
        struct_properties(&self.def)
    }

    fn get(&self, name: &str) -> Result<Value, AccessError> {
        if self.def.field(name).is_none() {
            return Err(AccessError::NoSuchProperty {
                shape: self.shape,
                property: name.into(),
            });
        }
        Ok(self.values.get(name).cloned().unwrap_or_default())
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        if self.def.field(name).is_none() {
            return Err(AccessError::NoSuchProperty {
                shape: self.shape,
                property: name.into(),
            });
        }
        self.values.insert(name, value);
        Ok(())
    }
}
