use syn::{Attribute, LitStr};

use crate::RenameRule;

/// All the supported bean attributes, e.g. `#[bean(read_only)]`,
/// `#[bean(rename_all = "camelCase")]`.
///
/// Stands for `parsed bean attr`
#[derive(Debug, PartialEq, Eq)]
pub enum PBeanAttr {
    /// Valid in container
    /// `#[bean(rename_all = "rule")]`: rename all fields following a rule
    RenameAll { rule: RenameRule },

    /// Valid in field
    /// `#[bean(rename = "name")]`: the property's name
    Rename { name: String },

    /// Valid in field
    /// `#[bean(skip)]`: the field is not a property
    Skip,

    /// Valid in field
    /// `#[bean(read_only)]`: copies never write the property
    ReadOnly,

    /// Valid in field
    /// `#[bean(write_only)]`: copies never read the property
    WriteOnly,

    /// Valid in field
    /// `#[bean(date_pattern = "%Y/%m/%d")]`
    DatePattern { pattern: String },

    /// Valid in field
    /// `#[bean(number_pattern = "#,##0.00")]`
    NumberPattern { pattern: String },
}

/// Parses every `#[bean(...)]` attribute in `attrs`, in order. Other
/// attributes are ignored.
pub fn parse_attributes(attrs: &[Attribute]) -> syn::Result<Vec<PBeanAttr>> {
    let mut result = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("bean") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let string_value = || -> syn::Result<String> {
                let lit: LitStr = meta.value()?.parse()?;
                Ok(lit.value())
            };

            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                let rule = RenameRule::parse(&lit.value()).ok_or_else(|| {
                    let known = RenameRule::ALL
                        .iter()
                        .map(|(name, _)| *name)
                        .collect::<Vec<_>>()
                        .join(", ");
                    syn::Error::new(
                        lit.span(),
                        format!("unknown rename rule, expected one of: {known}"),
                    )
                })?;
                result.push(PBeanAttr::RenameAll { rule });
            } else if meta.path.is_ident("rename") {
                let name = string_value()?;
                if name.is_empty() {
                    return Err(meta.error("rename must not be empty"));
                }
                result.push(PBeanAttr::Rename { name });
            } else if meta.path.is_ident("skip") {
                result.push(PBeanAttr::Skip);
            } else if meta.path.is_ident("read_only") {
                result.push(PBeanAttr::ReadOnly);
            } else if meta.path.is_ident("write_only") {
                result.push(PBeanAttr::WriteOnly);
            } else if meta.path.is_ident("date_pattern") {
                result.push(PBeanAttr::DatePattern {
                    pattern: string_value()?,
                });
            } else if meta.path.is_ident("number_pattern") {
                result.push(PBeanAttr::NumberPattern {
                    pattern: string_value()?,
                });
            } else {
                return Err(meta.error("unsupported bean attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

/// A parsed name, which includes the raw name and the effective name.
///
/// Examples:
///
///   raw = "foo_bar", no rename rule, effective = "foo_bar"
///   raw = "foo_bar", #[bean(rename = "kiki")], effective = "kiki"
///   raw = "foo_bar", #[bean(rename_all = "camelCase")], effective = "fooBar"
///   raw = "r#type", no rename rule, effective = "type"
pub struct PName {
    pub raw: String,
    pub effective: String,
}

impl PName {
    /// An explicit `rename` wins over the container's `rename_all`.
    pub fn new(raw: String, container_rule: Option<RenameRule>, rename: Option<&str>) -> Self {
        let stripped = raw.strip_prefix("r#").unwrap_or(&raw);
        let effective = match (rename, container_rule) {
            (Some(name), _) => name.to_string(),
            (None, Some(rule)) => rule.apply(stripped),
            (None, None) => stripped.to_string(),
        };
        Self { raw, effective }
    }
}

/// Everything the attributes say about one field
#[derive(Debug, Default)]
pub struct PField {
    pub rename: Option<String>,
    pub skip: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub date_patterns: Vec<String>,
    pub number_patterns: Vec<String>,
}

impl PField {
    /// Folds a field's attributes together
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut field = PField::default();
        for attr in parse_attributes(attrs)? {
            match attr {
                PBeanAttr::Rename { name } => field.rename = Some(name),
                PBeanAttr::Skip => field.skip = true,
                PBeanAttr::ReadOnly => field.read_only = true,
                PBeanAttr::WriteOnly => field.write_only = true,
                PBeanAttr::DatePattern { pattern } => field.date_patterns.push(pattern),
                PBeanAttr::NumberPattern { pattern } => field.number_patterns.push(pattern),
                PBeanAttr::RenameAll { .. } => {
                    return Err(syn::Error::new_spanned(
                        &attrs[0],
                        "rename_all is only valid on the struct itself",
                    ));
                }
            }
        }
        if field.read_only && field.write_only {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "a property cannot be both read_only and write_only",
            ));
        }
        Ok(field)
    }
}

/// Reads the container's rename rule, rejecting field-only attributes
pub fn container_rename_rule(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in parse_attributes(attrs)? {
        match attr {
            PBeanAttr::RenameAll { rule: r } => rule = Some(r),
            other => {
                return Err(syn::Error::new_spanned(
                    &attrs[0],
                    format!("{other:?} is only valid on fields"),
                ));
            }
        }
    }
    Ok(rule)
}
