use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Ident, Type, parse_quote};

use crate::{PField, PName, RenameRule, build_generics, container_rename_rule};

/// One property of the struct, as the generated code sees it
struct PProperty<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
    attrs: PField,
}

/// Processes a struct with named fields to implement `Reflect` and `Bean`
///
/// Example input:
/// ```rust,ignore
/// #[derive(Bean, Default)]
/// struct Blah {
///     foo: u32,
///     #[bean(read_only)]
///     bar: String,
/// }
/// ```
pub(crate) fn process_struct(input: &DeriveInput) -> syn::Result<TokenStream> {
    let syn::Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Bean can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Bean can only be derived for structs with named fields",
        ));
    };

    let rule: Option<RenameRule> = container_rename_rule(&input.attrs)?;

    let mut props: Vec<PProperty<'_>> = Vec::new();
    for field in &named.named {
        let attrs = PField::from_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = PName::new(ident.to_string(), rule, attrs.rename.as_deref()).effective;
        if props.iter().any(|p| p.name == name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate property name {name:?}"),
            ));
        }
        props.push(PProperty {
            ident,
            ty: &field.ty,
            name,
            attrs,
        });
    }

    let type_ident = &input.ident;
    let type_name = type_ident.to_string();
    let generics = build_generics(&input.generics)?;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // rebuilding from a value starts from `Default`, which generic structs
    // may only have for some parameters
    let mut reflect_where = where_clause.cloned();
    if !generics.params.is_empty() {
        reflect_where
            .get_or_insert_with(|| parse_quote!(where))
            .predicates
            .push(parse_quote!(#type_ident #ty_generics: ::core::default::Default));
    }

    let field_shapes: Vec<TokenStream> = props.iter().map(gen_field_shape).collect();
    let fields = if field_shapes.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const { [#(#field_shapes),*] } }
    };

    let readable = props.iter().filter(|p| !p.attrs.write_only);
    let to_value_inserts = readable.clone().map(|p| {
        let (ident, name) = (p.ident, &p.name);
        quote! {
            map.insert(#name, ::beancopy::Reflect::to_value(&self.#ident));
        }
    });
    let readable_count = readable.clone().count();

    let from_value_arms = props.iter().map(|p| {
        let (ident, name) = (p.ident, &p.name);
        quote! {
            #name => {
                this.#ident = ::beancopy::Reflect::from_value(value)
                    .map_err(|e| e.in_property(#name))?;
            }
        }
    });

    let get_arms = props.iter().map(|p| {
        let (ident, name) = (p.ident, &p.name);
        if p.attrs.write_only {
            quote! {
                #name => Err(::beancopy::AccessError::NotReadable {
                    shape: <Self as ::beancopy::Reflect>::SHAPE,
                    property: ::std::string::String::from(name),
                }),
            }
        } else {
            quote! {
                #name => Ok(::beancopy::Reflect::to_value(&self.#ident)),
            }
        }
    });

    let set_arms = props.iter().map(|p| {
        let (ident, name) = (p.ident, &p.name);
        if p.attrs.read_only {
            quote! {
                #name => Err(::beancopy::AccessError::NotWritable {
                    shape: <Self as ::beancopy::Reflect>::SHAPE,
                    property: ::std::string::String::from(name),
                }),
            }
        } else {
            quote! {
                #name => {
                    self.#ident = ::beancopy::Reflect::from_value(value)?;
                    Ok(())
                }
            }
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::beancopy::Reflect for #type_ident #ty_generics #reflect_where {
            const SHAPE: &'static ::beancopy::Shape = &const {
                ::beancopy::Shape::new(
                    #type_name,
                    ::beancopy::Def::Struct(::beancopy::StructDef::new(#fields)),
                )
            };

            fn to_value(&self) -> ::beancopy::Value {
                let mut map = ::beancopy::ValueMap::with_capacity(#readable_count);
                #(#to_value_inserts)*
                ::beancopy::Value::Map(map)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(value: ::beancopy::Value) -> ::core::result::Result<Self, ::beancopy::AccessError> {
                let map = match value {
                    ::beancopy::Value::Map(map) => map,
                    other => {
                        return Err(::beancopy::AccessError::Mismatch {
                            expected: <Self as ::beancopy::Reflect>::SHAPE,
                            found: other.kind(),
                        });
                    }
                };
                let mut this = <Self as ::core::default::Default>::default();
                for (key, value) in map {
                    match key.as_str() {
                        #(#from_value_arms)*
                        _ => {}
                    }
                }
                Ok(this)
            }
        }

        #[automatically_derived]
        impl #impl_generics ::beancopy::Bean for #type_ident #ty_generics #reflect_where {
            fn shape(&self) -> &'static ::beancopy::Shape {
                <Self as ::beancopy::Reflect>::SHAPE
            }

            fn properties(&self) -> ::std::vec::Vec<::beancopy::PropertyDescriptor<'_>> {
                match <Self as ::beancopy::Reflect>::SHAPE.def {
                    ::beancopy::Def::Struct(sd) => ::beancopy::struct_properties(&sd),
                    _ => ::std::vec::Vec::new(),
                }
            }

            fn get(&self, name: &str) -> ::core::result::Result<::beancopy::Value, ::beancopy::AccessError> {
                match name {
                    #(#get_arms)*
                    _ => Err(::beancopy::AccessError::NoSuchProperty {
                        shape: <Self as ::beancopy::Reflect>::SHAPE,
                        property: ::std::string::String::from(name),
                    }),
                }
            }

            #[allow(unused_variables)]
            fn set(
                &mut self,
                name: &str,
                value: ::beancopy::Value,
            ) -> ::core::result::Result<(), ::beancopy::AccessError> {
                match name {
                    #(#set_arms)*
                    _ => Err(::beancopy::AccessError::NoSuchProperty {
                        shape: <Self as ::beancopy::Reflect>::SHAPE,
                        property: ::std::string::String::from(name),
                    }),
                }
            }
        }
    })
}

/// Generates the `Field` descriptor for one property
fn gen_field_shape(prop: &PProperty<'_>) -> TokenStream {
    let PProperty { ty, name, attrs, .. } = prop;

    let mut field = quote! {
        ::beancopy::Field::new(#name, || <#ty as ::beancopy::Reflect>::SHAPE)
    };

    let flags = match (attrs.read_only, attrs.write_only) {
        (true, _) => Some(quote! { ::beancopy::FieldFlags::READ_ONLY }),
        (_, true) => Some(quote! { ::beancopy::FieldFlags::WRITE_ONLY }),
        _ => None,
    };
    if let Some(flags) = flags {
        field.extend(quote! { .with_flags(#flags) });
    }

    if !attrs.date_patterns.is_empty() {
        let patterns = &attrs.date_patterns;
        field.extend(quote! { .with_date_patterns(&[#(#patterns),*]) });
    }
    if !attrs.number_patterns.is_empty() {
        let patterns = &attrs.number_patterns;
        field.extend(quote! { .with_number_patterns(&[#(#patterns),*]) });
    }

    field
}
