use syn::{GenericParam, Generics, parse_quote};

/// Copies the struct's generics, bounding every type parameter by `Reflect`.
///
/// Shapes are `'static`, so lifetime parameters are rejected.
pub fn build_generics(generics: &Generics) -> syn::Result<Generics> {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        match param {
            GenericParam::Type(tp) => tp.bounds.push(parse_quote!(::beancopy::Reflect)),
            GenericParam::Lifetime(lp) => {
                return Err(syn::Error::new_spanned(
                    &lp.lifetime,
                    "Bean cannot be derived for structs with lifetime parameters",
                ));
            }
            GenericParam::Const(_) => {}
        }
    }
    Ok(generics)
}
