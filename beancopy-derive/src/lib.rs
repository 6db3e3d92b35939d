#![doc = include_str!("../README.md")]

#[proc_macro_derive(Bean, attributes(bean))]
pub fn bean_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    beancopy_derive_emit::bean_derive(input.into()).into()
}
