use proc_macro2::TokenStream;
use syn::DeriveInput;

use crate::process_struct;

/// Expands `#[derive(Bean)]`. Errors become `compile_error!` invocations
/// pointing at the offending tokens.
pub fn bean_derive(input: TokenStream) -> TokenStream {
    let expanded = syn::parse2::<DeriveInput>(input)
        .and_then(|parsed| process_struct::process_struct(&parsed));
    match expanded {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand(input: TokenStream) -> String {
        bean_derive(input).to_string()
    }

    #[test]
    fn emits_both_impls() {
        let out = expand(quote! {
            #[bean(rename_all = "camelCase")]
            struct Person {
                first_name: String,
                #[bean(read_only)]
                id: u64,
                #[bean(skip)]
                cache: Vec<u8>,
            }
        });
        assert!(out.contains("impl :: beancopy :: Reflect for Person"), "{out}");
        assert!(out.contains("impl :: beancopy :: Bean for Person"), "{out}");
        assert!(out.contains("\"firstName\""), "{out}");
        assert!(out.contains("FieldFlags :: READ_ONLY"), "{out}");
        assert!(!out.contains("\"cache\""), "{out}");
    }

    #[test]
    fn patterns_are_emitted_in_order() {
        let out = expand(quote! {
            struct Shipment {
                #[bean(date_pattern = "%Y/%m/%d", date_pattern = "%d.%m.%Y")]
                shipped_on: Option<NaiveDate>,
                #[bean(number_pattern = "#,##0.00")]
                weight: f64,
            }
        });
        assert!(
            out.contains(r#"with_date_patterns (& ["%Y/%m/%d" , "%d.%m.%Y"])"#),
            "{out}"
        );
        assert!(out.contains(r##"with_number_patterns (& ["#,##0.00"])"##), "{out}");
    }

    #[test]
    fn generic_structs_need_default() {
        let out = expand(quote! {
            struct Wrapper<T> { inner: T }
        });
        assert!(out.contains("T : :: beancopy :: Reflect"), "{out}");
        assert!(out.contains("Wrapper < T > : :: core :: default :: Default"), "{out}");
    }

    #[test]
    fn unsupported_inputs_become_compile_errors() {
        for input in [
            quote! { enum E { A, B } },
            quote! { struct Tuple(u32, u32); },
            quote! { struct Unit; },
            quote! { struct S { #[bean(rename = "x")] a: u8, #[bean(rename = "x")] b: u8 } },
            quote! { struct S { #[bean(read_only, write_only)] a: u8 } },
        ] {
            let out = expand(input);
            assert!(out.contains("compile_error"), "{out}");
        }
    }
}
