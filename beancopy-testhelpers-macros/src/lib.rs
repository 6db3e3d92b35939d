#![doc = include_str!("../README.md")]

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers: everything before `fn`
    struct Preamble {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // generics and parameters: everything between the name and the body
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        preamble: Preamble, _fn: KFn, name: Ident,
        signature: Signature, body: Body
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

fn compile_error(message: &str) -> proc_macro::TokenStream {
    quote::quote! { ::core::compile_error!(#message); }.into()
}

/// Marks a test that may use `?` on any error: the function is rewritten to
/// return `eyre::Result<()>`, and calls `beancopy_testhelpers::setup()` first.
///
/// The test must not declare a return type of its own.
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut i = item.to_token_iter();
    let Ok(test_fn) = i.parse::<TestFn>() else {
        return compile_error("#[beancopy_testhelpers::test] expects a function");
    };

    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = test_fn;

    if quote::ToTokens::to_token_stream(&signature).to_string().contains("->") {
        return compile_error(
            "#[beancopy_testhelpers::test] functions must not declare a return type",
        );
    }

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #preamble fn #name #signature -> ::beancopy_testhelpers::eyre::Result<()> {
            ::beancopy_testhelpers::setup();

            #body

            Ok(())
        }
    }
    .into()
}
