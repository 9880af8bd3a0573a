//! Derive macros for the duck_test harness.
//!
//! - `Subject`: implements `duck_test::Subject` so a type can be named as a test subject and listed in an
//!   audited namespace.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, LitStr, parse_macro_input};

/// Implements `duck_test::Subject` for a struct or enum.
///
/// The subject name defaults to the type identifier. `#[subject(name = "...")]` overrides it, which is useful
/// when the audited namespace refers to the type under a different name.
///
/// # Example
/// ```ignore
/// #[derive(Subject)]
/// struct Branch {
///     left: Box<dyn Tree>,
///     right: Box<dyn Tree>,
/// }
///
/// // Generates:
/// impl duck_test::Subject for Branch {
///     const NAME: &'static str = "Branch";
/// }
/// ```
#[proc_macro_derive(Subject, attributes(subject))]
pub fn derive_subject(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    if let Data::Union(data) = &input.data {
        return syn::Error::new(data.union_token.span, "`Subject` cannot be derived for unions")
            .to_compile_error()
            .into();
    }

    let subject_name = match subject_name_override(&input) {
        Ok(Some(lit)) => lit.value(),
        Ok(None) => name.to_string(),
        Err(err) => return err.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::duck_test::Subject for #name #ty_generics #where_clause {
            const NAME: &'static str = #subject_name;
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[subject(name = "...")]`, if present.
fn subject_name_override(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("subject")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                found = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported `subject` attribute; expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(found)
}
