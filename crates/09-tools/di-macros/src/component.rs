//! `#[derive(Component)]` 实现

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse::Parse, punctuated::Punctuated, DeriveInput, Result, Token, Type};

/// 解析 `#[component(implements(dyn A, dyn B))]`
fn parse_contracts(input: &DeriveInput) -> Result<Vec<Type>> {
    let mut contracts = Vec::new();

    for attr in &input.attrs {
        if !attr.path().is_ident("component") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("implements") {
                let content;
                syn::parenthesized!(content in meta.input);
                let types: Punctuated<Type, Token![,]> =
                    content.parse_terminated(Type::parse, Token![,])?;
                contracts.extend(types);
                Ok(())
            } else {
                Err(meta.error("不支持的 component 参数，可用: implements"))
            }
        })?;
    }

    Ok(contracts)
}

/// 实现 #[derive(Component)]
pub fn derive_component_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let contracts = parse_contracts(&input)?;

    if contracts.is_empty() {
        return Ok(quote! {
            impl #impl_generics ::di_abstractions::Component for #struct_name #ty_generics #where_clause {}
        });
    }

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Component for #struct_name #ty_generics #where_clause {
            fn contracts() -> ::di_abstractions::Contracts<Self> {
                ::di_abstractions::Contracts::new()
                    #(
                        .implements::<#contracts>(
                            |value: ::std::sync::Arc<Self>| -> ::std::sync::Arc<#contracts> { value },
                        )
                    )*
            }
        }
    })
}
