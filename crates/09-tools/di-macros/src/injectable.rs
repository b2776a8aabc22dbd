//! `#[derive(Injectable)]` 实现

use crate::utils::{dependency_inner_type, named_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, LitStr, Result, Type};

/// 单个字段的注入方式
enum InjectKind {
    /// `#[inject]`
    Sequence,
    /// `#[inject(name = "key")]`
    Named(LitStr),
    /// `#[inject(contract = dyn Trait)]`
    Contract(Type),
}

struct InjectField {
    ident: Ident,
    kind: InjectKind,
}

fn parse_inject_fields(input: &DeriveInput) -> Result<Vec<InjectField>> {
    let mut parsed = Vec::new();

    for field in named_fields(input)? {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("inject")) else {
            continue;
        };
        // named_fields 只返回命名字段
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        if dependency_inner_type(&field.ty).is_none() {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[inject] 字段的类型必须是 Dependency<_>",
            ));
        }

        let kind = match &attr.meta {
            syn::Meta::Path(_) => InjectKind::Sequence,
            _ => {
                let mut kind = None;
                attr.parse_nested_meta(|meta| {
                    if kind.is_some() {
                        return Err(meta.error("name 与 contract 只能指定一个"));
                    }
                    if meta.path.is_ident("name") {
                        kind = Some(InjectKind::Named(meta.value()?.parse()?));
                        Ok(())
                    } else if meta.path.is_ident("contract") {
                        kind = Some(InjectKind::Contract(meta.value()?.parse()?));
                        Ok(())
                    } else {
                        Err(meta.error("不支持的 inject 参数，可用: name, contract"))
                    }
                })?;
                kind.ok_or_else(|| syn::Error::new_spanned(attr, "缺少 name 或 contract"))?
            }
        };

        parsed.push(InjectField { ident, kind });
    }

    Ok(parsed)
}

/// 实现 #[derive(Injectable)]
pub fn derive_injectable_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = parse_inject_fields(&input)?;

    if fields.is_empty() {
        return Ok(quote! {
            impl #impl_generics ::di_abstractions::Injectable for #struct_name #ty_generics #where_clause {}
        });
    }

    let sequence = fields
        .iter()
        .filter(|f| matches!(f.kind, InjectKind::Sequence))
        .count();
    if sequence != 0 && sequence != fields.len() {
        return Err(syn::Error::new_spanned(
            struct_name,
            "不能混用 #[inject] 与 #[inject(name/contract = ...)]",
        ));
    }

    let descriptor = if sequence != 0 {
        let keys = fields.iter().map(|f| f.ident.to_string());
        quote! {
            ::di_abstractions::InjectionDescriptor::sequence([#(#keys),*])
        }
    } else {
        let entries = fields.iter().map(|f| {
            let attribute = f.ident.to_string();
            let key = match &f.kind {
                InjectKind::Named(name) => quote! { ::di_abstractions::BindingKey::from(#name) },
                InjectKind::Contract(ty) => {
                    quote! { ::di_abstractions::BindingKey::contract::<#ty>() }
                }
                InjectKind::Sequence => quote! {},
            };
            quote! { (#attribute, #key) }
        });
        quote! {
            ::di_abstractions::InjectionDescriptor::mapping([#(#entries),*])
        }
    };

    let arms = fields.iter().map(|f| {
        let ident = &f.ident;
        let attribute = ident.to_string();
        quote! {
            #attribute => self.#ident.fill(attribute, value),
        }
    });

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Injectable for #struct_name #ty_generics #where_clause {
            fn injection(&self) -> ::core::option::Option<::di_abstractions::InjectionDescriptor> {
                ::core::option::Option::Some(#descriptor)
            }

            fn assign(
                &self,
                attribute: &str,
                value: ::core::option::Option<::di_abstractions::Resolved>,
            ) -> ::di_abstractions::InjectionResult<()> {
                match attribute {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::di_abstractions::InjectionError::unknown_attribute(
                            attribute,
                            ::di_abstractions::Injectable::describe(self),
                        ),
                    ),
                }
            }
        }
    })
}
