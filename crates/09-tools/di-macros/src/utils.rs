//! 宏工具函数

use syn::{Data, DeriveInput, Field, Fields, GenericArgument, PathArguments, Result, Type};

/// 取出结构体的命名字段
pub fn named_fields(input: &DeriveInput) -> Result<Vec<&Field>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields.named.iter().collect()),
            Fields::Unit => Ok(Vec::new()),
            Fields::Unnamed(fields) => Err(syn::Error::new_spanned(
                fields,
                "Injectable 只支持命名字段或单元结构体",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable 只能用于结构体",
        )),
    }
}

/// 从 `Dependency<T>` 中提取 `T`
pub fn dependency_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Dependency" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}
