//! # DI Macros
//!
//! 为组件生成注入描述符和契约声明的派生宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 生成 `Injectable::injection` 与 `Injectable::assign`
//! - [`Component`](derive@Component) - 生成 `Component::contracts`
//!
//! ## 使用示例
//!
//! ```ignore
//! use di_abstractions::Dependency;
//! use di_macros::{Component, Injectable};
//!
//! #[derive(Default, Injectable, Component)]
//! #[component(implements(dyn Vehicle))]
//! pub struct Car {
//!     #[inject(contract = dyn VehiclePart)]
//!     part: Dependency<dyn VehiclePart>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod injectable;
mod utils;

/// 可注入对象派生宏
///
/// 只处理带 `#[inject]` 的命名字段，字段类型必须是 `Dependency<_>`。
///
/// - `#[inject]` - 序列形式，字段名即查找键，缺失时注入为空
/// - `#[inject(name = "key")]` - 映射形式，按命名键查找，缺失时报错
/// - `#[inject(contract = dyn Trait)]` - 映射形式，按契约查找，缺失时报错
///
/// 同一个结构体不能混用两种形式。
///
/// ```ignore
/// #[derive(Injectable)]
/// pub struct Report {
///     #[inject]
///     title: Dependency<String>,
///     #[inject]
///     pages: Dependency<u32>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 组件派生宏
///
/// 生成 `Component::contracts`，默认只满足自身类型。
///
/// ```ignore
/// #[derive(Default, Injectable, Component)]
/// #[component(implements(dyn VehiclePart))]
/// pub struct Tire;
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
