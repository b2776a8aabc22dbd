//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义绑定键、可绑定值和注入的核心接口。
//!
//! ## 核心接口
//!
//! - [`BindingKey`] - 绑定键（命名键或契约键）
//! - [`Binding`] - 可绑定的值（普通值、实例、可构造类型）
//! - [`Injectable`] - 可注入对象
//! - [`Component`] - 声明所满足契约的组件
//! - [`ServiceRegistry`] - 注册表接口

pub mod binding;
pub mod contracts;
pub mod injection;
pub mod key;
pub mod registry;
pub mod resolved;

pub use binding::*;
pub use contracts::*;
pub use injection::*;
pub use key::*;
pub use registry::*;
pub use resolved::*;

pub use infrastructure_common::{
    BindingError, BindingResult, InjectionError, InjectionResult, TypeInfo,
};
