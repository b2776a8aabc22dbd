//! # Infrastructure Common
//!
//! 依赖注入注册表各层共享的错误类型与类型元数据。
//!
//! ## 核心类型
//!
//! - [`BindingError`] - 绑定失败
//! - [`InjectionError`] - 注入失败
//! - [`ConfigError`] - 注册表配置加载失败
//! - [`DiError`] - 以上错误的汇总
//! - [`TypeInfo`] - 运行时类型信息

pub mod errors;
pub mod metadata;

pub use errors::*;
pub use metadata::*;
