//! 全局注册表
//!
//! 进程内共享一个延迟创建的 [`DiRegistry`]，自由函数直接委托给它。

use crate::DiRegistry;
use di_abstractions::{Binding, BindingKey, Injectable, Resolved, ServiceRegistry};
use infrastructure_common::{BindingResult, InjectionResult};
use once_cell::sync::Lazy;
use std::any::Any;

static GLOBAL_REGISTRY: Lazy<DiRegistry> = Lazy::new(DiRegistry::new);

/// 获取全局注册表
pub fn registry() -> &'static DiRegistry {
    &GLOBAL_REGISTRY
}

/// 在全局注册表中绑定
pub fn bind(key: impl Into<BindingKey>, binding: impl Into<Binding>) -> BindingResult<()> {
    GLOBAL_REGISTRY.bind(key.into(), binding.into())
}

/// 使用类型擦除的键在全局注册表中绑定
pub fn bind_dynamic(key: &dyn Any, binding: impl Into<Binding>) -> BindingResult<()> {
    GLOBAL_REGISTRY.bind_dynamic(key, binding.into())
}

/// 从全局注册表解析
pub fn get(key: impl Into<BindingKey>) -> InjectionResult<Option<Resolved>> {
    GLOBAL_REGISTRY.get(&key.into())
}

/// 使用全局注册表注入对象
pub fn inject(target: &dyn Injectable) -> InjectionResult<()> {
    GLOBAL_REGISTRY.inject(target)
}

/// 清空全局注册表
pub fn reset() {
    GLOBAL_REGISTRY.reset();
}
