//! # 依赖注入具体实现
//!
//! 提供注册表 [`DiRegistry`]、注册表配置 [`RegistryConfig`] 以及进程级全局注册表。
//!
//! ```ignore
//! use di_abstractions::{Contract, RegistryExt};
//! use di_impl::DiRegistry;
//!
//! let registry = DiRegistry::new();
//! registry.bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())?;
//! registry.bind_class::<_, Car>(Contract::of::<dyn Vehicle>())?;
//! let vehicle = registry.resolve_contract::<dyn Vehicle>()?;
//! ```

pub mod config;
pub mod global;

pub use config::RegistryConfig;

use dashmap::DashMap;
use di_abstractions::{
    Binding, BindingKey, Constructor, Contract, Injectable, InjectionTarget, Resolved,
    ServiceRegistry,
};
use infrastructure_common::{
    short_type_name, BindingError, BindingResult, InjectionError, InjectionResult,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 工厂函数：每次解析调用一次，负责构造或取出值并完成注入
type Factory = Arc<dyn Fn(&DiRegistry) -> InjectionResult<Resolved> + Send + Sync>;

/// 依赖注入注册表
///
/// 绑定保存在并发哈希表中；解析时先复制出工厂再释放分片锁，
/// 因此工厂内部递归解析其他键不会死锁。
pub struct DiRegistry {
    /// 绑定键 -> 工厂
    bindings: DashMap<BindingKey, Factory>,
    /// 序列形式注入是否要求依赖存在
    strict_sequence_injection: bool,
}

impl DiRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
            strict_sequence_injection: false,
        }
    }

    /// 按配置创建注册表，并预先绑定配置中的命名值
    pub fn with_config(config: &RegistryConfig) -> Self {
        let registry =
            Self::new().with_strict_sequence_injection(config.strict_sequence_injection);

        for (name, value) in &config.values {
            let key = BindingKey::Named(name.clone());
            // 命名键接受任何值
            if let Err(e) = registry.bind(key, Binding::value(value.clone())) {
                warn!("预绑定配置值失败: {}, 原因: {}", name, e);
            }
        }

        info!(
            "注册表创建完成，预绑定 {} 个配置值，严格序列注入: {}",
            config.values.len(),
            config.strict_sequence_injection
        );
        registry
    }

    /// 设置序列形式注入是否要求依赖存在
    #[must_use]
    pub fn with_strict_sequence_injection(mut self, strict: bool) -> Self {
        self.strict_sequence_injection = strict;
        self
    }

    /// 序列形式注入是否要求依赖存在
    pub fn strict_sequence_injection(&self) -> bool {
        self.strict_sequence_injection
    }

    /// 已绑定的键数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 是否没有任何绑定
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 把绑定转换为契约键下的工厂
    fn contract_factory(contract: &Contract, binding: Binding) -> BindingResult<Factory> {
        match binding {
            Binding::Instance(instance) => {
                let view = instance.view(contract).cloned().ok_or_else(|| {
                    BindingError::not_an_instance(&instance.type_info().name, contract.to_string())
                })?;
                Ok(instance_factory(instance.target().clone(), view))
            }
            Binding::Class(class) => {
                let constructor = class.constructor_for(contract).ok_or_else(|| {
                    BindingError::not_a_subtype(&class.type_info().name, contract.to_string())
                })?;
                Ok(class_factory(constructor))
            }
            Binding::Value(value) => Err(BindingError::unsupported_value(
                short_type_name(value.type_name()),
                contract.to_string(),
            )),
        }
    }

    /// 把绑定转换为命名键下的工厂，任何值都可接受
    fn named_factory(binding: Binding) -> Factory {
        match binding {
            Binding::Value(value) => value_factory(value),
            Binding::Instance(instance) => {
                instance_factory(instance.target().clone(), instance.value().clone())
            }
            Binding::Class(class) => class_factory(class.constructor()),
        }
    }
}

fn value_factory(value: Resolved) -> Factory {
    Arc::new(move |_| Ok(value.clone()))
}

fn instance_factory(target: Arc<dyn Injectable>, view: Resolved) -> Factory {
    Arc::new(move |registry| {
        registry.inject(target.as_ref())?;
        Ok(view.clone())
    })
}

fn class_factory(constructor: Constructor) -> Factory {
    Arc::new(move |registry| {
        let (target, view) = constructor();
        registry.inject(target.as_ref())?;
        Ok(view)
    })
}

impl ServiceRegistry for DiRegistry {
    fn bind(&self, key: BindingKey, binding: Binding) -> BindingResult<()> {
        let type_name = binding.type_name();
        let factory = match &key {
            BindingKey::Named(_) => Self::named_factory(binding),
            BindingKey::Contract(contract) => {
                Self::contract_factory(contract, binding).map_err(|e| {
                    warn!("绑定失败: {} -> {}, 原因: {}", key, type_name, e);
                    e
                })?
            }
        };

        debug!("注册绑定: {} -> {}", key, type_name);
        if self.bindings.insert(key, factory).is_some() {
            debug!("已替换原有绑定");
        }
        Ok(())
    }

    fn get(&self, key: &BindingKey) -> InjectionResult<Option<Resolved>> {
        let factory = self.bindings.get(key).map(|entry| entry.value().clone());
        match factory {
            Some(factory) => {
                debug!("解析: {}", key);
                factory(self).map(Some)
            }
            None => {
                debug!("未绑定: {}", key);
                Ok(None)
            }
        }
    }

    fn inject(&self, target: &dyn Injectable) -> InjectionResult<()> {
        let Some(descriptor) = target.injection() else {
            return Ok(());
        };

        for InjectionTarget {
            attribute,
            key,
            required,
        } in descriptor.targets(self.strict_sequence_injection)
        {
            let value = self.get(&key)?;
            if value.is_none() && required {
                let owner = target.describe();
                warn!("无法将 {} 注入到 {}: {} 未绑定", attribute, owner, key);
                return Err(InjectionError::unresolved(attribute, owner));
            }
            target.assign(&attribute, value)?;
        }
        Ok(())
    }

    fn reset(&self) {
        let count = self.bindings.len();
        self.bindings.clear();
        info!("注册表已清空，移除 {} 个绑定", count);
    }

    fn is_bound(&self, key: &BindingKey) -> bool {
        self.bindings.contains_key(key)
    }

    fn bound_keys(&self) -> Vec<BindingKey> {
        self.bindings.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl Default for DiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiRegistry")
            .field("bindings", &self.bound_keys())
            .field("strict_sequence_injection", &self.strict_sequence_injection)
            .finish()
    }
}
