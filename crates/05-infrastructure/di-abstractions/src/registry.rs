//! 注册表抽象接口

use crate::binding::{Binding, Class, Instance};
use crate::contracts::Component;
use crate::injection::Injectable;
use crate::key::{BindingKey, Contract};
use crate::resolved::Resolved;
use infrastructure_common::{short_type_name, BindingResult, InjectionError, InjectionResult};
use std::any::Any;
use std::sync::Arc;

/// 注册表 trait
///
/// 提供绑定、解析、注入和清空四个核心操作
pub trait ServiceRegistry: Send + Sync {
    /// 注册绑定，同一个键再次绑定会替换之前的工厂
    fn bind(&self, key: BindingKey, binding: Binding) -> BindingResult<()>;

    /// 使用类型擦除的键注册绑定
    fn bind_dynamic(&self, key: &dyn Any, binding: Binding) -> BindingResult<()> {
        self.bind(BindingKey::from_dynamic(key)?, binding)
    }

    /// 解析键；未绑定时返回 `Ok(None)`，结果会先经过注入
    fn get(&self, key: &BindingKey) -> InjectionResult<Option<Resolved>>;

    /// 按对象的注入描述符填充依赖
    fn inject(&self, target: &dyn Injectable) -> InjectionResult<()>;

    /// 清空所有绑定
    fn reset(&self);

    /// 键是否已绑定
    fn is_bound(&self, key: &BindingKey) -> bool;

    /// 所有已绑定的键
    fn bound_keys(&self) -> Vec<BindingKey>;
}

/// 注册表的类型化便捷方法
pub trait RegistryExt: ServiceRegistry {
    /// 把普通值绑定到键
    fn bind_value<K, T>(&self, key: K, value: T) -> BindingResult<()>
    where
        K: Into<BindingKey>,
        T: Send + Sync + 'static,
    {
        self.bind(key.into(), Binding::value(value))
    }

    /// 把组件实例绑定到键
    fn bind_instance<K, T>(&self, key: K, instance: T) -> BindingResult<()>
    where
        K: Into<BindingKey>,
        T: Component,
    {
        self.bind(key.into(), Binding::Instance(Instance::new(instance)))
    }

    /// 把可构造类型绑定到键
    fn bind_class<K, T>(&self, key: K) -> BindingResult<()>
    where
        K: Into<BindingKey>,
        T: Component + Default,
    {
        self.bind(key.into(), Binding::Class(Class::of::<T>()))
    }

    /// 解析键并转换为类型 `T`
    fn resolve<T, K>(&self, key: K) -> InjectionResult<Option<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
        K: Into<BindingKey>,
    {
        let key = key.into();
        match self.get(&key)? {
            None => Ok(None),
            Some(resolved) => resolved.downcast::<T>().map(Some).ok_or_else(|| {
                InjectionError::type_mismatch(
                    key.to_string(),
                    short_type_name(std::any::type_name::<T>()),
                    short_type_name(resolved.type_name()),
                )
            }),
        }
    }

    /// 解析契约 `C`
    fn resolve_contract<C>(&self) -> InjectionResult<Option<Arc<C>>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<C, _>(Contract::of::<C>())
    }

    /// 注入对象并返回它
    fn inject_into<'a, T: Injectable>(&self, target: &'a T) -> InjectionResult<&'a T> {
        self.inject(target)?;
        Ok(target)
    }
}

impl<R: ServiceRegistry + ?Sized> RegistryExt for R {}
