//! 可绑定的值
//!
//! - [`Binding::Value`] 普通值，原样返回，不参与注入
//! - [`Binding::Instance`] 固定实例，每次解析返回同一个对象
//! - [`Binding::Class`] 可构造类型，每次解析构造新对象

use crate::contracts::{Caster, Component, Contracts};
use crate::injection::Injectable;
use crate::key::Contract;
use crate::resolved::Resolved;
use infrastructure_common::TypeInfo;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 新构造的对象：注入目标与对外返回的视图
pub type Constructed = (Arc<dyn Injectable>, Resolved);

/// 构造函数，每次调用返回一个新对象
pub type Constructor = Arc<dyn Fn() -> Constructed + Send + Sync>;

type ConstructorSelector = Arc<dyn Fn(&Contract) -> Option<Constructor> + Send + Sync>;

/// 可绑定的值
#[derive(Clone)]
pub enum Binding {
    /// 普通值
    Value(Resolved),
    /// 组件实例
    Instance(Instance),
    /// 可构造的组件类型
    Class(Class),
}

impl Binding {
    /// 绑定普通值
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Value(Resolved::new(value))
    }

    /// 绑定组件实例
    pub fn instance<T: Component>(value: T) -> Self {
        Self::Instance(Instance::new(value))
    }

    /// 绑定任意可注入对象，每次解析前都会按其描述符注入
    ///
    /// 适用于 [`DynamicObject`](crate::DynamicObject) 这类未声明契约的对象。
    pub fn injectable<T: Injectable>(value: T) -> Self {
        Self::Instance(Instance::injectable(value))
    }

    /// 绑定可构造类型
    pub fn class<T: Component + Default>() -> Self {
        Self::Class(Class::of::<T>())
    }

    /// 被绑定值的类型名称
    pub fn type_name(&self) -> String {
        match self {
            Self::Value(value) => infrastructure_common::short_type_name(value.type_name()),
            Self::Instance(instance) => instance.type_info().name.clone(),
            Self::Class(class) => class.type_info().name.clone(),
        }
    }
}

impl From<Resolved> for Binding {
    fn from(value: Resolved) -> Self {
        Self::Value(value)
    }
}

impl From<Instance> for Binding {
    fn from(instance: Instance) -> Self {
        Self::Instance(instance)
    }
}

impl From<Class> for Binding {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
            Self::Class(class) => f.debug_tuple("Class").field(class).finish(),
        }
    }
}

/// 组件实例
///
/// 构造时按组件声明的契约预先生成全部视图。
#[derive(Clone)]
pub struct Instance {
    type_info: TypeInfo,
    target: Arc<dyn Injectable>,
    value: Resolved,
    views: HashMap<Contract, Resolved>,
}

impl Instance {
    /// 包装一个组件
    pub fn new<T: Component>(value: T) -> Self {
        Self::shared(Arc::new(value))
    }

    /// 包装一个已共享的组件
    pub fn shared<T: Component>(value: Arc<T>) -> Self {
        let views = T::contracts().views(&value);
        Self::with_views(value, views)
    }

    /// 包装一个只满足自身类型的可注入对象
    pub fn injectable<T: Injectable>(value: T) -> Self {
        let value = Arc::new(value);
        let views = Contracts::<T>::new().views(&value);
        Self::with_views(value, views)
    }

    fn with_views<T: Injectable>(value: Arc<T>, views: HashMap<Contract, Resolved>) -> Self {
        let target: Arc<dyn Injectable> = value.clone();
        Self {
            type_info: TypeInfo::of::<T>(),
            target,
            value: Resolved::from_arc(value),
            views,
        }
    }

    /// 实例类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 注入目标
    pub fn target(&self) -> &Arc<dyn Injectable> {
        &self.target
    }

    /// 以具体类型返回的值
    pub fn value(&self) -> &Resolved {
        &self.value
    }

    /// 契约视图，不满足契约时返回 `None`
    pub fn view(&self, contract: &Contract) -> Option<&Resolved> {
        self.views.get(contract)
    }

    /// 是否满足契约
    pub fn satisfies(&self, contract: &Contract) -> bool {
        self.views.contains_key(contract)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_info.name)
            .field("contracts", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// 可构造的组件类型
///
/// 只满足组件显式声明的契约，类型自身不算作自己的子类型。
#[derive(Clone)]
pub struct Class {
    type_info: TypeInfo,
    contracts: Vec<Contract>,
    concrete: Constructor,
    select: ConstructorSelector,
}

impl Class {
    /// 使用 `Default` 构造的组件类型
    pub fn of<T: Component + Default>() -> Self {
        Self::with_constructor(T::default)
    }

    /// 使用自定义构造函数的组件类型
    pub fn with_constructor<T, F>(constructor: F) -> Self
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let own = Contract::of::<T>();
        let table = T::contracts();
        let contracts = table
            .contracts()
            .copied()
            .filter(|contract| *contract != own)
            .collect();
        let constructor = Arc::new(constructor);
        let concrete =
            build_constructor(constructor.clone(), Arc::new(Resolved::from_arc::<T>));

        let select = move |contract: &Contract| -> Option<Constructor> {
            if *contract == own {
                return None;
            }
            let cast = table.caster(contract)?;
            Some(build_constructor(constructor.clone(), cast))
        };

        Self {
            type_info: TypeInfo::of::<T>(),
            contracts,
            concrete,
            select: Arc::new(select),
        }
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 是否满足契约
    pub fn satisfies(&self, contract: &Contract) -> bool {
        self.contracts.contains(contract)
    }

    /// 以具体类型返回新对象的构造函数
    pub fn constructor(&self) -> Constructor {
        self.concrete.clone()
    }

    /// 以契约视图返回新对象的构造函数，不满足契约时返回 `None`
    pub fn constructor_for(&self, contract: &Contract) -> Option<Constructor> {
        (self.select)(contract)
    }
}

fn build_constructor<T, F>(constructor: Arc<F>, cast: Caster<T>) -> Constructor
where
    T: Component,
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || -> Constructed {
        let value = Arc::new(constructor());
        let target: Arc<dyn Injectable> = value.clone();
        (target, cast(value))
    })
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("type", &self.type_info.name)
            .field("contracts", &self.contracts)
            .finish()
    }
}
