//! 契约一致性表
//!
//! 运行时无法询问某个类型是否实现了某个 trait，因此组件通过
//! [`Contracts`] 显式声明自己满足的契约，并给出转换函数。

use crate::injection::Injectable;
use crate::key::Contract;
use crate::resolved::Resolved;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 把具体类型的共享指针转换为某个契约视图
pub type Caster<T> = Arc<dyn Fn(Arc<T>) -> Resolved + Send + Sync>;

/// 组件 trait
///
/// 可注入并声明了契约的类型，可以作为实例或可构造类型绑定到契约键。
pub trait Component: Injectable + Sized {
    /// 该类型满足的契约，默认只有自身
    fn contracts() -> Contracts<Self> {
        Contracts::new()
    }
}

/// 类型 `T` 满足的契约集合
pub struct Contracts<T> {
    casters: HashMap<Contract, Caster<T>>,
}

impl<T: Send + Sync + 'static> Contracts<T> {
    /// 创建只包含 `T` 自身的契约集合
    pub fn new() -> Self {
        let mut casters: HashMap<Contract, Caster<T>> = HashMap::new();
        casters.insert(Contract::of::<T>(), Arc::new(Resolved::from_arc::<T>));
        Self { casters }
    }

    /// 声明 `T` 满足契约 `C`
    ///
    /// ```ignore
    /// Contracts::new().implements::<dyn VehiclePart>(|tire| tire as Arc<dyn VehiclePart>)
    /// ```
    #[must_use]
    pub fn implements<C>(mut self, cast: fn(Arc<T>) -> Arc<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.casters.insert(
            Contract::of::<C>(),
            Arc::new(move |value: Arc<T>| Resolved::from_arc(cast(value))),
        );
        self
    }

    /// 是否满足契约
    pub fn satisfies(&self, contract: &Contract) -> bool {
        self.casters.contains_key(contract)
    }

    /// 获取契约的转换函数
    pub fn caster(&self, contract: &Contract) -> Option<Caster<T>> {
        self.casters.get(contract).cloned()
    }

    /// 为一个实例生成全部契约视图
    pub fn views(&self, value: &Arc<T>) -> HashMap<Contract, Resolved> {
        self.casters
            .iter()
            .map(|(contract, cast)| (*contract, cast(value.clone())))
            .collect()
    }

    /// 全部契约
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> + '_ {
        self.casters.keys()
    }
}

impl<T: Send + Sync + 'static> Default for Contracts<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Contracts<T> {
    fn clone(&self) -> Self {
        Self {
            casters: self.casters.clone(),
        }
    }
}

impl<T> fmt::Debug for Contracts<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.casters.keys()).finish()
    }
}
