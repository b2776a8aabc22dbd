//! 解析结果

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除的解析结果
///
/// 内部保存一个 `Arc<T>`，`T` 可以是 `dyn Trait`。克隆只增加引用计数。
#[derive(Clone)]
pub struct Resolved {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    /// 被包装对象的数据地址，用于实例同一性比较
    address: usize,
}

impl Resolved {
    /// 包装一个值
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// 包装一个共享指针
    pub fn from_arc<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        let address = Arc::as_ptr(&value).cast::<()>() as usize;
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
            address,
        }
    }

    /// 以类型 `T` 取出共享指针，类型不符时返回 `None`
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.inner.downcast_ref::<Arc<T>>().cloned()
    }

    /// 是否持有类型 `T`
    pub fn is<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.inner.is::<Arc<T>>()
    }

    /// 持有值的类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 两个解析结果是否指向同一个实例（忽略视图类型）
    pub fn same_instance(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field(
                "type",
                &infrastructure_common::short_type_name(self.type_name),
            )
            .finish_non_exhaustive()
    }
}
