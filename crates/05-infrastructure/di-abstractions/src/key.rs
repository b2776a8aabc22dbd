//! 绑定键定义
//!
//! 绑定键要么是命名服务，要么是契约类型标签

use infrastructure_common::BindingError;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 契约类型标签
///
/// 通常用于 `dyn Trait`，也可以是具体类型。按 `TypeId` 比较。
#[derive(Clone, Copy)]
pub struct Contract {
    id: TypeId,
    name: &'static str,
}

impl Contract {
    /// 获取类型 `C` 的契约标签
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// 契约类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// 简短类型名称
    pub fn short_name(&self) -> String {
        infrastructure_common::short_type_name(self.name)
    }

    /// 判断是否为类型 `C` 的契约
    pub fn is<C: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<C>()
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contract {}

impl Hash for Contract {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract({})", self.short_name())
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// 绑定键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingKey {
    /// 命名服务
    Named(String),
    /// 契约类型
    Contract(Contract),
}

impl BindingKey {
    /// 从类型擦除的值中识别绑定键
    ///
    /// 接受 `String`、`&'static str`、[`Contract`] 与 [`BindingKey`]，
    /// 其他类型返回 [`BindingError::InvalidKey`]。
    pub fn from_dynamic(key: &dyn Any) -> Result<Self, BindingError> {
        if let Some(name) = key.downcast_ref::<String>() {
            Ok(Self::Named(name.clone()))
        } else if let Some(name) = key.downcast_ref::<&'static str>() {
            Ok(Self::Named((*name).to_string()))
        } else if let Some(contract) = key.downcast_ref::<Contract>() {
            Ok(Self::Contract(*contract))
        } else if let Some(key) = key.downcast_ref::<Self>() {
            Ok(key.clone())
        } else {
            Err(BindingError::invalid_key(describe_dynamic(key)))
        }
    }

    /// 创建契约键
    pub fn contract<C: ?Sized + 'static>() -> Self {
        Self::Contract(Contract::of::<C>())
    }

    /// 是否为命名键
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// 获取契约（仅契约键）
    pub fn as_contract(&self) -> Option<&Contract> {
        match self {
            Self::Contract(contract) => Some(contract),
            Self::Named(_) => None,
        }
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Contract(contract) => fmt::Display::fmt(contract, f),
        }
    }
}

impl From<&str> for BindingKey {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for BindingKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<&String> for BindingKey {
    fn from(name: &String) -> Self {
        Self::Named(name.clone())
    }
}

impl From<Contract> for BindingKey {
    fn from(contract: Contract) -> Self {
        Self::Contract(contract)
    }
}

impl From<&BindingKey> for BindingKey {
    fn from(key: &BindingKey) -> Self {
        key.clone()
    }
}

/// 为错误信息描述无法识别的键，常见标量给出具体值
fn describe_dynamic(key: &dyn Any) -> String {
    macro_rules! scalar {
        ($($ty:ty),*) => {
            $(
                if let Some(value) = key.downcast_ref::<$ty>() {
                    return format!("{} ({})", value, stringify!($ty));
                }
            )*
        };
    }
    scalar!(i32, i64, u32, u64, usize, f32, f64, bool, char);
    "<unknown>".to_string()
}
