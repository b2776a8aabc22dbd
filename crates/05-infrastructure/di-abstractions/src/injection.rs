//! 注入描述符与可注入对象
//!
//! 对象通过 [`Injectable::injection`] 声明依赖，注册表解析后调用
//! [`Injectable::assign`] 写回对应属性。

use crate::contracts::Component;
use crate::key::BindingKey;
use crate::resolved::Resolved;
use infrastructure_common::{short_type_name, InjectionError, InjectionResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 注入描述符
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionDescriptor {
    /// 有序键列表，键同时作为属性名；缺失的依赖注入为空
    Sequence(Vec<String>),
    /// 属性名 -> 查找键；缺失的依赖视为错误
    Mapping(HashMap<String, BindingKey>),
}

impl InjectionDescriptor {
    /// 创建序列形式描述符
    pub fn sequence<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sequence(keys.into_iter().map(Into::into).collect())
    }

    /// 创建映射形式描述符
    pub fn mapping<I, A, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, K)>,
        A: Into<String>,
        K: Into<BindingKey>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(attribute, key)| (attribute.into(), key.into()))
                .collect(),
        )
    }

    /// 归一化为有序的注入目标列表
    ///
    /// `strict_sequence` 为真时序列形式同样要求依赖存在。
    /// 映射形式按属性名排序，保证解析顺序稳定。
    pub fn targets(&self, strict_sequence: bool) -> Vec<InjectionTarget> {
        match self {
            Self::Sequence(keys) => keys
                .iter()
                .map(|key| InjectionTarget {
                    attribute: key.clone(),
                    key: BindingKey::Named(key.clone()),
                    required: strict_sequence,
                })
                .collect(),
            Self::Mapping(entries) => {
                let mut targets: Vec<_> = entries
                    .iter()
                    .map(|(attribute, key)| InjectionTarget {
                        attribute: attribute.clone(),
                        key: key.clone(),
                        required: true,
                    })
                    .collect();
                targets.sort_by(|a, b| a.attribute.cmp(&b.attribute));
                targets
            }
        }
    }

    /// 描述符包含的依赖数量
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(keys) => keys.len(),
            Self::Mapping(entries) => entries.len(),
        }
    }

    /// 是否没有声明任何依赖
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 单个注入目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionTarget {
    /// 目标属性名
    pub attribute: String,
    /// 注册表查找键
    pub key: BindingKey,
    /// 解析为空时是否报错
    pub required: bool,
}

/// 可注入对象
///
/// 属性写入通过 `&self` 完成，单例实例每次解析都会被重新注入。
pub trait Injectable: Send + Sync + 'static {
    /// 注入描述符，`None` 表示无需注入
    fn injection(&self) -> Option<InjectionDescriptor> {
        None
    }

    /// 写入一个属性
    fn assign(&self, attribute: &str, value: Option<Resolved>) -> InjectionResult<()> {
        let _ = value;
        Err(InjectionError::unknown_attribute(attribute, self.describe()))
    }

    /// 错误信息中使用的对象名称
    fn describe(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// 依赖槽
///
/// 组件字段以 `Dependency<dyn Trait>` 或 `Dependency<T>` 的形式接收注入结果。
pub struct Dependency<T: ?Sized> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Dependency<T> {
    /// 创建空槽
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    /// 当前注入的值
    pub fn get(&self) -> Option<Arc<T>> {
        self.value.read().clone()
    }

    /// 是否已注入
    pub fn is_set(&self) -> bool {
        self.value.read().is_some()
    }

    /// 直接设置值
    pub fn set(&self, value: Option<Arc<T>>) {
        *self.value.write() = value;
    }

    /// 用解析结果填充槽，值存在但类型不符时报错
    pub fn fill(&self, attribute: &str, value: Option<Resolved>) -> InjectionResult<()> {
        let typed = match value {
            None => None,
            Some(resolved) => Some(resolved.downcast::<T>().ok_or_else(|| {
                InjectionError::type_mismatch(
                    attribute,
                    short_type_name(std::any::type_name::<T>()),
                    short_type_name(resolved.type_name()),
                )
            })?),
        };
        self.set(typed);
        Ok(())
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for Dependency<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Dependency<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("type", &short_type_name(std::any::type_name::<T>()))
            .field("set", &self.value.read().is_some())
            .finish()
    }
}

/// 动态属性对象
///
/// 任意属性都可写入，适合没有固定结构的注入目标。
#[derive(Default)]
pub struct DynamicObject {
    name: String,
    descriptor: Option<InjectionDescriptor>,
    attributes: RwLock<HashMap<String, Option<Resolved>>>,
}

impl DynamicObject {
    /// 创建没有描述符的对象
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: None,
            attributes: RwLock::new(HashMap::new()),
        }
    }

    /// 设置描述符
    pub fn with_injection(mut self, descriptor: InjectionDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// 读取属性；属性不存在或被注入为空时返回 `None`
    pub fn attribute(&self, name: &str) -> Option<Resolved> {
        self.attributes.read().get(name).cloned().flatten()
    }

    /// 属性是否被写入过（包括写入空值）
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.read().contains_key(name)
    }

    /// 已写入的属性数量
    pub fn attribute_count(&self) -> usize {
        self.attributes.read().len()
    }
}

impl Injectable for DynamicObject {
    fn injection(&self) -> Option<InjectionDescriptor> {
        self.descriptor.clone()
    }

    fn assign(&self, attribute: &str, value: Option<Resolved>) -> InjectionResult<()> {
        self.attributes.write().insert(attribute.to_string(), value);
        Ok(())
    }

    fn describe(&self) -> String {
        if self.name.is_empty() {
            "DynamicObject".to_string()
        } else {
            self.name.clone()
        }
    }
}

impl Component for DynamicObject {}

impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicObject")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .field("attributes", &self.attributes.read().len())
            .finish()
    }
}
