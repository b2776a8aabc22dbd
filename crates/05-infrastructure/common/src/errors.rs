//! 错误类型定义

use thiserror::Error;

/// 绑定错误类型
///
/// `bind` 在调用处同步返回，不做延迟校验。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("无法识别的绑定键类型: {type_name}")]
    InvalidKey { type_name: String },

    #[error("{value} 不是 {contract} 的实例")]
    NotAnInstance { value: String, contract: String },

    #[error("{subtype} 未实现契约 {contract}")]
    NotASubtype { subtype: String, contract: String },

    #[error("无法将 {value} 绑定到契约 {contract}")]
    UnsupportedValue { value: String, contract: String },
}

impl BindingError {
    /// 创建无效键错误
    pub fn invalid_key(type_name: impl Into<String>) -> Self {
        Self::InvalidKey {
            type_name: type_name.into(),
        }
    }

    /// 创建实例不满足契约错误
    pub fn not_an_instance(value: impl Into<String>, contract: impl Into<String>) -> Self {
        Self::NotAnInstance {
            value: value.into(),
            contract: contract.into(),
        }
    }

    /// 创建子类型不满足契约错误
    pub fn not_a_subtype(subtype: impl Into<String>, contract: impl Into<String>) -> Self {
        Self::NotASubtype {
            subtype: subtype.into(),
            contract: contract.into(),
        }
    }

    /// 创建普通值绑定到契约的错误
    pub fn unsupported_value(value: impl Into<String>, contract: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            value: value.into(),
            contract: contract.into(),
        }
    }
}

/// 注入错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    #[error("无法将 {attribute} 注入到 {target}")]
    Unresolved { attribute: String, target: String },

    #[error("{target} 没有可注入的属性 {attribute}")]
    UnknownAttribute { attribute: String, target: String },

    #[error("{key} 类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },
}

impl InjectionError {
    /// 创建依赖未解析错误
    pub fn unresolved(attribute: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Unresolved {
            attribute: attribute.into(),
            target: target.into(),
        }
    }

    /// 创建未知属性错误
    pub fn unknown_attribute(attribute: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            attribute: attribute.into(),
            target: target.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(
        key: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 依赖注入错误汇总
#[derive(Error, Debug)]
pub enum DiError {
    #[error("绑定错误: {source}")]
    Binding {
        #[from]
        source: BindingError,
    },

    #[error("注入错误: {source}")]
    Injection {
        #[from]
        source: InjectionError,
    },

    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

/// 结果类型别名
pub type BindingResult<T> = Result<T, BindingError>;
pub type InjectionResult<T> = Result<T, InjectionError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DiResult<T> = Result<T, DiError>;
