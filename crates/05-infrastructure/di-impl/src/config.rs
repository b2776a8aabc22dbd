//! 注册表配置
//!
//! 配置文件支持 TOML/JSON/YAML，环境变量以 `LORN_DI_` 为前缀、`__` 分隔层级覆盖文件内容：
//!
//! ```toml
//! strict_sequence_injection = true
//!
//! [values]
//! greeting = "hello"
//! retries = 3
//! ```
//!
//! `LORN_DI_VALUES__GREETING=hi` 会覆盖上面的 `values.greeting`。

use infrastructure_common::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "LORN_DI";

/// 注册表配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// 序列形式注入是否同样要求依赖存在
    pub strict_sequence_injection: bool,
    /// 预绑定的命名值
    pub values: HashMap<String, serde_json::Value>,
}

impl RegistryConfig {
    /// 从配置文件加载，并叠加环境变量
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            error!("配置文件不存在: {}", path.display());
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment())
            .build()
            .map_err(parse_error)?;

        let loaded: Self = settings.try_deserialize().map_err(parse_error)?;
        info!(
            "加载注册表配置: {}，{} 个预绑定值",
            path.display(),
            loaded.values.len()
        );
        Ok(loaded)
    }

    /// 只从环境变量加载
    pub fn from_env() -> ConfigResult<Self> {
        let settings = config::Config::builder()
            .add_source(environment())
            .build()
            .map_err(parse_error)?;
        settings.try_deserialize().map_err(parse_error)
    }

    /// 设置序列形式注入是否严格
    #[must_use]
    pub fn with_strict_sequence_injection(mut self, strict: bool) -> Self {
        self.strict_sequence_injection = strict;
        self
    }

    /// 追加一个预绑定值
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn parse_error(e: config::ConfigError) -> ConfigError {
    error!("配置解析失败: {}", e);
    ConfigError::ParseError {
        source: Box::new(e),
    }
}
