//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置类型转换失败: {message}")]
    TypeConversionError { message: String },
}

/// 依赖注入错误类型（解析期）
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("选项功能未启用，无法解析 {type_name}")]
    OptionsNotEnabled { type_name: String },

    #[error("选项绑定失败: {type_name}, 原因: {source}")]
    OptionsBindingFailed {
        type_name: String,
        #[source]
        source: ConfigError,
    },
}

/// 组件错误类型（扫描期配置错误）
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件 `{target}` 指定的注入工厂 `{factory}` 必须实现 InjectableFactory")]
    InvalidFactory { target: String, factory: String },

    #[error("组件 `{target}` 指定的注入工厂 `{factory}` 产出类型 `{produced}` 不兼容")]
    IncompatibleFactory {
        target: String,
        factory: String,
        produced: String,
    },

    #[error("组件元数据无效: {target}, 原因: {message}")]
    InvalidMetadata { target: String, message: String },

    #[error("选项类型 `{type_name}` 重复绑定: {first_path} 与 {second_path}")]
    DuplicateOptionsBinding {
        type_name: String,
        first_path: String,
        second_path: String,
    },

    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

impl ComponentError {
    /// 创建元数据无效错误
    pub fn invalid_metadata(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            target: target.into(),
            message: message.into(),
        }
    }

    /// 出错的目标类型名称（如果有）
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::InvalidFactory { target, .. }
            | Self::IncompatibleFactory { target, .. }
            | Self::InvalidMetadata { target, .. } => Some(target),
            Self::DuplicateOptionsBinding { type_name, .. } => Some(type_name),
            Self::Config { .. } => None,
        }
    }
}
