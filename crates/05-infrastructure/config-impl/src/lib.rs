//! # Configuration Implementation
//!
//! 配置管理的具体实现，基于 `config` crate 组装多层配置源，
//! 生成可按路径访问的配置树。
//!
//! ## 主要组件
//!
//! - [`ConfigurationBuilder`] - 配置源构建器（字符串、文件、环境变量）
//! - [`ConfigurationRoot`] - 构建完成的配置树

pub mod builder;
pub mod root;

pub use builder::*;
pub use root::*;
