//! # Infrastructure Common
//!
//! 这个 crate 提供了依赖注入与配置绑定各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 类型标识（替代运行时反射）
//! - [`Lifetime`] - 服务生命周期
//! - [`ConfigSection`] - 配置树中的一个子节点
//! - [`ComponentError`] / [`DependencyError`] / [`ConfigError`] - 错误分类
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 扫描期即暴露配置错误，而不是推迟到首次解析

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
