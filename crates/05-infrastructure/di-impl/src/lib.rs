//! # 依赖注入具体实现
//!
//! 提供注入标记扫描器（服务注册与选项绑定两条流水线）、注入工厂校验，
//! 以及一个最小的参考宿主容器。
//!
//! ## 主要组件
//!
//! - [`AttributeInjectionExt`] - 扫描注册标记并注册服务
//! - [`OptionAttributeInjectionExt`] - 扫描选项标记并绑定配置节
//! - [`validate_injection_factory`] - 注入工厂校验
//! - [`ServiceCollection`] / [`ServiceProvider`] - 参考宿主容器

pub mod collection;
pub mod injection;
pub mod options_injection;
pub mod provider;
pub mod validation;

pub use collection::*;
pub use injection::*;
pub use options_injection::*;
pub use provider::*;
pub use validation::*;
