//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义注入标记、工厂能力、模块来源以及宿主容器的注册与解析接口。
//!
//! ## 核心接口
//!
//! - [`InjectableMarker`] / [`InjectableOptionsMarker`] - 注册标记与选项标记
//! - [`InjectableFactory`] / [`TypedInjectableFactory`] - 注入工厂
//! - [`ModuleSource`] - 待扫描类型的来源
//! - [`ServiceRegistry`] - 宿主容器注册接口
//! - [`ServiceResolver`] - 宿主容器解析接口

pub mod discovery;
pub mod factory;
pub mod instance;
pub mod marker;
pub mod options;
pub mod registry;
pub mod resolver;

pub use discovery::*;
pub use factory::*;
pub use instance::*;
pub use marker::*;
pub use options::*;
pub use registry::*;
pub use resolver::*;

pub use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
