//! # Configuration Abstractions
//!
//! 配置管理抽象层，定义层次化配置树的访问接口与类型化绑定。
//!
//! ## 核心接口
//!
//! - [`Configuration`] - 配置树接口（按路径获取子节）
//! - [`bind_sections`] - 将若干配置节依次叠加并绑定到选项类型

pub mod binder;
pub mod provider;

pub use binder::*;
pub use provider::*;
