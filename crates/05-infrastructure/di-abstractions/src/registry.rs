//! 宿主容器注册接口

use crate::marker::{OptionsTypeRef, ServiceActivator};
use infrastructure_common::{ConfigSection, Lifetime, TypeInfo};
use std::fmt;

/// 服务实现方式
#[derive(Clone)]
pub enum ServiceImplementation {
    /// 由宿主容器激活实现类型
    Activator {
        implementation_type: TypeInfo,
        activator: ServiceActivator,
    },
    /// 由注入工厂创建
    Factory {
        factory_type: TypeInfo,
        activator: ServiceActivator,
    },
}

impl ServiceImplementation {
    /// 创建实例的激活器
    pub fn activator(&self) -> &ServiceActivator {
        match self {
            Self::Activator { activator, .. } | Self::Factory { activator, .. } => activator,
        }
    }
}

impl fmt::Debug for ServiceImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activator { implementation_type, .. } => f
                .debug_struct("Activator")
                .field("implementation_type", implementation_type)
                .finish_non_exhaustive(),
            Self::Factory { factory_type, .. } => f
                .debug_struct("Factory")
                .field("factory_type", factory_type)
                .finish_non_exhaustive(),
        }
    }
}

/// 服务描述符
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// 服务类型
    pub service_type: TypeInfo,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 实现方式
    pub implementation: ServiceImplementation,
}

impl ServiceDescriptor {
    /// 由宿主容器激活实现类型的描述符
    pub fn activated(
        service_type: TypeInfo,
        implementation_type: TypeInfo,
        activator: ServiceActivator,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            service_type,
            lifetime,
            implementation: ServiceImplementation::Activator {
                implementation_type,
                activator,
            },
        }
    }

    /// 由注入工厂创建的描述符
    pub fn factory(
        service_type: TypeInfo,
        factory_type: TypeInfo,
        activator: ServiceActivator,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            service_type,
            lifetime,
            implementation: ServiceImplementation::Factory {
                factory_type,
                activator,
            },
        }
    }

    /// 实现类型，工厂注册没有实现类型
    pub fn implementation_type(&self) -> Option<&TypeInfo> {
        match &self.implementation {
            ServiceImplementation::Activator { implementation_type, .. } => Some(implementation_type),
            ServiceImplementation::Factory { .. } => None,
        }
    }

    /// 工厂类型
    pub fn factory_type(&self) -> Option<&TypeInfo> {
        match &self.implementation {
            ServiceImplementation::Factory { factory_type, .. } => Some(factory_type),
            ServiceImplementation::Activator { .. } => None,
        }
    }

    /// 创建实例的激活器
    pub fn activator(&self) -> &ServiceActivator {
        self.implementation.activator()
    }
}

/// 选项绑定：把配置节绑定到选项类型
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsBinding {
    /// 选项类型
    pub options_type: OptionsTypeRef,
    /// 配置路径（标记中声明的原始形式）
    pub path: String,
    /// 配置节
    pub section: ConfigSection,
}

/// 服务注册表 trait
///
/// 宿主容器的注册接口，扫描器只通过这个 trait 与宿主交互。
pub trait ServiceRegistry {
    /// 添加服务描述符
    fn add(&mut self, descriptor: ServiceDescriptor);

    /// 启用选项功能，重复调用无副作用
    fn add_options(&mut self);

    /// 登记选项绑定，同一选项类型的多个绑定按登记顺序叠加
    fn configure_options(&mut self, binding: OptionsBinding);
}
