//! 服务解析抽象接口
//!
//! 宿主容器通过 [`ServiceResolver`] 暴露解析能力，激活器和注入工厂只依赖这个 trait。

use crate::instance::ServiceInstance;
use crate::marker::OptionsTypeRef;
use crate::options::Options;
use config_abstractions::OptionsType;
use infrastructure_common::{DependencyError, TypeInfo};
use std::sync::Arc;

/// 服务解析器 trait
///
/// 可作为 trait 对象使用，泛型辅助方法见 [`ServiceResolverExt`]。
pub trait ServiceResolver: Send + Sync {
    /// 解析服务类型的最后一个注册，未注册时返回 `None`
    fn resolve_instance(&self, service_type: &TypeInfo) -> Result<Option<ServiceInstance>, DependencyError>;

    /// 按注册顺序解析服务类型的全部注册
    fn resolve_all_instances(&self, service_type: &TypeInfo) -> Result<Vec<ServiceInstance>, DependencyError>;

    /// 解析选项实例
    fn resolve_options(&self, options_type: &OptionsTypeRef) -> Result<ServiceInstance, DependencyError>;
}

/// 服务解析辅助方法
pub trait ServiceResolverExt: ServiceResolver {
    /// 获取服务，未注册时返回 `None`
    fn get_service<T>(&self) -> Result<Option<Arc<T>>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.resolve_instance(&TypeInfo::of::<T>())? {
            Some(instance) => instance.try_downcast::<T>().map(Some),
            None => Ok(None),
        }
    }

    /// 获取必需的服务
    fn get_required_service<T>(&self) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get_service::<T>()?
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: TypeInfo::of::<T>().short_name(),
            })
    }

    /// 获取服务类型的全部实现
    fn get_services<T>(&self) -> Result<Vec<Arc<T>>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_all_instances(&TypeInfo::of::<T>())?
            .iter()
            .map(ServiceInstance::try_downcast::<T>)
            .collect()
    }

    /// 获取已绑定的选项
    fn get_options<T: OptionsType>(&self) -> Result<Options<T>, DependencyError> {
        let instance = self.resolve_options(&OptionsTypeRef::of::<T>())?;
        instance.try_downcast::<T>().map(Options::new)
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}

/// 由宿主容器构造的实现类型
///
/// 通常通过 `#[derive(Activate)]` 生成，依赖从解析器中获取。
pub trait Activate: Sized {
    /// 构造实例
    fn activate(resolver: &dyn ServiceResolver) -> Result<Self, DependencyError>;
}
