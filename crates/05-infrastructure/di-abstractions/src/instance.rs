//! 类型擦除的服务实例

use infrastructure_common::{DependencyError, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 服务实例
///
/// 内部保存一个 `Arc<T>`，`T` 可以是 `dyn Trait`。取回时必须使用注册时的服务类型。
#[derive(Clone)]
pub struct ServiceInstance {
    type_info: TypeInfo,
    value: Arc<dyn Any + Send + Sync>,
}

impl ServiceInstance {
    /// 包装服务实例
    pub fn new<T>(instance: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            value: Arc::new(instance),
        }
    }

    /// 实例的服务类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 取回服务实例，类型不符时返回 `None`
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// 取回服务实例，类型不符时返回 [`DependencyError::TypeMismatch`]
    pub fn try_downcast<T>(&self) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.downcast::<T>().ok_or_else(|| DependencyError::TypeMismatch {
            expected: TypeInfo::of::<T>().short_name(),
            actual: self.type_info.short_name(),
        })
    }

    /// 两个实例是否指向同一个对象
    pub fn ptr_eq(&self, other: &ServiceInstance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("type", &self.type_info.short_name())
            .finish_non_exhaustive()
    }
}
