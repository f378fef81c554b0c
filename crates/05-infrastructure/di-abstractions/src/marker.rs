//! 注入标记
//!
//! 派生宏把类型上的注解转换为标记，扫描器读取标记后向宿主容器注册。

use crate::factory::FactoryRef;
use crate::instance::ServiceInstance;
use crate::resolver::{Activate, ServiceResolver};
use config_abstractions::{bind_sections, OptionsType};
use infrastructure_common::{ConfigError, ConfigSection, DependencyError, Lifetime, TypeInfo};
use std::fmt;
use std::sync::Arc;

/// 服务激活器：构造实现并转换为目标服务类型
pub type ServiceActivator =
    Arc<dyn Fn(&dyn ServiceResolver) -> Result<ServiceInstance, DependencyError> + Send + Sync>;

/// 创建激活器
///
/// `convert` 负责把 `Arc<I>` 转换为 `Arc<T>`，通常写作 `|instance| instance`，
/// 由编译器保证实现类型可以赋值给目标类型。
pub fn activator<I, T>(convert: fn(Arc<I>) -> Arc<T>) -> ServiceActivator
where
    I: Activate + Send + Sync + 'static,
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(move |resolver: &dyn ServiceResolver| {
        let instance = I::activate(resolver)?;
        Ok(ServiceInstance::new(convert(Arc::new(instance))))
    })
}

/// 注册标记
///
/// 一个类型可以携带多个注册标记。
#[derive(Clone, Default)]
pub struct InjectableMarker {
    /// 目标服务类型，缺省为被标注的类型
    pub target: Option<TypeInfo>,
    /// 实现类型，缺省为被标注的类型；指定工厂时忽略
    pub implementation: Option<TypeInfo>,
    /// 生命周期，缺省为 [`Lifetime::Scoped`]
    pub lifetime: Lifetime,
    /// 处理顺序，升序
    pub sort_order: i32,
    /// 注入工厂
    pub factory: Option<FactoryRef>,
    /// 非工厂注册使用的激活器
    pub activator: Option<ServiceActivator>,
}

impl InjectableMarker {
    /// 创建缺省标记
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建带激活器的标记，目标与实现类型由激活器的类型参数决定
    pub fn activated<I, T>(convert: fn(Arc<I>) -> Arc<T>) -> Self
    where
        I: Activate + Send + Sync + 'static,
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            target: Some(TypeInfo::of::<T>()),
            implementation: Some(TypeInfo::of::<I>()),
            activator: Some(activator(convert)),
            ..Self::default()
        }
    }

    /// 设置目标服务类型
    pub fn with_target<T: ?Sized + 'static>(mut self) -> Self {
        self.target = Some(TypeInfo::of::<T>());
        self
    }

    /// 设置实现类型
    pub fn with_implementation<I: ?Sized + 'static>(mut self) -> Self {
        self.implementation = Some(TypeInfo::of::<I>());
        self
    }

    /// 设置生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// 设置处理顺序
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// 设置注入工厂
    pub fn with_factory(mut self, factory: FactoryRef) -> Self {
        self.factory = Some(factory);
        self
    }

    /// 设置激活器
    pub fn with_activator(mut self, activator: ServiceActivator) -> Self {
        self.activator = Some(activator);
        self
    }
}

impl fmt::Debug for InjectableMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectableMarker")
            .field("target", &self.target)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .field("sort_order", &self.sort_order)
            .field("factory", &self.factory)
            .field("activator", &self.activator.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 选项绑定函数
pub type OptionsBinder = fn(&[ConfigSection]) -> Result<ServiceInstance, ConfigError>;

/// 选项类型引用
///
/// 携带选项类型的标识和单态化后的绑定函数。
#[derive(Clone, Copy)]
pub struct OptionsTypeRef {
    type_info: TypeInfo,
    binder: OptionsBinder,
}

impl OptionsTypeRef {
    /// 引用选项类型
    pub fn of<T: OptionsType>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            binder: bind_options::<T>,
        }
    }

    /// 选项类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 依次叠加配置节并绑定，没有配置节时得到默认值
    pub fn bind(&self, sections: &[ConfigSection]) -> Result<ServiceInstance, ConfigError> {
        (self.binder)(sections)
    }
}

impl PartialEq for OptionsTypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_info == other.type_info
    }
}

impl Eq for OptionsTypeRef {}

impl fmt::Debug for OptionsTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OptionsTypeRef").field(&self.type_info).finish()
    }
}

fn bind_options<T: OptionsType>(sections: &[ConfigSection]) -> Result<ServiceInstance, ConfigError> {
    bind_sections::<T>(sections).map(|options| ServiceInstance::new(Arc::new(options)))
}

/// 选项标记
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InjectableOptionsMarker {
    /// 配置路径，缺省为选项类型的简短名称
    pub path: Option<String>,
    /// 选项类型，缺省为被标注的类型
    pub implementation: Option<OptionsTypeRef>,
}

impl InjectableOptionsMarker {
    /// 创建缺省标记
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置配置路径
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 设置选项类型
    pub fn with_implementation<T: OptionsType>(mut self) -> Self {
        self.implementation = Some(OptionsTypeRef::of::<T>());
        self
    }
}
