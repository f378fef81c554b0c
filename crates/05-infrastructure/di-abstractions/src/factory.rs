//! 注入工厂
//!
//! 注册标记可以指定一个工厂类型来代替实现类型。工厂类型必须实现 [`InjectableFactory`]，
//! 实现 [`TypedInjectableFactory`] 的工厂同时声明了产出类型：派生宏生成的标记在编译期
//! 确认产出可以赋值给目标类型，手工构造的标记在扫描时比对类型标识。

use crate::instance::ServiceInstance;
use crate::marker::ServiceActivator;
use crate::resolver::ServiceResolver;
use infrastructure_common::{DependencyError, TypeInfo};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 注入工厂 trait（无类型）
pub trait InjectableFactory: Send + Sync + 'static {
    /// 创建服务实例
    fn create(&self, resolver: &dyn ServiceResolver) -> Result<ServiceInstance, DependencyError>;

    /// 工厂声明的产出类型，无类型工厂返回 `None`
    fn declared_output() -> Option<TypeInfo>
    where
        Self: Sized,
    {
        None
    }
}

/// 注入工厂 trait（带产出类型）
///
/// 所有带类型的工厂同时也是 [`InjectableFactory`]。
pub trait TypedInjectableFactory: Send + Sync + 'static {
    /// 产出的服务类型
    type Output: ?Sized + Send + Sync + 'static;

    /// 创建服务实例
    fn create_service(&self, resolver: &dyn ServiceResolver) -> Result<Arc<Self::Output>, DependencyError>;
}

impl<F: TypedInjectableFactory> InjectableFactory for F {
    fn create(&self, resolver: &dyn ServiceResolver) -> Result<ServiceInstance, DependencyError> {
        self.create_service(resolver).map(ServiceInstance::new)
    }

    fn declared_output() -> Option<TypeInfo> {
        Some(TypeInfo::of::<F::Output>())
    }
}

/// 工厂能力：声明的产出类型和构造激活器的函数
#[derive(Clone)]
pub struct FactoryCapability {
    declared_output: Option<TypeInfo>,
    converted_target: Option<TypeInfo>,
    construct: Arc<dyn Fn() -> ServiceActivator + Send + Sync>,
}

impl FactoryCapability {
    /// 声明的产出类型
    pub fn declared_output(&self) -> Option<&TypeInfo> {
        self.declared_output.as_ref()
    }

    /// 编译期已转换到的目标类型
    ///
    /// 通过 [`FactoryRef::typed`] 引用的工厂，产出在编译期已确认可以赋值给该类型。
    pub fn converted_target(&self) -> Option<&TypeInfo> {
        self.converted_target.as_ref()
    }

    /// 默认构造工厂，返回委托给工厂的激活器
    pub fn activator(&self) -> ServiceActivator {
        (self.construct)()
    }
}

impl fmt::Debug for FactoryCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryCapability")
            .field("declared_output", &self.declared_output.map(|t| t.short_name()))
            .field("converted_target", &self.converted_target.map(|t| t.short_name()))
            .finish_non_exhaustive()
    }
}

/// 注册标记中对工厂类型的引用
///
/// 引用的类型不一定具备工厂能力，是否可用在扫描时校验。
#[derive(Debug, Clone)]
pub struct FactoryRef {
    type_info: TypeInfo,
    capability: Option<FactoryCapability>,
}

impl FactoryRef {
    /// 引用一个具备工厂能力的类型
    ///
    /// 带类型工厂的产出类型在扫描时与目标类型比对。
    pub fn of<F: InjectableFactory + Default>() -> Self {
        Self {
            type_info: TypeInfo::of::<F>(),
            capability: Some(FactoryCapability {
                declared_output: F::declared_output(),
                converted_target: None,
                construct: Arc::new(untyped_activator::<F>),
            }),
        }
    }

    /// 引用一个带类型的工厂，并把产出转换为目标类型 `T`
    ///
    /// `convert` 通常写作 `|output| output`，由编译器保证产出类型可以赋值给目标类型。
    pub fn typed<F, T>(convert: fn(Arc<F::Output>) -> Arc<T>) -> Self
    where
        F: TypedInjectableFactory + Default,
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<F>(),
            capability: Some(FactoryCapability {
                declared_output: Some(TypeInfo::of::<F::Output>()),
                converted_target: Some(TypeInfo::of::<T>()),
                construct: Arc::new(move || typed_activator::<F, T>(convert)),
            }),
        }
    }

    /// 引用任意类型，不携带工厂能力
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            capability: None,
        }
    }

    /// 工厂类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 工厂能力
    pub fn capability(&self) -> Option<&FactoryCapability> {
        self.capability.as_ref()
    }
}

fn untyped_activator<F: InjectableFactory + Default>() -> ServiceActivator {
    let factory = F::default();
    Arc::new(move |resolver: &dyn ServiceResolver| factory.create(resolver))
}

fn typed_activator<F, T>(convert: fn(Arc<F::Output>) -> Arc<T>) -> ServiceActivator
where
    F: TypedInjectableFactory + Default,
    T: ?Sized + Send + Sync + 'static,
{
    let factory = F::default();
    Arc::new(move |resolver: &dyn ServiceResolver| {
        factory
            .create_service(resolver)
            .map(|output| ServiceInstance::new(convert(output)))
    })
}

/// 派生宏用于构造 [`FactoryRef`] 的类型标签
///
/// `(&&&FactoryTag::<F>::new()).factory_ref::<T>(|output| output)` 按以下顺序选择：
///
/// - `F` 是带类型的工厂：[`FactoryRef::typed`]，产出类型不能赋值给 `T` 时编译失败
/// - `F` 是无类型的工厂：[`FactoryRef::of`]
/// - 其他类型：[`FactoryRef::of_type`]，错误在扫描时而不是编译时报告
#[doc(hidden)]
pub struct FactoryTag<T: ?Sized>(PhantomData<fn() -> Box<T>>);

impl<T: ?Sized> FactoryTag<T> {
    /// 创建标签
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for FactoryTag<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 不需要转换时使用的占位转换函数类型
#[doc(hidden)]
pub type UnusedConvert = fn(Arc<()>) -> Arc<()>;

#[doc(hidden)]
pub trait ResolveTypedFactory {
    type Output: ?Sized + Send + Sync + 'static;

    fn factory_ref<T: ?Sized + Send + Sync + 'static>(
        &self,
        convert: fn(Arc<Self::Output>) -> Arc<T>,
    ) -> FactoryRef;
}

impl<F: TypedInjectableFactory + Default> ResolveTypedFactory for &&FactoryTag<F> {
    type Output = F::Output;

    fn factory_ref<T: ?Sized + Send + Sync + 'static>(
        &self,
        convert: fn(Arc<F::Output>) -> Arc<T>,
    ) -> FactoryRef {
        FactoryRef::typed::<F, T>(convert)
    }
}

#[doc(hidden)]
pub trait ResolveFactoryCapability {
    fn factory_ref<T: ?Sized>(&self, convert: UnusedConvert) -> FactoryRef;
}

impl<F: InjectableFactory + Default> ResolveFactoryCapability for &FactoryTag<F> {
    fn factory_ref<T: ?Sized>(&self, _convert: UnusedConvert) -> FactoryRef {
        FactoryRef::of::<F>()
    }
}

#[doc(hidden)]
pub trait ResolvePlainType {
    fn factory_ref<T: ?Sized>(&self, convert: UnusedConvert) -> FactoryRef;
}

impl<P: ?Sized + 'static> ResolvePlainType for FactoryTag<P> {
    fn factory_ref<T: ?Sized>(&self, _convert: UnusedConvert) -> FactoryRef {
        FactoryRef::of_type::<P>()
    }
}
