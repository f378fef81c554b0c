//! 集成测试共享的模块与类型
//!
//! 模块 A 参与过滤扫描，模块 B 与 C 不参与；模块 C 中的 `ClassC1` 引用了无效工厂。

#![allow(dead_code)]

use component_macros::{Activate, Injectable};
use di_abstractions::{
    component_module, Annotated, DependencyError, FactoryRef, InjectableFactory, InjectableMarker,
    ServiceInstance, ServiceResolver, TypeEntry, TypedInjectableFactory,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// 初始化测试日志
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------- 模块 A ----------

pub trait IInterfaceA1: Send + Sync {}

pub trait IInterfaceA2: Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Debug, Injectable, Activate)]
#[injectable]
#[injectable(target = dyn IInterfaceA1)]
pub struct ClassA1;

impl IInterfaceA1 for ClassA1 {}

#[derive(Debug, Injectable, Activate)]
#[injectable(lifetime = singleton)]
#[injectable(target = dyn IInterfaceA2, implementation = ClassA2, lifetime = transient)]
pub struct ClassA2;

impl IInterfaceA2 for ClassA2 {
    fn name(&self) -> &'static str {
        "ClassA2"
    }
}

component_module! {
    pub static ASSEMBLY_A: "assembly_a", injectable = true => [ClassA1, ClassA2];
}

// ---------- 模块 B ----------

pub trait IInterfaceB1: Send + Sync {}

pub trait IInterfaceB2: Send + Sync {}

pub trait InterfaceB4: Send + Sync {
    fn test(&self) -> i32;
}

#[derive(Debug, Injectable, Activate)]
#[injectable]
#[injectable(target = dyn IInterfaceB1)]
pub struct ClassB1;

impl IInterfaceB1 for ClassB1 {}

#[derive(Debug, Injectable, Activate)]
#[injectable(singleton)]
#[injectable(target = dyn IInterfaceB2, transient)]
pub struct ClassB2;

impl IInterfaceB2 for ClassB2 {}

#[derive(Debug, Injectable)]
#[injectable(factory = ClassB3Factory)]
pub struct ClassB3 {
    pub source: &'static str,
}

#[derive(Default)]
pub struct ClassB3Factory;

impl InjectableFactory for ClassB3Factory {
    fn create(&self, _resolver: &dyn ServiceResolver) -> Result<ServiceInstance, DependencyError> {
        Ok(ServiceInstance::new(Arc::new(ClassB3 {
            source: "ClassB3Factory",
        })))
    }
}

#[derive(Debug, Injectable)]
#[injectable(target = dyn InterfaceB4, factory = ClassB4Factory)]
pub struct ClassB4 {
    pub test: i32,
}

impl InterfaceB4 for ClassB4 {
    fn test(&self) -> i32 {
        self.test
    }
}

#[derive(Default)]
pub struct ClassB4Factory;

impl TypedInjectableFactory for ClassB4Factory {
    type Output = dyn InterfaceB4;

    fn create_service(&self, _resolver: &dyn ServiceResolver) -> Result<Arc<dyn InterfaceB4>, DependencyError> {
        Ok(Arc::new(ClassB4 { test: 6 }))
    }
}

component_module! {
    pub static ASSEMBLY_B: "assembly_b" => [ClassB1, ClassB2, ClassB3, ClassB4];
}

// ---------- 模块 C ----------

/// 不具备工厂能力的类型
pub struct NotAFactory;

#[derive(Debug, Injectable)]
#[injectable(factory = NotAFactory)]
pub struct ClassC1;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Injectable)]
#[injectable_options(path = "TestOptions3", implementation = TestOptions3)]
#[injectable_options]
pub struct TestOptions1 {
    pub number: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Injectable)]
#[injectable_options(path = "TestOptions2")]
pub struct TestOptions2 {
    pub number: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Injectable)]
pub struct TestOptions3 {
    pub number: i32,
}

component_module! {
    pub static ASSEMBLY_C: "assembly_c" => [ClassC1, TestOptions1, TestOptions2, TestOptions3];
}

// ---------- 带类型工厂 ----------

pub trait ITypedFactoryTarget: Send + Sync {
    fn kind(&self) -> &'static str;
}

pub trait IInvalidTypedFactoryTarget: Send + Sync {}

pub struct TypedImplClass;

impl ITypedFactoryTarget for TypedImplClass {
    fn kind(&self) -> &'static str {
        "TypedImplClass"
    }
}

#[derive(Default)]
pub struct TypedImplFactory;

impl TypedInjectableFactory for TypedImplFactory {
    type Output = TypedImplClass;

    fn create_service(&self, _resolver: &dyn ServiceResolver) -> Result<Arc<TypedImplClass>, DependencyError> {
        Ok(Arc::new(TypedImplClass))
    }
}

impl Annotated for dyn ITypedFactoryTarget {
    fn type_entry() -> TypeEntry {
        TypeEntry::of::<dyn ITypedFactoryTarget>().with_injectable(
            InjectableMarker::new()
                .with_factory(FactoryRef::typed::<TypedImplFactory, dyn ITypedFactoryTarget>(|output| output)),
        )
    }
}

/// 手工引用工厂，不经过编译期转换，产出类型在扫描时比对
impl Annotated for dyn IInvalidTypedFactoryTarget {
    fn type_entry() -> TypeEntry {
        TypeEntry::of::<dyn IInvalidTypedFactoryTarget>()
            .with_injectable(InjectableMarker::new().with_factory(FactoryRef::of::<TypedImplFactory>()))
    }
}

component_module! {
    pub static TYPED_FACTORY: "typed_factory", injectable = true => [dyn ITypedFactoryTarget];
}

component_module! {
    pub static INVALID_TYPED_FACTORY: "invalid_typed_factory", injectable = true => [dyn IInvalidTypedFactoryTarget];
}

// ---------- 计数工厂 ----------

static SCOPED_CREATED: AtomicUsize = AtomicUsize::new(0);
static TRANSIENT_CREATED: AtomicUsize = AtomicUsize::new(0);

/// 由工厂创建的作用域服务，记录创建序号
#[derive(Debug, Injectable)]
#[injectable(factory = ScopedCountingFactory)]
pub struct CountedScoped {
    pub number: usize,
}

#[derive(Default)]
pub struct ScopedCountingFactory;

impl ScopedCountingFactory {
    /// 工厂累计执行次数
    pub fn created() -> usize {
        SCOPED_CREATED.load(Ordering::SeqCst)
    }
}

impl TypedInjectableFactory for ScopedCountingFactory {
    type Output = CountedScoped;

    fn create_service(&self, _resolver: &dyn ServiceResolver) -> Result<Arc<CountedScoped>, DependencyError> {
        let number = SCOPED_CREATED.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Arc::new(CountedScoped { number }))
    }
}

/// 由工厂创建的瞬时服务
#[derive(Debug, Injectable)]
#[injectable(factory = TransientCountingFactory, lifetime = transient)]
pub struct CountedTransient {
    pub number: usize,
}

#[derive(Default)]
pub struct TransientCountingFactory;

impl TransientCountingFactory {
    pub fn created() -> usize {
        TRANSIENT_CREATED.load(Ordering::SeqCst)
    }
}

impl InjectableFactory for TransientCountingFactory {
    fn create(&self, _resolver: &dyn ServiceResolver) -> Result<ServiceInstance, DependencyError> {
        let number = TRANSIENT_CREATED.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ServiceInstance::new(Arc::new(CountedTransient { number })))
    }
}

component_module! {
    pub static COUNTING: "counting" => [CountedScoped, CountedTransient];
}

/// 测试配置：每个选项类型对应一个同名配置节
pub const APP_SETTINGS: &str = r#"{
    "TestOptions1": { "Number": 1 },
    "TestOptions2": { "Number": 2 },
    "TestOptions3": { "Number": 3 }
}"#;
