//! 服务注册流水线的端到端测试

mod common;

use common::*;
use di_abstractions::{
    ComponentModule, Lifetime, ModuleProvider, ModuleSource, Representative, ServiceDescriptor,
    ServiceResolverExt, StaticModuleProvider, TypeInfo,
};
use di_impl::{AttributeInjectionExt, ServiceCollection};
use infrastructure_common::ComponentError;
use std::sync::Arc;

fn registrations(services: &ServiceCollection, lifetime: Lifetime) -> Vec<&ServiceDescriptor> {
    services
        .descriptors()
        .iter()
        .filter(|d| d.lifetime == lifetime)
        .collect()
}

fn count(services: &ServiceCollection, lifetime: Lifetime, target: TypeInfo, implementation: Option<TypeInfo>) -> usize {
    registrations(services, lifetime)
        .into_iter()
        .filter(|d| d.service_type == target && d.implementation_type().copied() == implementation)
        .count()
}

fn assert_assembly_a(services: &ServiceCollection) {
    let singletons = registrations(services, Lifetime::Singleton);
    let transients = registrations(services, Lifetime::Transient);
    let scoped = registrations(services, Lifetime::Scoped);
    assert_eq!(singletons.len(), 1);
    assert_eq!(transients.len(), 1);
    assert_eq!(scoped.len(), 2);

    assert_eq!(singletons[0].service_type, TypeInfo::of::<ClassA2>());
    assert_eq!(singletons[0].implementation_type(), Some(&TypeInfo::of::<ClassA2>()));
    assert_eq!(transients[0].service_type, TypeInfo::of::<dyn IInterfaceA2>());
    assert_eq!(transients[0].implementation_type(), Some(&TypeInfo::of::<ClassA2>()));

    assert!(scoped
        .iter()
        .all(|d| d.implementation_type() == Some(&TypeInfo::of::<ClassA1>())));
    assert!(scoped.iter().any(|d| d.service_type == TypeInfo::of::<ClassA1>()));
    assert!(scoped.iter().any(|d| d.service_type == TypeInfo::of::<dyn IInterfaceA1>()));
}

fn assert_assemblies_a_and_b(services: &ServiceCollection) {
    let some = |t: TypeInfo| Some(t);

    assert_eq!(registrations(services, Lifetime::Singleton).len(), 2);
    assert_eq!(count(services, Lifetime::Singleton, TypeInfo::of::<ClassA2>(), some(TypeInfo::of::<ClassA2>())), 1);
    assert_eq!(count(services, Lifetime::Singleton, TypeInfo::of::<ClassB2>(), some(TypeInfo::of::<ClassB2>())), 1);

    assert_eq!(registrations(services, Lifetime::Transient).len(), 2);
    assert_eq!(count(services, Lifetime::Transient, TypeInfo::of::<dyn IInterfaceA2>(), some(TypeInfo::of::<ClassA2>())), 1);
    assert_eq!(count(services, Lifetime::Transient, TypeInfo::of::<dyn IInterfaceB2>(), some(TypeInfo::of::<ClassB2>())), 1);

    assert_eq!(registrations(services, Lifetime::Scoped).len(), 6);
    assert_eq!(count(services, Lifetime::Scoped, TypeInfo::of::<dyn IInterfaceA1>(), some(TypeInfo::of::<ClassA1>())), 1);
    assert_eq!(count(services, Lifetime::Scoped, TypeInfo::of::<ClassA1>(), some(TypeInfo::of::<ClassA1>())), 1);
    assert_eq!(count(services, Lifetime::Scoped, TypeInfo::of::<dyn IInterfaceB1>(), some(TypeInfo::of::<ClassB1>())), 1);
    assert_eq!(count(services, Lifetime::Scoped, TypeInfo::of::<ClassB1>(), some(TypeInfo::of::<ClassB1>())), 1);
    assert_eq!(count(services, Lifetime::Scoped, TypeInfo::of::<ClassB3>(), None), 1);

    let factory_created: Vec<_> = registrations(services, Lifetime::Scoped)
        .into_iter()
        .filter(|d| d.factory_type().is_some())
        .collect();
    assert_eq!(factory_created.len(), 2);

    let provider = services.build_service_provider();
    assert_eq!(provider.get_required_service::<ClassB3>().unwrap().source, "ClassB3Factory");
    assert_eq!(provider.get_required_service::<dyn InterfaceB4>().unwrap().test(), 6);
}

struct ReturnsNothing;

impl ModuleProvider for ReturnsNothing {
    fn modules(&self) -> Option<Vec<&'static ComponentModule>> {
        None
    }
}

/// 测试单个代表类型
#[test]
fn test_assembly_a_representative_single() {
    init_tracing();
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Representatives(&[Representative::of::<ClassA1>()]))
        .unwrap();

    assert_assembly_a(&services);
}

/// 测试同一模块的多个代表类型
#[test]
fn test_assembly_a_representative_multiple() {
    let mut services = ServiceCollection::new();
    let representatives = [Representative::of::<ClassA1>(), Representative::of::<ClassA2>()];

    services
        .scan_for_attribute_injection(ModuleSource::Representatives(&representatives))
        .unwrap();

    assert_assembly_a(&services);
}

/// 测试模块提供者不过滤
#[test]
fn test_provider_no_filter() {
    let provider = StaticModuleProvider::new(vec![&ASSEMBLY_A, &ASSEMBLY_B]);
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Provider {
            provider: &provider,
            filter_to_injectable: false,
        })
        .unwrap();

    assert_assemblies_a_and_b(&services);
}

/// 测试模块提供者只保留参与过滤扫描的模块
#[test]
fn test_provider_filter() {
    let provider = StaticModuleProvider::new(vec![&ASSEMBLY_A, &ASSEMBLY_B]);
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::provider(&provider))
        .unwrap();

    assert_assembly_a(&services);
}

/// 测试模块提供者返回 None 时不注册任何服务
#[test]
fn test_provider_returning_none() {
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::provider(&ReturnsNothing))
        .unwrap();

    assert!(services.is_empty());
}

/// 测试单个模块
#[test]
fn test_assembly_a_module_single() {
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&ASSEMBLY_A]))
        .unwrap();

    assert_assembly_a(&services);
}

/// 测试重复的模块
#[test]
fn test_assembly_a_module_multiple() {
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&ASSEMBLY_A, &ASSEMBLY_A]))
        .unwrap();

    assert_assembly_a(&services);
}

/// 测试来自不同模块的代表类型
#[test]
fn test_multiple_representatives_distinct() {
    let mut services = ServiceCollection::new();
    let representatives = [Representative::of::<ClassA1>(), Representative::of::<ClassB1>()];

    services
        .scan_for_attribute_injection(ModuleSource::Representatives(&representatives))
        .unwrap();

    assert_assemblies_a_and_b(&services);
}

/// 测试重复的代表类型
#[test]
fn test_multiple_representatives_dupes() {
    let mut services = ServiceCollection::new();
    let representatives = [
        Representative::of::<ClassA1>(),
        Representative::of::<ClassB1>(),
        Representative::of::<ClassA2>(),
        Representative::of::<ClassB4>(),
    ];

    services
        .scan_for_attribute_injection(ModuleSource::Representatives(&representatives))
        .unwrap();

    assert_assemblies_a_and_b(&services);
}

/// 测试多个不同的模块
#[test]
fn test_multiple_modules_distinct() {
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&ASSEMBLY_A, &ASSEMBLY_B]))
        .unwrap();

    assert_assemblies_a_and_b(&services);
}

/// 测试多个重复的模块
#[test]
fn test_multiple_modules_dupes() {
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[
            &ASSEMBLY_A,
            &ASSEMBLY_A,
            &ASSEMBLY_B,
            &ASSEMBLY_B,
        ]))
        .unwrap();

    assert_assemblies_a_and_b(&services);
}

/// 测试无效工厂
#[test]
fn test_factory_invalid() {
    let mut services = ServiceCollection::new();

    let error = services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&ASSEMBLY_C]))
        .unwrap_err();

    assert!(matches!(error, ComponentError::InvalidFactory { .. }));
    assert_eq!(error.target(), Some("ClassC1"));
}

/// 测试带类型工厂
#[test]
fn test_factory_typed() {
    let mut services = ServiceCollection::new();

    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&TYPED_FACTORY]))
        .unwrap();

    let scoped = registrations(&services, Lifetime::Scoped);
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].service_type, TypeInfo::of::<dyn ITypedFactoryTarget>());
    assert_eq!(scoped[0].factory_type(), Some(&TypeInfo::of::<TypedImplFactory>()));

    let provider = services.build_service_provider();
    let created = provider.get_required_service::<dyn ITypedFactoryTarget>().unwrap();
    assert_eq!(created.kind(), "TypedImplClass");
}

/// 测试带类型工厂的产出类型与目标不一致
#[test]
fn test_factory_typed_invalid() {
    let mut services = ServiceCollection::new();

    let error = services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&INVALID_TYPED_FACTORY]))
        .unwrap_err();

    match error {
        ComponentError::IncompatibleFactory {
            target,
            factory,
            produced,
        } => {
            assert_eq!(target, "dyn IInvalidTypedFactoryTarget");
            assert_eq!(factory, "TypedImplFactory");
            assert_eq!(produced, "TypedImplClass");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// 测试扫描得到的服务按生命周期复用
#[test]
fn test_scanned_services_follow_lifetimes() {
    let mut services = ServiceCollection::new();
    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&ASSEMBLY_A]))
        .unwrap();
    let provider = services.build_service_provider();
    let scope1 = provider.create_scope();
    let scope2 = provider.create_scope();

    let singleton1 = scope1.get_required_service::<ClassA2>().unwrap();
    let singleton2 = scope2.get_required_service::<ClassA2>().unwrap();
    assert!(Arc::ptr_eq(&singleton1, &singleton2));

    let scoped1 = scope1.get_required_service::<ClassA1>().unwrap();
    assert!(Arc::ptr_eq(&scoped1, &scope1.get_required_service::<ClassA1>().unwrap()));
    assert!(!Arc::ptr_eq(&scoped1, &scope2.get_required_service::<ClassA1>().unwrap()));

    assert_eq!(scope1.get_required_service::<dyn IInterfaceA2>().unwrap().name(), "ClassA2");
}

/// 测试作用域工厂在每个新作用域中重新执行
#[test]
fn test_scoped_factory_runs_once_per_scope() {
    init_tracing();
    let mut services = ServiceCollection::new();
    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&COUNTING]))
        .unwrap();
    let provider = services.build_service_provider();
    let before = ScopedCountingFactory::created();

    let scope1 = provider.create_scope();
    let first = scope1.get_required_service::<CountedScoped>().unwrap();
    let again = scope1.get_required_service::<CountedScoped>().unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(ScopedCountingFactory::created(), before + 1);

    let scope2 = provider.create_scope();
    let second = scope2.get_required_service::<CountedScoped>().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.number, second.number);
    assert_eq!(ScopedCountingFactory::created(), before + 2);
}

/// 测试瞬时工厂每次解析都重新执行
#[test]
fn test_transient_factory_runs_per_resolution() {
    init_tracing();
    let mut services = ServiceCollection::new();
    services
        .scan_for_attribute_injection(ModuleSource::Modules(&[&COUNTING]))
        .unwrap();
    let provider = services.build_service_provider();
    let scope = provider.create_scope();
    let before = TransientCountingFactory::created();

    let first = scope.get_required_service::<CountedTransient>().unwrap();
    let second = scope.get_required_service::<CountedTransient>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(TransientCountingFactory::created(), before + 2);
}
