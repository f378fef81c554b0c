//! 服务注册流水线
//!
//! 读取全部注册标记，按 `sort_order` 稳定排序后逐条注册到宿主容器。

use crate::validation::validate_injection_factory;
use di_abstractions::{InjectableMarker, ModuleSource, ServiceDescriptor, ServiceRegistry, TypeEntry};
use infrastructure_common::ComponentError;
use tracing::{debug, info};

/// 注册标记扫描扩展
pub trait AttributeInjectionExt: ServiceRegistry + Sized {
    /// 扫描模块来源中的注册标记并注册服务
    ///
    /// 校验失败时中止扫描，已完成的注册不会回滚。
    fn scan_for_attribute_injection(&mut self, source: ModuleSource<'_>) -> Result<&mut Self, ComponentError> {
        let types = source.types();
        inject_types(self, &types)?;
        Ok(self)
    }
}

impl<R: ServiceRegistry> AttributeInjectionExt for R {}

/// 注册类型条目中的全部注册标记，返回注册数量
pub fn inject_types<R>(registry: &mut R, types: &[TypeEntry]) -> Result<usize, ComponentError>
where
    R: ServiceRegistry + ?Sized,
{
    let mut pending: Vec<(&TypeEntry, &InjectableMarker)> = types
        .iter()
        .flat_map(|entry| entry.injectables().iter().map(move |marker| (entry, marker)))
        .collect();
    pending.sort_by_key(|(_, marker)| marker.sort_order);

    for (entry, marker) in &pending {
        let descriptor = build_descriptor(entry, marker)?;
        registry.add(descriptor);
    }

    info!("注册标记扫描完成: {} 个类型, {} 个注册", types.len(), pending.len());
    Ok(pending.len())
}

fn build_descriptor(entry: &TypeEntry, marker: &InjectableMarker) -> Result<ServiceDescriptor, ComponentError> {
    let target = marker.target.unwrap_or(*entry.type_info());

    if let Some(factory) = &marker.factory {
        let capability = validate_injection_factory(&target, factory)?;
        let activator = capability.activator();

        debug!(
            "注册工厂服务: {} <- {} ({}, sort_order={})",
            target,
            factory.type_info(),
            marker.lifetime,
            marker.sort_order
        );
        return Ok(ServiceDescriptor::factory(
            target,
            *factory.type_info(),
            activator,
            marker.lifetime,
        ));
    }

    let implementation = marker.implementation.unwrap_or(*entry.type_info());
    let activator = marker.activator.clone().ok_or_else(|| {
        ComponentError::invalid_metadata(
            target.short_name(),
            format!("实现类型 {} 缺少激活器", implementation),
        )
    })?;

    debug!(
        "注册服务: {} <- {} ({}, sort_order={})",
        target, implementation, marker.lifetime, marker.sort_order
    );
    Ok(ServiceDescriptor::activated(
        target,
        implementation,
        activator,
        marker.lifetime,
    ))
}
