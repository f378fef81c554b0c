//! 注入工厂校验

use di_abstractions::{FactoryCapability, FactoryRef};
use infrastructure_common::{ComponentError, TypeInfo};
use tracing::error;

/// 校验注册标记引用的注入工厂
///
/// 工厂类型必须具备 [`InjectableFactory`](di_abstractions::InjectableFactory) 能力。
/// 经 [`FactoryRef::typed`] 转换过的工厂，产出的可赋值性已在编译期确认，只核对转换目标；
/// 其余带类型的工厂声明的产出类型必须与目标类型一致。通过时返回工厂能力。
pub fn validate_injection_factory(
    target: &TypeInfo,
    factory: &FactoryRef,
) -> Result<FactoryCapability, ComponentError> {
    let Some(capability) = factory.capability().cloned() else {
        error!("注入工厂无效: target={}, factory={}", target, factory.type_info());
        return Err(ComponentError::InvalidFactory {
            target: target.short_name(),
            factory: factory.type_info().short_name(),
        });
    };

    let produced = capability
        .converted_target()
        .or_else(|| capability.declared_output())
        .copied();
    if let Some(produced) = produced {
        if produced != *target {
            error!(
                "注入工厂产出类型不兼容: target={}, factory={}, produced={}",
                target,
                factory.type_info(),
                produced
            );
            return Err(ComponentError::IncompatibleFactory {
                target: target.short_name(),
                factory: factory.type_info().short_name(),
                produced: produced.short_name(),
            });
        }
    }

    Ok(capability)
}
