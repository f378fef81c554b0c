//! 选项绑定流水线

use config_abstractions::Configuration;
use di_abstractions::{ModuleSource, OptionsBinding, ServiceRegistry, TypeEntry};
use infrastructure_common::ComponentError;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::{debug, error, info};

/// 同一选项类型在一次扫描中被多次绑定时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateOptionsPolicy {
    /// 报告 [`ComponentError::DuplicateOptionsBinding`]
    #[default]
    Reject,
    /// 全部绑定按登记顺序叠加，后出现的键覆盖先出现的键
    Merge,
}

/// 选项扫描设置
#[derive(Debug, Clone, Default)]
pub struct OptionsScanSettings {
    /// 重复绑定处理方式，缺省为 [`DuplicateOptionsPolicy::Reject`]
    pub duplicate_policy: DuplicateOptionsPolicy,
}

impl OptionsScanSettings {
    /// 创建缺省设置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置重复绑定处理方式
    pub fn with_duplicate_policy(mut self, policy: DuplicateOptionsPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// 选项标记扫描扩展
pub trait OptionAttributeInjectionExt: ServiceRegistry + Sized {
    /// 扫描模块来源中的选项标记并绑定配置节
    fn scan_for_option_attribute_injection<C>(
        &mut self,
        config: &C,
        source: ModuleSource<'_>,
    ) -> Result<&mut Self, ComponentError>
    where
        C: Configuration + ?Sized,
    {
        self.scan_for_option_attribute_injection_with(config, source, &OptionsScanSettings::default())
    }

    /// 使用指定设置扫描选项标记
    fn scan_for_option_attribute_injection_with<C>(
        &mut self,
        config: &C,
        source: ModuleSource<'_>,
        settings: &OptionsScanSettings,
    ) -> Result<&mut Self, ComponentError>
    where
        C: Configuration + ?Sized,
    {
        let types = source.types();
        inject_option_types(self, config, &types, settings)?;
        Ok(self)
    }
}

impl<R: ServiceRegistry> OptionAttributeInjectionExt for R {}

/// 绑定类型条目中的全部选项标记，返回绑定数量
pub fn inject_option_types<R, C>(
    registry: &mut R,
    config: &C,
    types: &[TypeEntry],
    settings: &OptionsScanSettings,
) -> Result<usize, ComponentError>
where
    R: ServiceRegistry + ?Sized,
    C: Configuration + ?Sized,
{
    registry.add_options();

    let mut bound_paths: HashMap<TypeId, String> = HashMap::new();
    let mut count = 0;

    for entry in types {
        for marker in entry.options() {
            let options_type = marker
                .implementation
                .or_else(|| entry.options_type().copied())
                .ok_or_else(|| {
                    ComponentError::invalid_metadata(
                        entry.type_info().short_name(),
                        "选项标记未指定选项类型，且类型本身不是选项类型",
                    )
                })?;
            let path = marker
                .path
                .clone()
                .unwrap_or_else(|| options_type.type_info().short_name());

            if settings.duplicate_policy == DuplicateOptionsPolicy::Reject {
                if let Some(first_path) = bound_paths.get(&options_type.type_info().id) {
                    error!(
                        "选项类型重复绑定: {} ({} 与 {})",
                        options_type.type_info(),
                        first_path,
                        path
                    );
                    return Err(ComponentError::DuplicateOptionsBinding {
                        type_name: options_type.type_info().short_name(),
                        first_path: first_path.clone(),
                        second_path: path,
                    });
                }
                bound_paths.insert(options_type.type_info().id, path.clone());
            }

            let section = config.get_section(&path);
            if !section.exists() {
                debug!("配置节 {} 不存在，{} 使用默认值", path, options_type.type_info());
            }
            debug!("绑定选项: {} <- {}", options_type.type_info(), path);

            registry.configure_options(OptionsBinding {
                options_type,
                path,
                section,
            });
            count += 1;
        }
    }

    info!("选项标记扫描完成: {} 个类型, {} 个绑定", types.len(), count);
    Ok(count)
}
