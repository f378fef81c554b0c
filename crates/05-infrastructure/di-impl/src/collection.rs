//! 服务集合

use crate::provider::ServiceProvider;
use di_abstractions::{OptionsBinding, ServiceDescriptor, ServiceRegistry};
use tracing::debug;

/// 服务集合
///
/// 按登记顺序保存服务描述符和选项绑定，构建后得到 [`ServiceProvider`]。
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
    options_enabled: bool,
    options_bindings: Vec<OptionsBinding>,
}

impl ServiceCollection {
    /// 创建空的服务集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 已登记的服务描述符（登记顺序）
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// 服务描述符数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否没有任何注册
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// 是否已启用选项功能
    pub fn options_enabled(&self) -> bool {
        self.options_enabled
    }

    /// 已登记的选项绑定（登记顺序）
    pub fn options_bindings(&self) -> &[OptionsBinding] {
        &self.options_bindings
    }

    /// 构建服务提供者
    pub fn build_service_provider(&self) -> ServiceProvider {
        ServiceProvider::new(
            self.descriptors.clone(),
            self.options_enabled,
            self.options_bindings.clone(),
        )
    }
}

impl ServiceRegistry for ServiceCollection {
    fn add(&mut self, descriptor: ServiceDescriptor) {
        debug!(
            "添加服务: {} ({:?}, {})",
            descriptor.service_type, descriptor.implementation, descriptor.lifetime
        );
        self.descriptors.push(descriptor);
    }

    fn add_options(&mut self) {
        if !self.options_enabled {
            debug!("启用选项功能");
            self.options_enabled = true;
        }
    }

    fn configure_options(&mut self, binding: OptionsBinding) {
        debug!("添加选项绑定: {} <- {}", binding.options_type.type_info(), binding.path);
        self.options_bindings.push(binding);
    }
}
