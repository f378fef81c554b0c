//! 服务提供者
//!
//! 单例缓存在根上，作用域实例缓存在各自的作用域中，瞬态实例从不缓存。
//! 激活器运行期间不持有任何缓存锁，并发时先完成的实例胜出。

use dashmap::DashMap;
use di_abstractions::{
    OptionsBinding, OptionsTypeRef, ServiceDescriptor, ServiceInstance, ServiceResolver,
};
use infrastructure_common::{ConfigSection, DependencyError, Lifetime, TypeInfo};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 作用域状态
struct ScopeState {
    id: Uuid,
    instances: DashMap<usize, ServiceInstance>,
}

impl ScopeState {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            instances: DashMap::new(),
        }
    }
}

/// 根容器状态，所有作用域共享
struct ProviderRoot {
    descriptors: Vec<ServiceDescriptor>,
    /// 服务类型到描述符下标的索引（登记顺序）
    index: HashMap<TypeId, Vec<usize>>,
    singletons: DashMap<usize, ServiceInstance>,
    options_enabled: bool,
    options_bindings: HashMap<TypeId, Vec<OptionsBinding>>,
    options_cache: DashMap<TypeId, ServiceInstance>,
    root_scope: Arc<ScopeState>,
}

/// 服务提供者
#[derive(Clone)]
pub struct ServiceProvider {
    root: Arc<ProviderRoot>,
    scope: Arc<ScopeState>,
}

impl ServiceProvider {
    pub(crate) fn new(
        descriptors: Vec<ServiceDescriptor>,
        options_enabled: bool,
        bindings: Vec<OptionsBinding>,
    ) -> Self {
        let mut index: HashMap<TypeId, Vec<usize>> = HashMap::new();
        for (position, descriptor) in descriptors.iter().enumerate() {
            index.entry(descriptor.service_type.id).or_default().push(position);
        }

        let mut options_bindings: HashMap<TypeId, Vec<OptionsBinding>> = HashMap::new();
        for binding in bindings {
            options_bindings
                .entry(binding.options_type.type_info().id)
                .or_default()
                .push(binding);
        }

        info!(
            "构建服务提供者: {} 个服务描述符, {} 个选项类型",
            descriptors.len(),
            options_bindings.len()
        );

        let root_scope = Arc::new(ScopeState::new());
        Self {
            root: Arc::new(ProviderRoot {
                descriptors,
                index,
                singletons: DashMap::new(),
                options_enabled,
                options_bindings,
                options_cache: DashMap::new(),
                root_scope: Arc::clone(&root_scope),
            }),
            scope: root_scope,
        }
    }

    /// 创建新的作用域
    pub fn create_scope(&self) -> ServiceProvider {
        let scope = Arc::new(ScopeState::new());
        debug!("创建作用域: {}", scope.id);
        Self {
            root: Arc::clone(&self.root),
            scope,
        }
    }

    /// 当前作用域标识
    pub fn scope_id(&self) -> Uuid {
        self.scope.id
    }

    /// 是否为根作用域
    pub fn is_root(&self) -> bool {
        Arc::ptr_eq(&self.scope, &self.root.root_scope)
    }

    /// 服务类型是否已注册
    pub fn is_registered(&self, service_type: &TypeInfo) -> bool {
        self.root.index.contains_key(&service_type.id)
    }

    fn root_provider(&self) -> ServiceProvider {
        Self {
            root: Arc::clone(&self.root),
            scope: Arc::clone(&self.root.root_scope),
        }
    }

    fn resolve_descriptor(&self, position: usize) -> Result<ServiceInstance, DependencyError> {
        let descriptor = &self.root.descriptors[position];
        match descriptor.lifetime {
            Lifetime::Singleton => {
                if let Some(instance) = self.root.singletons.get(&position) {
                    return Ok(instance.clone());
                }
                let instance = self.root_provider().activate(descriptor)?;
                Ok(self.root.singletons.entry(position).or_insert(instance).value().clone())
            }
            Lifetime::Scoped => {
                if let Some(instance) = self.scope.instances.get(&position) {
                    return Ok(instance.clone());
                }
                let instance = self.activate(descriptor)?;
                Ok(self.scope.instances.entry(position).or_insert(instance).value().clone())
            }
            Lifetime::Transient => self.activate(descriptor),
        }
    }

    fn activate(&self, descriptor: &ServiceDescriptor) -> Result<ServiceInstance, DependencyError> {
        debug!(
            "激活服务: {} ({}, 作用域 {})",
            descriptor.service_type, descriptor.lifetime, self.scope.id
        );
        let activator = descriptor.activator();
        activator(self as &dyn ServiceResolver)
    }
}

impl ServiceResolver for ServiceProvider {
    fn resolve_instance(&self, service_type: &TypeInfo) -> Result<Option<ServiceInstance>, DependencyError> {
        match self.root.index.get(&service_type.id).and_then(|positions| positions.last()) {
            Some(&position) => self.resolve_descriptor(position).map(Some),
            None => Ok(None),
        }
    }

    fn resolve_all_instances(&self, service_type: &TypeInfo) -> Result<Vec<ServiceInstance>, DependencyError> {
        match self.root.index.get(&service_type.id) {
            Some(positions) => positions
                .iter()
                .map(|&position| self.resolve_descriptor(position))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    fn resolve_options(&self, options_type: &OptionsTypeRef) -> Result<ServiceInstance, DependencyError> {
        let type_info = options_type.type_info();
        if !self.root.options_enabled {
            return Err(DependencyError::OptionsNotEnabled {
                type_name: type_info.short_name(),
            });
        }

        if let Some(instance) = self.root.options_cache.get(&type_info.id) {
            return Ok(instance.clone());
        }

        let sections: Vec<ConfigSection> = self
            .root
            .options_bindings
            .get(&type_info.id)
            .map(|bindings| bindings.iter().map(|b| b.section.clone()).collect())
            .unwrap_or_default();
        debug!("绑定选项: {} ({} 个配置节)", type_info, sections.len());

        let instance = options_type
            .bind(&sections)
            .map_err(|source| DependencyError::OptionsBindingFailed {
                type_name: type_info.short_name(),
                source,
            })?;
        Ok(self.root.options_cache.entry(type_info.id).or_insert(instance).value().clone())
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("descriptors", &self.root.descriptors.len())
            .field("scope", &self.scope.id)
            .field("is_root", &self.is_root())
            .finish()
    }
}
