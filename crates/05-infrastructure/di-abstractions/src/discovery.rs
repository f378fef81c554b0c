//! 模块来源
//!
//! 没有运行时反射，类型通过注册表条目 [`TypeEntry`] 描述，模块是静态声明的条目集合。
//! [`ModuleSource`] 的三种形式最终都得到一个去重后的类型列表。

use crate::marker::{InjectableMarker, InjectableOptionsMarker, OptionsTypeRef};
use config_abstractions::OptionsType;
use infrastructure_common::TypeInfo;
use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::ptr;
use tracing::{debug, warn};

/// 注册表条目：一个类型及其携带的标记
#[derive(Debug, Clone)]
pub struct TypeEntry {
    type_info: TypeInfo,
    injectables: Vec<InjectableMarker>,
    options: Vec<InjectableOptionsMarker>,
    options_type: Option<OptionsTypeRef>,
}

impl TypeEntry {
    /// 创建不带标记的条目
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            injectables: Vec::new(),
            options: Vec::new(),
            options_type: None,
        }
    }

    /// 添加注册标记
    pub fn with_injectable(mut self, marker: InjectableMarker) -> Self {
        self.injectables.push(marker);
        self
    }

    /// 添加选项标记
    pub fn with_options(mut self, marker: InjectableOptionsMarker) -> Self {
        self.options.push(marker);
        self
    }

    /// 声明类型本身是选项类型
    pub fn with_options_type(mut self, options_type: OptionsTypeRef) -> Self {
        self.options_type = Some(options_type);
        self
    }

    /// 声明 `T` 本身是选项类型
    pub fn as_options<T: OptionsType>(self) -> Self {
        self.with_options_type(OptionsTypeRef::of::<T>())
    }

    /// 条目描述的类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 注册标记（声明顺序）
    pub fn injectables(&self) -> &[InjectableMarker] {
        &self.injectables
    }

    /// 选项标记（声明顺序）
    pub fn options(&self) -> &[InjectableOptionsMarker] {
        &self.options
    }

    /// 类型本身的选项引用
    pub fn options_type(&self) -> Option<&OptionsTypeRef> {
        self.options_type.as_ref()
    }
}

/// 可生成注册表条目的类型，通常由 `#[derive(Injectable)]` 实现
pub trait Annotated {
    /// 类型的注册表条目
    fn type_entry() -> TypeEntry;
}

/// 组件模块
///
/// 静态声明的注册表片段，以静态变量本身作为模块的标识，名称只用于日志和诊断。
/// `injectable` 表示模块选择参与模块提供者的过滤扫描。
pub struct ComponentModule {
    name: &'static str,
    injectable: bool,
    types: fn() -> Vec<TypeEntry>,
}

impl ComponentModule {
    /// 创建模块，通常由 [`component_module!`] 生成
    pub const fn new(name: &'static str, injectable: bool, types: fn() -> Vec<TypeEntry>) -> Self {
        Self {
            name,
            injectable,
            types,
        }
    }

    /// 模块名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 是否参与过滤扫描
    pub fn is_injectable(&self) -> bool {
        self.injectable
    }

    /// 模块中的全部类型条目
    pub fn types(&self) -> Vec<TypeEntry> {
        (self.types)()
    }
}

impl fmt::Debug for ComponentModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentModule")
            .field("name", &self.name)
            .field("injectable", &self.injectable)
            .finish_non_exhaustive()
    }
}

/// 属于某个组件模块的类型，由 [`component_module!`] 实现
pub trait ModuleMember {
    /// 类型所在的模块
    fn module() -> &'static ComponentModule;
}

/// 声明组件模块
///
/// 生成一个 [`ComponentModule`] 静态变量，并为列出的每个类型实现 [`ModuleMember`]。
/// 列出的类型必须实现 [`Annotated`]。
///
/// ```ignore
/// component_module! {
///     pub static ASSEMBLY_A: "assembly_a", injectable = true => [ClassA1, ClassA2];
/// }
/// ```
#[macro_export]
macro_rules! component_module {
    ($(#[$meta:meta])* $vis:vis static $name:ident : $module_name:literal => [$($ty:ty),* $(,)?];) => {
        $crate::component_module! {
            $(#[$meta])* $vis static $name: $module_name, injectable = false => [$($ty),*];
        }
    };
    ($(#[$meta:meta])* $vis:vis static $name:ident : $module_name:literal, injectable = $injectable:literal => [$($ty:ty),* $(,)?];) => {
        $(#[$meta])*
        $vis static $name: $crate::ComponentModule = $crate::ComponentModule::new($module_name, $injectable, {
            fn types() -> ::std::vec::Vec<$crate::TypeEntry> {
                ::std::vec![$(<$ty as $crate::Annotated>::type_entry()),*]
            }
            types
        });

        $(
            impl $crate::ModuleMember for $ty {
                fn module() -> &'static $crate::ComponentModule {
                    &$name
                }
            }
        )*
    };
}

/// 代表类型：用一个类型指代它所在的模块
#[derive(Debug, Clone, Copy)]
pub struct Representative {
    type_info: TypeInfo,
    module: &'static ComponentModule,
}

impl Representative {
    /// 以类型 `T` 代表它所在的模块
    pub fn of<T: ModuleMember + ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            module: T::module(),
        }
    }

    /// 代表类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 所在模块
    pub fn module(&self) -> &'static ComponentModule {
        self.module
    }
}

/// 模块提供者
///
/// 替代进程内全局的模块枚举，返回 `None` 等价于没有模块。
pub trait ModuleProvider {
    /// 可供扫描的模块
    fn modules(&self) -> Option<Vec<&'static ComponentModule>>;
}

/// 显式传入的模块目录
#[derive(Debug, Clone, Default)]
pub struct StaticModuleProvider {
    modules: Vec<&'static ComponentModule>,
}

impl StaticModuleProvider {
    /// 创建模块目录
    pub fn new(modules: Vec<&'static ComponentModule>) -> Self {
        Self { modules }
    }

    /// 追加模块
    pub fn with_module(mut self, module: &'static ComponentModule) -> Self {
        self.modules.push(module);
        self
    }
}

impl ModuleProvider for StaticModuleProvider {
    fn modules(&self) -> Option<Vec<&'static ComponentModule>> {
        Some(self.modules.clone())
    }
}

/// 待扫描类型的来源
#[derive(Clone, Copy)]
pub enum ModuleSource<'a> {
    /// 代表类型所在的模块
    Representatives(&'a [Representative]),
    /// 显式列出的模块
    Modules(&'a [&'static ComponentModule]),
    /// 模块提供者给出的模块，可只保留参与过滤扫描的模块
    Provider {
        provider: &'a dyn ModuleProvider,
        filter_to_injectable: bool,
    },
}

impl<'a> ModuleSource<'a> {
    /// 模块提供者来源，只保留参与过滤扫描的模块
    pub fn provider(provider: &'a dyn ModuleProvider) -> Self {
        Self::Provider {
            provider,
            filter_to_injectable: true,
        }
    }

    /// 按模块实例去重后的模块列表（保留首次出现的顺序）
    ///
    /// 同名的不同模块各自保留。
    pub fn modules(&self) -> Vec<&'static ComponentModule> {
        let candidates: Vec<&'static ComponentModule> = match *self {
            Self::Representatives(representatives) => {
                representatives.iter().map(Representative::module).collect()
            }
            Self::Modules(modules) => modules.to_vec(),
            Self::Provider {
                provider,
                filter_to_injectable,
            } => match provider.modules() {
                Some(modules) => modules
                    .into_iter()
                    .filter(|module| !filter_to_injectable || module.is_injectable())
                    .collect(),
                None => {
                    warn!("模块提供者没有返回任何模块");
                    Vec::new()
                }
            },
        };

        let mut unique: Vec<&'static ComponentModule> = Vec::with_capacity(candidates.len());
        for module in candidates {
            if !unique.iter().any(|seen| ptr::eq(*seen, module)) {
                unique.push(module);
            }
        }
        unique
    }

    /// 去重后的类型条目列表（保留首次出现的顺序）
    pub fn types(&self) -> Vec<TypeEntry> {
        let modules = self.modules();
        let mut seen: HashSet<TypeId> = HashSet::new();
        let entries: Vec<TypeEntry> = modules
            .iter()
            .flat_map(|module| module.types())
            .filter(|entry| seen.insert(entry.type_info().id))
            .collect();

        debug!("模块来源解析完成: {} 个模块, {} 个类型", modules.len(), entries.len());
        entries
    }
}

impl fmt::Debug for ModuleSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Representatives(representatives) => {
                f.debug_tuple("Representatives").field(representatives).finish()
            }
            Self::Modules(modules) => f.debug_tuple("Modules").field(modules).finish(),
            Self::Provider {
                filter_to_injectable,
                ..
            } => f
                .debug_struct("Provider")
                .field("filter_to_injectable", filter_to_injectable)
                .finish_non_exhaustive(),
        }
    }
}
