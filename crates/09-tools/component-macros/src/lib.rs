//! # Component Macros
//!
//! 这个 crate 提供了把注入注解转换为注册表条目的派生宏。
//! 生成的代码引用 `di_abstractions`，使用方需要依赖该 crate。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 生成 `Annotated` 实现（注册标记与选项标记）
//! - [`Activate`] - 生成 `Activate` 实现（从解析器获取依赖）
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::{Activate, Injectable};
//! use std::sync::Arc;
//!
//! pub trait IGreeting: Send + Sync {}
//!
//! #[derive(Injectable, Activate)]
//! #[injectable(lifetime = singleton)]
//! #[injectable(target = dyn IGreeting, lifetime = transient, sort_order = 1)]
//! pub struct Greeting {
//!     clock: Arc<Clock>,
//! }
//!
//! impl IGreeting for Greeting {}
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod activate;
mod injectable;
mod utils;

/// 注入标记派生宏
///
/// 为类型实现 `di_abstractions::Annotated`，每个属性对应一个标记，可以重复出现。
///
/// # `#[injectable(...)]` 参数
///
/// - `target = Type` - 目标服务类型（默认为自身）
/// - `implementation = Type` - 实现类型（默认为自身）
/// - `lifetime = singleton | scoped | transient` - 生命周期（默认 scoped），也可直接写 `singleton`
/// - `sort_order = N` - 处理顺序（默认为 0）
/// - `factory = Type` - 注入工厂类型，指定后忽略实现类型
///
/// 带类型工厂（`TypedInjectableFactory`）的产出类型必须可以赋值给目标类型，否则编译失败；
/// 不具备工厂能力的类型可以通过编译，在扫描时报告 `InvalidFactory`。
///
/// 非工厂标记要求实现类型实现 `Activate`，并且 `Arc<实现>` 可以转换为 `Arc<目标>`。
///
/// # `#[injectable_options(...)]` 参数
///
/// - `path = "a:b:c"` - 配置路径（默认为选项类型的名称）
/// - `implementation = Type` - 选项类型（默认为自身）
///
/// # 示例
///
/// ```ignore
/// #[derive(Injectable, Serialize, Deserialize, Default)]
/// #[injectable_options(path = "My:Test:Options")]
/// pub struct TestOptions3 {
///     pub number: i32,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(injectable, injectable_options))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 激活派生宏
///
/// 为结构体实现 `di_abstractions::Activate`。
///
/// # 示例
///
/// ```ignore
/// #[derive(Activate)]
/// pub struct Consumer {
///     greeting: Arc<dyn IGreeting>,
///     settings: Options<Settings>,
///     #[activate(default)]
///     buffer: Arc<Mutex<Vec<u8>>>,
/// }
/// ```
#[proc_macro_derive(Activate, attributes(activate))]
pub fn derive_activate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    activate::derive_activate_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
