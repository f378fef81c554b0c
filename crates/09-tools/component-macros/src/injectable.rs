//! `#[derive(Injectable)]` 实现

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Expr, Ident, LitStr, Meta, Result, Type};

/// 服务生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceLifetime {
    Singleton,
    #[default]
    Scoped,
    Transient,
}

impl ServiceLifetime {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "singleton" => Some(Self::Singleton),
            "scoped" => Some(Self::Scoped),
            "transient" => Some(Self::Transient),
            _ => None,
        }
    }

    fn to_tokens(self) -> TokenStream {
        match self {
            Self::Singleton => quote! { ::di_abstractions::Lifetime::Singleton },
            Self::Scoped => quote! { ::di_abstractions::Lifetime::Scoped },
            Self::Transient => quote! { ::di_abstractions::Lifetime::Transient },
        }
    }
}

/// `#[injectable(...)]` 参数
#[derive(Default)]
pub struct InjectableArgs {
    pub target: Option<Type>,
    pub implementation: Option<Type>,
    pub lifetime: ServiceLifetime,
    pub sort_order: Option<Expr>,
    pub factory: Option<Type>,
}

impl InjectableArgs {
    /// 从属性解析参数，`#[injectable]` 不带括号时使用缺省值
    pub fn from_attribute(attr: &Attribute) -> Result<Self> {
        let mut args = Self::default();
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(args);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("target") {
                args.target = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("implementation") {
                args.implementation = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("factory") {
                args.factory = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("sort_order") {
                args.sort_order = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("lifetime") {
                let ident: Ident = meta.value()?.parse()?;
                args.lifetime = ServiceLifetime::from_ident(&ident).ok_or_else(|| {
                    syn::Error::new(ident.span(), "lifetime 只能是 singleton、scoped 或 transient")
                })?;
            } else if let Some(lifetime) = meta.path.get_ident().and_then(ServiceLifetime::from_ident) {
                args.lifetime = lifetime;
            } else {
                return Err(meta.error("未知的 injectable 参数"));
            }
            Ok(())
        })?;

        Ok(args)
    }

    fn to_marker(&self) -> TokenStream {
        let lifetime = self.lifetime.to_tokens();
        let mut marker = quote! {
            ::di_abstractions::InjectableMarker::new().with_lifetime(#lifetime)
        };

        if let Some(sort_order) = &self.sort_order {
            marker = quote! { #marker.with_sort_order(#sort_order) };
        }
        if let Some(target) = &self.target {
            marker = quote! { #marker.with_target::<#target>() };
        }
        if let Some(implementation) = &self.implementation {
            marker = quote! { #marker.with_implementation::<#implementation>() };
        }

        let target = self.target.as_ref().map_or_else(|| quote! { Self }, |t| quote! { #t });
        match &self.factory {
            // 带类型工厂的产出在这里转换为目标类型，不可赋值时编译失败
            Some(factory) => quote! {
                #marker.with_factory({
                    #[allow(unused_imports)]
                    use ::di_abstractions::{
                        ResolveFactoryCapability as _, ResolvePlainType as _, ResolveTypedFactory as _,
                    };
                    (&&&::di_abstractions::FactoryTag::<#factory>::new())
                        .factory_ref::<#target>(|output| output)
                })
            },
            None => {
                let implementation = self
                    .implementation
                    .as_ref()
                    .map_or_else(|| quote! { Self }, |t| quote! { #t });
                quote! {
                    #marker.with_activator(
                        ::di_abstractions::activator::<#implementation, #target>(|instance| instance)
                    )
                }
            }
        }
    }
}

/// `#[injectable_options(...)]` 参数
#[derive(Default)]
pub struct OptionsArgs {
    pub path: Option<LitStr>,
    pub implementation: Option<Type>,
}

impl OptionsArgs {
    pub fn from_attribute(attr: &Attribute) -> Result<Self> {
        let mut args = Self::default();
        if matches!(attr.meta, Meta::Path(_)) {
            return Ok(args);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                args.path = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("implementation") {
                args.implementation = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("未知的 injectable_options 参数"));
            }
            Ok(())
        })?;

        Ok(args)
    }

    fn to_marker(&self) -> TokenStream {
        let mut marker = quote! { ::di_abstractions::InjectableOptionsMarker::new() };
        if let Some(path) = &self.path {
            marker = quote! { #marker.with_path(#path) };
        }
        if let Some(implementation) = &self.implementation {
            marker = quote! { #marker.with_implementation::<#implementation>() };
        }
        marker
    }
}

/// 生成 `Annotated` 实现
pub fn derive_injectable_impl(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Injectable 不支持泛型类型，请为具体类型手工构造 TypeEntry",
        ));
    }

    let mut injectables = Vec::new();
    let mut options = Vec::new();
    for attr in &input.attrs {
        if attr.path().is_ident("injectable") {
            injectables.push(InjectableArgs::from_attribute(attr)?);
        } else if attr.path().is_ident("injectable_options") {
            options.push(OptionsArgs::from_attribute(attr)?);
        }
    }

    let name = &input.ident;
    let injectable_markers = injectables.iter().map(InjectableArgs::to_marker);
    let options_markers = options.iter().map(OptionsArgs::to_marker);
    let self_options = if options.iter().any(|o| o.implementation.is_none()) {
        quote! { .as_options::<Self>() }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl ::di_abstractions::Annotated for #name {
            fn type_entry() -> ::di_abstractions::TypeEntry {
                ::di_abstractions::TypeEntry::of::<Self>()
                    #self_options
                    #(.with_injectable(#injectable_markers))*
                    #(.with_options(#options_markers))*
            }
        }
    })
}
