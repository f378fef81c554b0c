//! `#[derive(Activate)]` 实现
//!
//! 字段按类型从解析器获取：
//!
//! - `Arc<T>` - 必需服务
//! - `Option<Arc<T>>` - 可选服务
//! - `Vec<Arc<T>>` - 全部实现
//! - `Options<T>` - 已绑定的选项
//!
//! 其余字段以及标注 `#[activate(default)]` 的字段使用 `Default::default()`。

use crate::utils::{extract_generic_type, field_has_flag, type_ident_is};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Result, Type};

/// 字段的注入方式
#[derive(Debug, PartialEq, Eq)]
pub enum FieldInjection<'a> {
    Required(&'a Type),
    Optional(&'a Type),
    All(&'a Type),
    Options(&'a Type),
    Default,
}

impl<'a> FieldInjection<'a> {
    pub fn of(field: &'a Field) -> Result<Self> {
        if field_has_flag(field, "activate", "default")? {
            return Ok(Self::Default);
        }
        Ok(Self::classify(&field.ty))
    }

    fn classify(ty: &'a Type) -> Self {
        if type_ident_is(ty, "Arc") {
            if let Some(inner) = extract_generic_type(ty) {
                return Self::Required(inner);
            }
        }
        if type_ident_is(ty, "Option") || type_ident_is(ty, "Vec") {
            let service = extract_generic_type(ty)
                .filter(|inner| type_ident_is(inner, "Arc"))
                .and_then(extract_generic_type);
            if let Some(service) = service {
                return if type_ident_is(ty, "Option") {
                    Self::Optional(service)
                } else {
                    Self::All(service)
                };
            }
        }
        if type_ident_is(ty, "Options") {
            if let Some(inner) = extract_generic_type(ty) {
                return Self::Options(inner);
            }
        }
        Self::Default
    }

    fn to_tokens(&self) -> TokenStream {
        match self {
            Self::Required(ty) => quote! { resolver.get_required_service::<#ty>()? },
            Self::Optional(ty) => quote! { resolver.get_service::<#ty>()? },
            Self::All(ty) => quote! { resolver.get_services::<#ty>()? },
            Self::Options(ty) => quote! { resolver.get_options::<#ty>()? },
            Self::Default => quote! { ::std::default::Default::default() },
        }
    }
}

/// 生成 `Activate` 实现
pub fn derive_activate_impl(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "Activate 只能用于结构体"));
    };

    let construct = match &data.fields {
        Fields::Named(fields) => {
            let values = fields
                .named
                .iter()
                .map(|field| {
                    let name = &field.ident;
                    let value = FieldInjection::of(field)?.to_tokens();
                    Ok(quote! { #name: #value })
                })
                .collect::<Result<Vec<_>>>()?;
            quote! { Self { #(#values),* } }
        }
        Fields::Unnamed(fields) => {
            let values = fields
                .unnamed
                .iter()
                .map(|field| FieldInjection::of(field).map(|injection| injection.to_tokens()))
                .collect::<Result<Vec<_>>>()?;
            quote! { Self(#(#values),*) }
        }
        Fields::Unit => quote! { Self },
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Activate for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn activate(
                resolver: &dyn ::di_abstractions::ServiceResolver,
            ) -> ::std::result::Result<Self, ::di_abstractions::DependencyError> {
                #[allow(unused_imports)]
                use ::di_abstractions::ServiceResolverExt as _;
                ::std::result::Result::Ok(#construct)
            }
        }
    })
}
