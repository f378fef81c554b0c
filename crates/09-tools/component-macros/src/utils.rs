//! 宏工具函数

use syn::{Field, GenericArgument, PathArguments, Result, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// 检查类型路径的最后一段是否为指定名称
pub fn type_ident_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == name),
        _ => false,
    }
}

/// 检查字段是否带有 `#[attr_name(flag)]`
///
/// 同名属性中出现其他参数时报错。
pub fn field_has_flag(field: &Field, attr_name: &str, flag: &str) -> Result<bool> {
    let mut found = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(attr_name)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
                Ok(())
            } else {
                Err(meta.error(format!("未知的 {} 参数", attr_name)))
            }
        })?;
    }
    Ok(found)
}
