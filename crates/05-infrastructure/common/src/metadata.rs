//! 元数据定义
//!
//! 提供类型的标识信息，作为注册表中"类型引用"的载体

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性与哈希只依据 [`TypeId`]。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（包含模块路径）
    pub full_name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 `dyn Trait` 等非 Sized 类型
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            full_name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（每个路径段都去掉模块前缀）
    ///
    /// `alloc::vec::Vec<app::Item>` 得到 `Vec<Item>`，`dyn app::IGreeting` 得到 `dyn IGreeting`。
    pub fn short_name(&self) -> String {
        short_type_name(self.full_name)
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

fn short_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    // 当前路径段在 result 中的起始位置
    let mut segment_start = 0;
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' && chars.peek() == Some(&':') {
            chars.next();
            result.truncate(segment_start);
            continue;
        }

        result.push(ch);
        if matches!(ch, '<' | '>' | ',' | ' ' | '&' | '(' | ')' | '[' | ']' | ';' | '*') {
            segment_start = result.len();
        }
    }

    result
}
