//! 配置节定义

use crate::errors::ConfigError;
use serde::Deserialize;
use serde_json::Value;

/// 配置路径分隔符，`:` 与 `.` 等价
pub const PATH_SEPARATORS: [char; 2] = [':', '.'];

/// 配置节
///
/// 配置树中以 `path` 为根的子树。子树不存在时 `value` 为 `None`，
/// 这不是错误，绑定时等价于一个空节。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigSection {
    /// 规范化后的路径（小写，`:` 分隔）
    path: String,
    /// 子树数据
    value: Option<Value>,
}

impl ConfigSection {
    /// 创建新的配置节
    pub fn new(path: &str, value: Option<Value>) -> Self {
        Self {
            path: normalize_path(path),
            value,
        }
    }

    /// 创建不存在的配置节
    pub fn missing(path: &str) -> Self {
        Self::new(path, None)
    }

    /// 配置节路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 配置节最后一段键名
    pub fn key(&self) -> &str {
        self.path.rsplit(':').next().unwrap_or(&self.path)
    }

    /// 配置节是否存在
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// 子树数据
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// 获取子配置节
    pub fn get_section(&self, path: &str) -> ConfigSection {
        let child_path = if self.path.is_empty() {
            path.to_string()
        } else {
            format!("{}:{}", self.path, path)
        };
        let value = self.value.as_ref().and_then(|root| lookup(root, path)).cloned();
        ConfigSection::new(&child_path, value)
    }

    /// 严格绑定到具体类型（不做字符串到数值的转换）
    pub fn bind<T>(&self) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = self.value.clone().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| ConfigError::SerializationError { source: e })
    }
}

/// 规范化配置路径：小写，统一使用 `:` 分隔，去掉空段
pub fn normalize_path(path: &str) -> String {
    path.split(PATH_SEPARATORS)
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(":")
}

/// 在配置树中按路径查找（大小写不敏感）
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split(PATH_SEPARATORS).filter(|s| !s.is_empty()) {
        let table = current.as_object()?;
        current = match table.get(segment) {
            Some(value) => value,
            None => table
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                .map(|(_, value)| value)?,
        };
    }
    Some(current)
}

/// 将配置树中所有对象的键转换为小写
pub fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
