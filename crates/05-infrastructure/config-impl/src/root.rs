//! 配置树

use config_abstractions::Configuration;
use infrastructure_common::{lookup, lowercase_keys, ConfigSection};
use serde_json::Value;

/// 构建完成的配置树
///
/// 所有键在构建时转换为小写，查找大小写不敏感。
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationRoot {
    tree: Value,
}

impl ConfigurationRoot {
    /// 从 JSON 值创建配置树
    pub fn new(tree: Value) -> Self {
        Self {
            tree: lowercase_keys(tree),
        }
    }

    /// 整个配置树
    pub fn tree(&self) -> &Value {
        &self.tree
    }
}

impl Default for ConfigurationRoot {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()))
    }
}

impl Configuration for ConfigurationRoot {
    fn get_section(&self, path: &str) -> ConfigSection {
        ConfigSection::new(path, lookup(&self.tree, path).cloned())
    }
}
