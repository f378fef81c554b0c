//! 配置树抽象接口

use infrastructure_common::ConfigSection;
use serde_json::Value;

/// 层次化配置 trait
///
/// 路径大小写不敏感，`:` 与 `.` 均可作为分隔符。
pub trait Configuration: Send + Sync {
    /// 获取配置节，节不存在时返回 [`ConfigSection::missing`]
    fn get_section(&self, path: &str) -> ConfigSection;

    /// 获取配置值
    fn get_value(&self, key: &str) -> Option<Value> {
        self.get_section(key).value().cloned()
    }

    /// 检查配置键是否存在
    fn contains_key(&self, key: &str) -> bool {
        self.get_section(key).exists()
    }
}

impl Configuration for ConfigSection {
    fn get_section(&self, path: &str) -> ConfigSection {
        ConfigSection::get_section(self, path)
    }
}

impl<C: Configuration + ?Sized> Configuration for &C {
    fn get_section(&self, path: &str) -> ConfigSection {
        (**self).get_section(path)
    }
}

impl<C: Configuration + ?Sized> Configuration for std::sync::Arc<C> {
    fn get_section(&self, path: &str) -> ConfigSection {
        (**self).get_section(path)
    }
}
