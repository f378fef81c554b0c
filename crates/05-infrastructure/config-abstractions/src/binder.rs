//! 类型化配置绑定

use infrastructure_common::{ConfigError, ConfigSection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, error};

/// 可绑定的选项类型
///
/// 配置键与字段名的匹配不区分大小写并忽略 `_` 和 `-`，
/// `MaxConnections`、`maxconnections` 与 `max_connections` 视为同一个键。
pub trait OptionsType: Serialize + DeserializeOwned + Default + Send + Sync + 'static {}

impl<T> OptionsType for T where T: Serialize + DeserializeOwned + Default + Send + Sync + 'static {}

/// 将若干配置节依次叠加并绑定到选项类型
///
/// 以 `T::default()` 的序列化结果为底，按顺序叠加每个存在的配置节，后出现的键覆盖先出现的键。
/// 配置键按默认值中的字段名归一，不存在的配置节被跳过；一个配置节都没有时得到 `T::default()`。
/// 默认值为数值或布尔的字段接受字符串形式的配置值，环境变量中的 `"8"` 可以绑定到整数字段。
pub fn bind_sections<T: OptionsType>(sections: &[ConfigSection]) -> Result<T, ConfigError> {
    let type_name = std::any::type_name::<T>();
    debug!("绑定配置到类型: {} ({} 个配置节)", type_name, sections.len());

    let mut merged = serde_json::to_value(T::default()).map_err(|e| {
        error!("选项默认值序列化失败: type={}, error={}", type_name, e);
        ConfigError::from(e)
    })?;

    for section in sections {
        match section.value() {
            None | Some(Value::Null) => continue,
            Some(layer @ Value::Object(_)) => merge_layer(&mut merged, layer),
            Some(_) => {
                return Err(ConfigError::TypeConversionError {
                    message: format!("配置节 {} 不是表类型", section.path()),
                });
            }
        }
    }

    serde_json::from_value(merged).map_err(|e| {
        error!("配置绑定失败: type={}, error={}", type_name, e);
        ConfigError::from(e)
    })
}

/// 字段名归一：小写并去掉 `_` 与 `-`
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 把一层配置叠加到以默认值为形状的目标上
fn merge_layer(target: &mut Value, layer: &Value) {
    match (target, layer) {
        (Value::Object(fields), Value::Object(entries)) => {
            for (key, value) in entries {
                let field = matching_field(fields, key).unwrap_or_else(|| key.clone());
                match fields.get_mut(&field) {
                    Some(existing) => merge_layer(existing, value),
                    None => {
                        fields.insert(field, value.clone());
                    }
                }
            }
        }
        (target, layer) => {
            let value = coerce(target, layer);
            *target = value;
        }
    }
}

fn matching_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    if fields.contains_key(key) {
        return Some(key.to_string());
    }
    let normalized = normalize_key(key);
    fields.keys().find(|field| normalize_key(field) == normalized).cloned()
}

/// 按默认值的类型转换字符串形式的配置值，无法转换时原样保留
fn coerce(shape: &Value, value: &Value) -> Value {
    match (shape, value) {
        (Value::Number(number), Value::String(text)) => {
            let text = text.trim();
            let parsed = if number.is_f64() {
                text.parse::<f64>().ok().and_then(Number::from_f64)
            } else {
                text.parse::<i64>()
                    .map(Number::from)
                    .or_else(|_| text.parse::<u64>().map(Number::from))
                    .ok()
            };
            parsed.map_or_else(|| value.clone(), Value::Number)
        }
        (Value::Bool(_), Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => value.clone(),
        },
        (Value::String(_), Value::Number(number)) => Value::String(number.to_string()),
        (Value::String(_), Value::Bool(flag)) => Value::String(flag.to_string()),
        _ => value.clone(),
    }
}
