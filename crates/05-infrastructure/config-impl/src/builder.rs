//! 配置源构建器

use crate::root::ConfigurationRoot;
use config::{Environment, File, FileFormat};
use infrastructure_common::ConfigError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 环境变量层级分隔符，`APP__SERVER__PORT` 对应 `server:port`
pub const ENVIRONMENT_SEPARATOR: &str = "__";

/// 配置源
#[derive(Debug, Clone)]
enum Source {
    Inline { content: String, format: FileFormat },
    File { path: PathBuf, required: bool },
    Environment {
        prefix: String,
        vars: Option<HashMap<String, String>>,
    },
}

/// 配置构建器
///
/// 按添加顺序叠加配置源，后添加的源覆盖先添加的同名键。
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    sources: Vec<Source>,
}

impl ConfigurationBuilder {
    /// 创建空的配置构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 JSON 字符串配置源
    pub fn add_json_str(self, content: &str) -> Self {
        self.add_inline(content, FileFormat::Json)
    }

    /// 添加 TOML 字符串配置源
    pub fn add_toml_str(self, content: &str) -> Self {
        self.add_inline(content, FileFormat::Toml)
    }

    /// 添加 YAML 字符串配置源
    pub fn add_yaml_str(self, content: &str) -> Self {
        self.add_inline(content, FileFormat::Yaml)
    }

    fn add_inline(mut self, content: &str, format: FileFormat) -> Self {
        self.sources.push(Source::Inline {
            content: content.to_string(),
            format,
        });
        self
    }

    /// 添加配置文件，格式由扩展名决定
    pub fn add_file<P: AsRef<Path>>(mut self, path: P, required: bool) -> Self {
        self.sources.push(Source::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// 添加进程环境变量配置源
    ///
    /// 只读取以 `{prefix}_` 开头的变量，层级之间使用 `__` 分隔。
    pub fn add_environment(mut self, prefix: &str) -> Self {
        self.sources.push(Source::Environment {
            prefix: prefix.to_string(),
            vars: None,
        });
        self
    }

    /// 添加指定变量表作为环境变量配置源
    pub fn add_environment_vars(mut self, prefix: &str, vars: HashMap<String, String>) -> Self {
        self.sources.push(Source::Environment {
            prefix: prefix.to_string(),
            vars: Some(vars),
        });
        self
    }

    /// 构建配置树
    pub fn build(self) -> Result<ConfigurationRoot, ConfigError> {
        info!("构建配置树: {} 个配置源", self.sources.len());

        let mut builder = config::Config::builder();
        for source in self.sources {
            builder = match source {
                Source::Inline { content, format } => {
                    debug!("添加字符串配置源: {:?}", format);
                    builder.add_source(File::from_str(&content, format))
                }
                Source::File { path, required } => {
                    if required && !path.exists() {
                        return Err(ConfigError::FileNotFound {
                            path: path.display().to_string(),
                        });
                    }
                    debug!("添加配置文件: {} (required={})", path.display(), required);
                    builder.add_source(File::from(path).required(required))
                }
                Source::Environment { prefix, vars } => {
                    debug!("添加环境变量配置源: prefix={}", prefix);
                    builder.add_source(
                        Environment::with_prefix(&prefix)
                            .prefix_separator("_")
                            .separator(ENVIRONMENT_SEPARATOR)
                            .source(vars),
                    )
                }
            };
        }

        let settings = builder.build().map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        let tree = settings
            .try_deserialize::<serde_json::Value>()
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        Ok(ConfigurationRoot::new(tree))
    }
}
