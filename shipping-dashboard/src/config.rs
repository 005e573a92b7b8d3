use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use shipping_domain::status::StatusPolicy;
use shipping_domain::tracking::DEFAULT_TRACKING_PREFIX;
use shipping_domain::value_object::Carrier;
use std::net::SocketAddr;
use std::path::Path;

/// 配置文件名（不含扩展名）
pub const CONFIG_FILE: &str = "shipping-dashboard";

/// 环境变量前缀，例如 `SHIPPING_TRACKING__STATUS_POLICY=linear`
pub const ENV_PREFIX: &str = "SHIPPING";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub tracking: TrackingConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` 指令；设置了 `RUST_LOG` 时以其为准
    pub level: String,
    /// 输出 JSON 结构化日志
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub default_carrier: String,
    pub number_prefix: String,
    pub status_policy: StatusPolicy,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            default_carrier: Carrier::DEFAULT.to_string(),
            number_prefix: DEFAULT_TRACKING_PREFIX.to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl TrackingConfig {
    pub fn carrier(&self) -> Result<Carrier> {
        Carrier::parse(self.default_carrier.as_str()).context("invalid tracking.default_carrier")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 连接串；未设置时使用内存存储
    pub url: Option<String>,
    /// 连接时建表
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            auto_migrate: true,
        }
    }
}

impl DashboardConfig {
    /// 按优先级加载配置：
    /// 1. 默认值
    /// 2. 配置文件 `shipping-dashboard.toml`（存在时）
    /// 3. 以 `SHIPPING_` 为前缀的环境变量，层级用 `__` 分隔
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new(&format!("{CONFIG_FILE}.toml")).exists() {
            builder = builder.add_source(File::with_name(CONFIG_FILE));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// 从 TOML 文本加载，缺省字段取默认值
    pub fn from_toml(source: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// 存在 `.env` 时加载，返回是否加载
    pub fn load_env_file() -> Result<bool> {
        if !Path::new(".env").exists() {
            return Ok(false);
        }
        dotenvy::dotenv()?;
        Ok(true)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("invalid server.bind: {}", self.server.bind))
    }
}
