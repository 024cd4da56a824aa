use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub fixtures: FixtureConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// 模拟数据的随机种子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub seed: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// 模拟上传节奏 (毫秒)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub tick_ms: u64,
    pub step_percent: u8,
    pub complete_after_ms: u64,
    pub reset_after_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            step_percent: 5,
            complete_after_ms: 2000,
            reset_after_ms: 3000,
        }
    }
}

impl AppConfig {
    /// 加载顺序: 默认值 -> dashboard.toml (可选) -> 环境变量 DASHBOARD_SERVER__PORT 等
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("dashboard")
    }

    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("DASHBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// 上传节奏为 0 时定时器无法推进, 启动时直接拒绝
    fn validated(self) -> Result<Self, ConfigError> {
        if self.upload.tick_ms == 0 {
            return Err(ConfigError::Message(
                "upload.tick_ms must be greater than 0".to_string(),
            ));
        }
        if self.upload.step_percent == 0 {
            return Err(ConfigError::Message(
                "upload.step_percent must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }
}
