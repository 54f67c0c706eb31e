//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read TOML configuration files / 读取 TOML 配置文件
//! - Parse TOML into the ProvisioningConfig DTO / 将 TOML 解析为 ProvisioningConfig DTO
//! - Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! Defaults for missing sections live on the DTO itself, not here.

use anyhow::Context;
use std::path::PathBuf;
use mp_core::ProvisioningConfig;

/// Environment variable naming the config file when no argument is given.
pub const CONFIG_ENV_VAR: &str = "MP_CONFIG";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML or does not match the DTO (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<ProvisioningConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Picks the config path: first CLI argument, then `MP_CONFIG`.
pub fn resolve_config_path(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
    // Skip the binary name.
    let _ = args.next();
    args.next()
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}
