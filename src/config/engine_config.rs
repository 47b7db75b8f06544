// ==========================================
// 退货建议分析系统 - 引擎配置
// ==========================================
// 职责: 规则阈值 / 接收站点 / 销量上限
// 来源: 默认值 < JSON 文件 < 环境变量指定的 JSON 文件
// ==========================================

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "STOCK_RETURN_ADVISOR_CONFIG";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 接收站点（中央仓）
    pub receive_site: String,

    /// 销量上限（超出截断并标注）
    pub sales_cap: u64,

    /// 高销量保护分位数（80 = 前 20% 店铺受保护）
    pub top_seller_percentile: f64,

    /// RF 最少退货件数
    pub min_return_qty: u64,

    /// Article 标准宽度（左补零）
    pub article_id_width: usize,

    /// 有销售时的保留系数: max(floor(ss * ratio), ss + extra)
    pub active_buffer_ratio: f64,
    pub active_buffer_extra: u64,

    /// 无明显销售时的保留量: ss + extra
    pub idle_buffer_extra: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            receive_site: "D001".to_string(),
            sales_cap: 100_000,
            top_seller_percentile: 80.0,
            min_return_qty: 2,
            article_id_width: 12,
            active_buffer_ratio: 1.25,
            active_buffer_extra: 2,
            idle_buffer_extra: 1,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        tracing::info!(path = %path.display(), "引擎配置已加载");
        Ok(config)
    }

    /// 读取环境变量指定的配置文件；未设置时返回默认配置
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.receive_site.trim().is_empty() {
            return Err(invalid("receive_site", "接收站点不能为空"));
        }
        if self.sales_cap == 0 {
            return Err(invalid("sales_cap", "销量上限必须大于 0"));
        }
        if !(0.0..=100.0).contains(&self.top_seller_percentile) {
            return Err(invalid(
                "top_seller_percentile",
                &format!("分位数需在 [0, 100] 内，实际 {}", self.top_seller_percentile),
            ));
        }
        if self.min_return_qty == 0 {
            return Err(invalid("min_return_qty", "最少退货件数必须大于 0"));
        }
        if self.article_id_width == 0 {
            return Err(invalid("article_id_width", "Article 宽度必须大于 0"));
        }
        if !self.active_buffer_ratio.is_finite() || self.active_buffer_ratio < 1.0 {
            return Err(invalid(
                "active_buffer_ratio",
                &format!("保留系数需 >= 1.0，实际 {}", self.active_buffer_ratio),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.receive_site, "D001");
        assert_eq!(config.sales_cap, 100_000);
        assert_eq!(config.min_return_qty, 2);
    }

    #[test]
    fn test_from_json_file_partial_override() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"receive_site": "D002", "min_return_qty": 3}}"#).unwrap();

        let config = EngineConfig::from_json_file(temp_file.path()).unwrap();

        assert_eq!(config.receive_site, "D002");
        assert_eq!(config.min_return_qty, 3);
        // 未指定字段取默认值
        assert_eq!(config.top_seller_percentile, 80.0);
    }

    #[test]
    fn test_from_json_file_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let result = EngineConfig::from_json_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentile() {
        let config = EngineConfig {
            top_seller_percentile: 120.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "top_seller_percentile"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_min_return() {
        let config = EngineConfig {
            min_return_qty: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
