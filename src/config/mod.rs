// ==========================================
// 退货建议分析系统 - 配置层
// ==========================================
// 职责: 引擎阈值配置加载与校验
// 存储: 无持久化（JSON 文件 / 默认值）
// ==========================================

pub mod engine_config;

// 重导出核心配置
pub use engine_config::{ConfigError, EngineConfig, CONFIG_PATH_ENV};
