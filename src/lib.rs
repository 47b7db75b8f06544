// ==========================================
// 退货建议分析系统 - 核心库
// ==========================================
// 输入: 门店库存快照 (Excel / CSV)
// 输出: 门店 → 中央仓 退货建议 + 质检结论 + 统计摘要
// 系统定位: 决策支持系统 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎阈值
pub mod config;

// 导出层 - CSV / JSON
pub mod export;

// 日志系统
pub mod logging;

// 阶段耗时统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CalculationType, CheckStatus, QualityCheck, RpType, RuleType};

// 领域实体
pub use domain::{
    AnalysisResult, InventoryRecord, NormalizedTable, QualityFinding, RawTable,
    RecommendationRecord, RecommendationSummary, RecommendationTable,
};

// 引擎
pub use engine::{
    preprocess, recommend, verify, Normalizer, PercentileIndex, QualityVerifier,
    RecommendationEngine, ReturnAnalysisOrchestrator, SummaryBuilder,
};

// 配置
pub use config::EngineConfig;

// API
pub use api::{AnalysisApi, ApiError, ApiResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "退货建议分析系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
