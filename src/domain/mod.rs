// ==========================================
// 退货建议分析系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod inventory;
pub mod recommendation;
pub mod types;

// 重导出核心类型
pub use inventory::{columns, InventoryRecord, NormalizedTable, RawInventoryRow, RawTable};
pub use recommendation::{
    AnalysisResult, ArticleStat, OmStat, QualityFinding, RecommendationRecord,
    RecommendationSummary, RecommendationTable, RuleStat,
};
pub use types::{CalculationType, CheckStatus, QualityCheck, RpType, RuleType};
