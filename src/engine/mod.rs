// ==========================================
// 退货建议分析系统 - 引擎层
// ==========================================
// 职责: 标准化 / 有效销量 / 分位数 / 退货规则 / 质量检查
// 红线: 引擎不做文件 I/O, 所有跳过必须可追溯原因
// ==========================================

pub mod normalizer;
pub mod orchestrator;
pub mod percentile;
pub mod quality;
pub mod recommendation;
pub mod recommendation_core;
pub mod sales;
pub mod summary;

// 重导出核心引擎
pub use normalizer::Normalizer;
pub use orchestrator::ReturnAnalysisOrchestrator;
pub use percentile::{percentile_linear, top_seller_threshold, PercentileIndex};
pub use quality::QualityVerifier;
pub use recommendation::RecommendationEngine;
pub use recommendation_core::{RecommendationCore, RuleDecision, SkipReason};
pub use sales::{effective_sold_qty, record_effective_sold_qty};
pub use summary::SummaryBuilder;

use crate::config::EngineConfig;
use crate::domain::inventory::{NormalizedTable, RawTable};
use crate::domain::recommendation::{QualityFinding, RecommendationTable};
use crate::domain::types::CalculationType;
use crate::importer::ImportResult;

// ==========================================
// 默认配置下的引擎入口
// ==========================================

/// 原始表 → 标准化表（缺少必需列时失败）
pub fn preprocess(table: &RawTable) -> ImportResult<NormalizedTable> {
    Normalizer::default().preprocess(table)
}

/// 标准化表 → 退货建议表
pub fn recommend(table: &NormalizedTable, mode: CalculationType) -> RecommendationTable {
    RecommendationEngine::default().recommend(table, mode)
}

/// 退货建议表 + 标准化表 → 质检结论
pub fn verify(
    recommendations: &RecommendationTable,
    source: &NormalizedTable,
) -> Vec<QualityFinding> {
    QualityVerifier::new(EngineConfig::default().article_id_width)
        .verify(recommendations, source)
}
