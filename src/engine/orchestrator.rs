// ==========================================
// 退货建议分析系统 - 分析编排器
// ==========================================
// 职责: 串联 标准化 → 建议生成 → 质量检查 → 统计摘要
// 红线: 单次运行只读输入表，输出全部为新对象
// ==========================================

use crate::config::EngineConfig;
use crate::domain::inventory::{NormalizedTable, RawTable};
use crate::domain::recommendation::{AnalysisResult, QualityFinding, RecommendationTable};
use crate::domain::types::CalculationType;
use crate::engine::normalizer::Normalizer;
use crate::engine::quality::QualityVerifier;
use crate::engine::recommendation::RecommendationEngine;
use crate::engine::summary::SummaryBuilder;
use crate::importer::ImportResult;
use crate::perf::PerfGuard;
use chrono::Utc;
use uuid::Uuid;

// ==========================================
// ReturnAnalysisOrchestrator - 分析编排器
// ==========================================
pub struct ReturnAnalysisOrchestrator {
    normalizer: Normalizer,
    engine: RecommendationEngine,
    verifier: QualityVerifier,
}

impl ReturnAnalysisOrchestrator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            normalizer: Normalizer::new(&config),
            verifier: QualityVerifier::new(config.article_id_width),
            engine: RecommendationEngine::new(config),
        }
    }

    /// 阶段 1: 标准化
    pub fn preprocess(&self, table: &RawTable) -> ImportResult<NormalizedTable> {
        let mut perf = PerfGuard::new("preprocess");
        perf.set_rows(table.len());
        self.normalizer.preprocess(table)
    }

    /// 阶段 2: 生成退货建议
    pub fn recommend(&self, table: &NormalizedTable, mode: CalculationType) -> RecommendationTable {
        let mut perf = PerfGuard::new("recommend");
        perf.set_rows(table.len());
        self.engine.recommend(table, mode)
    }

    /// 阶段 3: 质量检查
    pub fn verify(
        &self,
        recommendations: &RecommendationTable,
        source: &NormalizedTable,
    ) -> Vec<QualityFinding> {
        let mut perf = PerfGuard::new("verify");
        perf.set_rows(recommendations.len());
        self.verifier.verify(recommendations, source)
    }

    /// 完整运行
    ///
    /// # 返回
    /// - Ok(AnalysisResult)
    /// - Err: 仅缺少必需列
    pub fn run(&self, table: &RawTable, mode: CalculationType) -> ImportResult<AnalysisResult> {
        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, mode = %mode, rows = table.len(), "开始退货建议分析");

        let normalized = self.preprocess(table)?;
        let recommendations = self.recommend(&normalized, mode);
        let findings = self.verify(&recommendations, &normalized);
        let summary = SummaryBuilder::summarize(&recommendations);

        let result = AnalysisResult {
            run_id,
            generated_at: Utc::now(),
            calculation_type: mode,
            input_rows: normalized.len(),
            recommendations,
            findings,
            summary,
        };

        tracing::info!(
            %run_id,
            recommendations = result.summary.total_recommendations,
            total_qty = result.summary.total_return_qty,
            checks_passed = result.all_checks_passed(),
            "退货建议分析完成"
        );
        Ok(result)
    }
}

impl Default for ReturnAnalysisOrchestrator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
