// ==========================================
// 退货建议分析系统 - 退货建议引擎
// ==========================================
// 职责: 对标准化表逐行判定，输出退货建议表
// 输入: NormalizedTable + 计算类型
// 输出: RecommendationTable（与输入行序一致）
// ==========================================

use crate::config::EngineConfig;
use crate::domain::inventory::NormalizedTable;
use crate::domain::recommendation::{RecommendationRecord, RecommendationTable};
use crate::domain::types::{CalculationType, RuleType};
use crate::engine::percentile::PercentileIndex;
use crate::engine::recommendation_core::{RecommendationCore, RuleDecision};
use tracing::instrument;

// ==========================================
// RecommendationEngine - 退货建议引擎
// ==========================================
// 红线: 不修改输入表; 每次调用重新构建分位数索引
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 生成退货建议
    #[instrument(skip(self, table), fields(rows = table.len(), mode = %mode))]
    pub fn recommend(&self, table: &NormalizedTable, mode: CalculationType) -> RecommendationTable {
        // ND 规则不依赖分位数，仅在需要 RF 时构建索引
        let index = if mode.permits_rf() {
            PercentileIndex::build(table, self.config.top_seller_percentile)
        } else {
            PercentileIndex::default()
        };

        let mut records: Vec<RecommendationRecord> = Vec::new();
        let mut skipped = 0usize;

        for record in table {
            let threshold = index.threshold(&record.article_id);
            match RecommendationCore::evaluate(record, threshold, mode, &self.config) {
                RuleDecision::Recommend(rec) => records.push(rec),
                RuleDecision::Skip(reason) => {
                    skipped += 1;
                    tracing::debug!(
                        row = record.row_number,
                        article = %record.article_id,
                        site = %record.site,
                        reason = %reason,
                        "未生成退货建议"
                    );
                }
            }
        }

        let result = RecommendationTable::new(records);
        tracing::info!(
            recommendations = result.len(),
            nd = result.count_by_rule(RuleType::Nd),
            rf = result.count_by_rule(RuleType::Rf),
            total_qty = result.total_return_qty(),
            skipped,
            "退货建议生成完成"
        );
        result
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
