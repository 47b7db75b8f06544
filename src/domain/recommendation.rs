// ==========================================
// 退货建议分析系统 - 退货建议领域模型
// ==========================================
// 不变量: 0 < return_qty <= 源记录 net_stock
// ==========================================

use crate::domain::types::{CalculationType, CheckStatus, QualityCheck, RuleType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// RecommendationRecord - 单条退货建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub article_id: String,
    pub product_desc: String,
    pub om: String,
    pub source_site: String,  // 转出店铺 (Transfer Site)
    pub receive_site: String, // 接收站点（固定中央仓）
    pub return_qty: u64,      // 退货件数 (Transfer Qty)
    pub rule_type: RuleType,
    pub priority: u8,
    pub remaining_stock: u64, // net_stock - return_qty
    pub notes: String,        // 规则来源 + 透传的标准化标注
}

// ==========================================
// RecommendationTable - 单次运行的建议集合
// ==========================================
// 顺序: 与输入行顺序一致
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable {
    records: Vec<RecommendationRecord>,
}

impl RecommendationTable {
    pub fn new(records: Vec<RecommendationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RecommendationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecommendationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_by_rule(&self, rule: RuleType) -> usize {
        self.records.iter().filter(|r| r.rule_type == rule).count()
    }

    /// 退货总件数（饱和累加）
    pub fn total_return_qty(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.return_qty))
    }
}

impl<'a> IntoIterator for &'a RecommendationTable {
    type Item = &'a RecommendationRecord;
    type IntoIter = std::slice::Iter<'a, RecommendationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ==========================================
// QualityFinding - 质检结论（仅提示，不阻断）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFinding {
    pub check: QualityCheck,
    pub status: CheckStatus,
    pub message: String,
}

impl QualityFinding {
    pub fn pass(check: QualityCheck, message: impl Into<String>) -> Self {
        Self {
            check,
            status: CheckStatus::Pass,
            message: message.into(),
        }
    }

    pub fn fail(check: QualityCheck, message: impl Into<String>) -> Self {
        Self {
            check,
            status: CheckStatus::Fail,
            message: message.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

// ==========================================
// RecommendationSummary - 统计摘要
// ==========================================
// BTreeMap 保证输出按键有序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_recommendations: usize,
    pub total_return_qty: u64,
    pub nd_count: usize,
    pub rf_count: usize,
    pub by_article: BTreeMap<String, ArticleStat>,
    pub by_om: BTreeMap<String, OmStat>,
    pub by_rule_type: BTreeMap<RuleType, RuleStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleStat {
    pub return_qty: u64,
    pub om_count: usize, // 涉及 OM 数量
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmStat {
    pub return_qty: u64,
    pub article_count: usize, // 涉及 Article 数量
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStat {
    pub count: usize,
    pub return_qty: u64,
}

// ==========================================
// AnalysisResult - 单次分析运行结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub calculation_type: CalculationType,
    pub input_rows: usize,
    pub recommendations: RecommendationTable,
    pub findings: Vec<QualityFinding>,
    pub summary: RecommendationSummary,
}

impl AnalysisResult {
    /// 是否所有质检项均通过
    pub fn all_checks_passed(&self) -> bool {
        self.findings.iter().all(QualityFinding::is_pass)
    }
}
