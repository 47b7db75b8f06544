// ==========================================
// 退货建议分析系统 - 质量检查
// ==========================================
// 职责: 对建议集做事后校验（一致性 / 正数 / 库存上限 / Article 格式）
// 红线: 仅输出结论，不修改、不拒绝数据
// ==========================================

use crate::domain::inventory::{InventoryRecord, NormalizedTable};
use crate::domain::recommendation::{QualityFinding, RecommendationTable};
use crate::domain::types::QualityCheck;
use std::collections::HashMap;
use tracing::instrument;

type SourceIndex<'a> = HashMap<(&'a str, &'a str), Vec<&'a InventoryRecord>>;

pub struct QualityVerifier {
    article_id_width: usize,
}

impl QualityVerifier {
    pub fn new(article_id_width: usize) -> Self {
        Self { article_id_width }
    }

    /// 执行全部质检项
    ///
    /// 空建议集直接返回单条通过结论
    #[instrument(skip_all, fields(recommendations = recommendations.len()))]
    pub fn verify(
        &self,
        recommendations: &RecommendationTable,
        source: &NormalizedTable,
    ) -> Vec<QualityFinding> {
        if recommendations.is_empty() {
            return vec![QualityFinding::pass(
                QualityCheck::NoRecommendations,
                "未生成退货建议",
            )];
        }

        let index = Self::index_source(source);
        let findings = vec![
            self.check_consistency(recommendations, &index),
            self.check_positive_quantity(recommendations),
            self.check_stock_bound(recommendations, &index),
            self.check_article_format(recommendations),
        ];

        for finding in findings.iter().filter(|f| !f.is_pass()) {
            tracing::warn!(check = %finding.check, message = %finding.message, "质量检查未通过");
        }
        findings
    }

    fn index_source(source: &NormalizedTable) -> SourceIndex<'_> {
        let mut index: SourceIndex<'_> = HashMap::new();
        for record in source {
            index
                .entry((record.article_id.as_str(), record.site.as_str()))
                .or_default()
                .push(record);
        }
        index
    }

    /// 检查 1: (Article, 转出店铺) 唯一对应一条源记录且 OM 一致
    fn check_consistency(
        &self,
        recommendations: &RecommendationTable,
        index: &SourceIndex<'_>,
    ) -> QualityFinding {
        for rec in recommendations {
            let matched = index
                .get(&(rec.article_id.as_str(), rec.source_site.as_str()))
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let consistent = matches!(matched, [only] if only.om == rec.om);
            if !consistent {
                return QualityFinding::fail(
                    QualityCheck::ArticleOmConsistency,
                    format!("Article {} 和 OM {} 不一致", rec.article_id, rec.om),
                );
            }
        }
        QualityFinding::pass(QualityCheck::ArticleOmConsistency, "Article 和 OM 一致性检查通过")
    }

    /// 检查 2: 退货数量为正
    fn check_positive_quantity(&self, recommendations: &RecommendationTable) -> QualityFinding {
        if recommendations.iter().all(|r| r.return_qty > 0) {
            QualityFinding::pass(QualityCheck::PositiveQuantity, "所有退货数量均为正整数")
        } else {
            QualityFinding::fail(QualityCheck::PositiveQuantity, "存在非正整数的退货数量")
        }
    }

    /// 检查 3: 退货数量不超过源记录库存（取首条匹配，无匹配跳过）
    fn check_stock_bound(
        &self,
        recommendations: &RecommendationTable,
        index: &SourceIndex<'_>,
    ) -> QualityFinding {
        let exceeded = recommendations.iter().find(|rec| {
            index
                .get(&(rec.article_id.as_str(), rec.source_site.as_str()))
                .and_then(|matched| matched.first())
                .map(|source| rec.return_qty > source.net_stock)
                .unwrap_or(false)
        });

        match exceeded {
            None => QualityFinding::pass(QualityCheck::StockBound, "退货数量不超过原库存"),
            Some(rec) => QualityFinding::fail(
                QualityCheck::StockBound,
                format!(
                    "存在退货数量超过原库存的情况: Article {} @ {}",
                    rec.article_id, rec.source_site
                ),
            ),
        }
    }

    /// 检查 4: Article 长度不超过标准宽度
    fn check_article_format(&self, recommendations: &RecommendationTable) -> QualityFinding {
        let malformed = recommendations
            .iter()
            .find(|r| r.article_id.chars().count() > self.article_id_width);

        match malformed {
            None => QualityFinding::pass(QualityCheck::ArticleFormat, "Article 格式正确"),
            Some(rec) => QualityFinding::fail(
                QualityCheck::ArticleFormat,
                format!("Article 格式异常: {}", rec.article_id),
            ),
        }
    }
}

impl Default for QualityVerifier {
    fn default() -> Self {
        Self::new(12)
    }
}
