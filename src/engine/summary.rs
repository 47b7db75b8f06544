// ==========================================
// 退货建议分析系统 - 统计摘要
// ==========================================
// 职责: KPI 汇总 + 按 Article / OM / 规则类型 统计
// ==========================================

use crate::domain::recommendation::{
    ArticleStat, OmStat, RecommendationSummary, RecommendationTable, RuleStat,
};
use crate::domain::types::RuleType;
use std::collections::{BTreeMap, BTreeSet};

pub struct SummaryBuilder;

impl SummaryBuilder {
    pub fn summarize(recommendations: &RecommendationTable) -> RecommendationSummary {
        let mut article_oms: BTreeMap<&str, (u64, BTreeSet<&str>)> = BTreeMap::new();
        let mut om_articles: BTreeMap<&str, (u64, BTreeSet<&str>)> = BTreeMap::new();
        let mut by_rule_type: BTreeMap<RuleType, RuleStat> = BTreeMap::new();

        for rec in recommendations {
            let article = article_oms.entry(rec.article_id.as_str()).or_default();
            article.0 = article.0.saturating_add(rec.return_qty);
            article.1.insert(rec.om.as_str());

            let om = om_articles.entry(rec.om.as_str()).or_default();
            om.0 = om.0.saturating_add(rec.return_qty);
            om.1.insert(rec.article_id.as_str());

            let rule = by_rule_type.entry(rec.rule_type).or_default();
            rule.count += 1;
            rule.return_qty = rule.return_qty.saturating_add(rec.return_qty);
        }

        RecommendationSummary {
            total_recommendations: recommendations.len(),
            total_return_qty: recommendations.total_return_qty(),
            nd_count: recommendations.count_by_rule(RuleType::Nd),
            rf_count: recommendations.count_by_rule(RuleType::Rf),
            by_article: article_oms
                .into_iter()
                .map(|(k, (qty, oms))| {
                    (
                        k.to_string(),
                        ArticleStat {
                            return_qty: qty,
                            om_count: oms.len(),
                        },
                    )
                })
                .collect(),
            by_om: om_articles
                .into_iter()
                .map(|(k, (qty, articles))| {
                    (
                        k.to_string(),
                        OmStat {
                            return_qty: qty,
                            article_count: articles.len(),
                        },
                    )
                })
                .collect(),
            by_rule_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::RecommendationRecord;

    fn rec(article: &str, om: &str, qty: u64, rule_type: RuleType) -> RecommendationRecord {
        RecommendationRecord {
            article_id: article.to_string(),
            product_desc: String::new(),
            om: om.to_string(),
            source_site: "H001".to_string(),
            receive_site: "D001".to_string(),
            return_qty: qty,
            rule_type,
            priority: rule_type.priority(),
            remaining_stock: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_summarize_groups() {
        let table = RecommendationTable::new(vec![
            rec("A1", "Candy", 10, RuleType::Nd),
            rec("A1", "Hippo", 4, RuleType::Rf),
            rec("A2", "Candy", 3, RuleType::Rf),
        ]);

        let summary = SummaryBuilder::summarize(&table);

        assert_eq!(summary.total_recommendations, 3);
        assert_eq!(summary.total_return_qty, 17);
        assert_eq!(summary.nd_count, 1);
        assert_eq!(summary.rf_count, 2);

        assert_eq!(summary.by_article["A1"], ArticleStat { return_qty: 14, om_count: 2 });
        assert_eq!(summary.by_om["Candy"], OmStat { return_qty: 13, article_count: 2 });
        assert_eq!(summary.by_rule_type[&RuleType::Rf], RuleStat { count: 2, return_qty: 7 });
    }

    #[test]
    fn test_summarize_saturates_on_huge_quantities() {
        let table = RecommendationTable::new(vec![
            rec("A1", "Candy", u64::MAX, RuleType::Nd),
            rec("A1", "Candy", u64::MAX, RuleType::Nd),
        ]);

        let summary = SummaryBuilder::summarize(&table);

        assert_eq!(summary.total_return_qty, u64::MAX);
        assert_eq!(summary.by_article["A1"].return_qty, u64::MAX);
        assert_eq!(summary.by_om["Candy"].return_qty, u64::MAX);
        assert_eq!(summary.by_rule_type[&RuleType::Nd].return_qty, u64::MAX);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = SummaryBuilder::summarize(&RecommendationTable::default());
        assert_eq!(summary, RecommendationSummary::default());
    }
}
