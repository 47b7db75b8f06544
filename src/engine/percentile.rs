// ==========================================
// 退货建议分析系统 - 销量分位数计算
// ==========================================
// 口径: 线性插值分位数 (rank = p/100 * (n-1))
// 无同品数据 → +∞（高销量保护永不触发）
// ==========================================

use crate::domain::inventory::NormalizedTable;
use crate::engine::sales::record_effective_sold_qty;
use std::collections::HashMap;

/// 线性插值分位数
///
/// `sorted` 必须升序；空切片返回 +∞
pub fn percentile_linear(sorted: &[u64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => f64::INFINITY,
        1 => sorted[0] as f64,
        n => {
            let rank = (percentile.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let lo = sorted[lower] as f64;
            let hi = sorted[upper] as f64;
            lo + (hi - lo) * (rank - lower as f64)
        }
    }
}

// ==========================================
// PercentileIndex - 按 Article 分组的有效销量索引
// ==========================================
// 每次运行构建一次（O(n) 分组 + 组内排序），不跨运行缓存
#[derive(Debug, Clone, Default)]
pub struct PercentileIndex {
    groups: HashMap<String, Vec<u64>>,
    percentile: f64,
}

impl PercentileIndex {
    pub fn build(table: &NormalizedTable, percentile: f64) -> Self {
        let mut groups: HashMap<String, Vec<u64>> = HashMap::new();
        for record in table {
            groups
                .entry(record.article_id.clone())
                .or_default()
                .push(record_effective_sold_qty(record));
        }
        for values in groups.values_mut() {
            values.sort_unstable();
        }

        tracing::debug!(articles = groups.len(), percentile, "分位数索引构建完成");
        Self { groups, percentile }
    }

    /// 该 Article 的高销量门槛
    pub fn threshold(&self, article_id: &str) -> f64 {
        self.groups
            .get(article_id)
            .map(|values| percentile_linear(values, self.percentile))
            .unwrap_or(f64::INFINITY)
    }
}

/// 单次查询：扫描整表计算某 Article 的 80 分位门槛
pub fn top_seller_threshold(table: &NormalizedTable, article_id: &str, percentile: f64) -> f64 {
    let mut values: Vec<u64> = table
        .iter()
        .filter(|r| r.article_id == article_id)
        .map(record_effective_sold_qty)
        .collect();
    values.sort_unstable();
    percentile_linear(&values, percentile)
}
