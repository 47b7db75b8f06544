// ==========================================
// 退货建议分析系统 - 退货规则纯函数库
// ==========================================
// 职责: 单行 ND / RF 规则判定
// 红线: 无状态、无副作用、无 I/O 操作
// 输出: RuleDecision（建议 或 跳过原因），跳过不是错误
// ==========================================

use crate::config::EngineConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::recommendation::RecommendationRecord;
use crate::domain::types::{CalculationType, RpType, RuleType};
use crate::engine::sales::record_effective_sold_qty;
use std::fmt;

pub const ND_RULE_NOTE: &str = "ND类型退仓 - 优先级1";
pub const RF_RULE_NOTE: &str = "RF类型过剩退仓 - 优先级2";
pub const ND_RECLASSIFY_ADVICE: &str = "该店铺仍有销售，建议买手考虑改为 RF 并设置安全库存";

// ==========================================
// 跳过原因
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// 计算类型不包含该规则
    FilteredOut { rule: RuleType },
    /// RP Type 不是 ND / RF
    UnmanagedRpType(String),
    /// ND 但无库存
    NoStock,
    /// 可用库存（现有 + 在途）未超过安全库存
    NoSurplus { total_available: u64, safety_stock: u64 },
    /// 属于该商品前 20% 高销量店铺
    TopSeller { sold: u64, threshold: f64 },
    /// 计算出的退货件数低于最少件数
    BelowMinimum { return_qty: u64, min_return_qty: u64 },
    /// 计算出的退货件数超过现有库存
    ExceedsNetStock { return_qty: u64, net_stock: u64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FilteredOut { rule } => write!(f, "FILTERED_OUT: rule={}", rule),
            SkipReason::UnmanagedRpType(v) => write!(f, "UNMANAGED_RP_TYPE: '{}'", v),
            SkipReason::NoStock => write!(f, "NO_STOCK: net_stock=0"),
            SkipReason::NoSurplus {
                total_available,
                safety_stock,
            } => write!(
                f,
                "NO_SURPLUS: total_available={} <= safety_stock={}",
                total_available, safety_stock
            ),
            SkipReason::TopSeller { sold, threshold } => {
                write!(f, "TOP_SELLER: sold={} >= threshold={:.2}", sold, threshold)
            }
            SkipReason::BelowMinimum {
                return_qty,
                min_return_qty,
            } => write!(
                f,
                "BELOW_MINIMUM: return_qty={} < {}",
                return_qty, min_return_qty
            ),
            SkipReason::ExceedsNetStock {
                return_qty,
                net_stock,
            } => write!(
                f,
                "EXCEEDS_NET_STOCK: return_qty={} > net_stock={}",
                return_qty, net_stock
            ),
        }
    }
}

// ==========================================
// 判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDecision {
    Recommend(RecommendationRecord),
    Skip(SkipReason),
}

impl RuleDecision {
    pub fn into_option(self) -> Option<RecommendationRecord> {
        match self {
            RuleDecision::Recommend(rec) => Some(rec),
            RuleDecision::Skip(_) => None,
        }
    }
}

// ==========================================
// RecommendationCore - 纯函数工具类
// ==========================================
pub struct RecommendationCore;

impl RecommendationCore {
    /// 单行判定（ND / RF 互斥，由 rp_type 决定）
    ///
    /// # 参数
    /// - record: 标准化库存记录
    /// - threshold: 该 Article 的高销量门槛（仅 RF 使用）
    /// - mode: 计算类型
    pub fn evaluate(
        record: &InventoryRecord,
        threshold: f64,
        mode: CalculationType,
        config: &EngineConfig,
    ) -> RuleDecision {
        match &record.rp_type {
            RpType::Nd => Self::evaluate_nd(record, mode, config),
            RpType::Rf => Self::evaluate_rf(record, threshold, mode, config),
            RpType::Other(v) => RuleDecision::Skip(SkipReason::UnmanagedRpType(v.clone())),
        }
    }

    /// ND 规则: 全部库存退仓
    ///
    /// # 规则
    /// 1. 计算类型包含 ND
    /// 2. net_stock > 0
    /// 3. return_qty = net_stock
    /// 4. 有效销量 > 0 时追加改类建议（仅提示）
    pub fn evaluate_nd(
        record: &InventoryRecord,
        mode: CalculationType,
        config: &EngineConfig,
    ) -> RuleDecision {
        if !mode.permits_nd() {
            return RuleDecision::Skip(SkipReason::FilteredOut { rule: RuleType::Nd });
        }
        if record.net_stock == 0 {
            return RuleDecision::Skip(SkipReason::NoStock);
        }

        let mut notes = vec![ND_RULE_NOTE.to_string()];
        if record_effective_sold_qty(record) > 0 {
            notes.push(ND_RECLASSIFY_ADVICE.to_string());
        }
        notes.extend(record.notes.iter().cloned());

        RuleDecision::Recommend(Self::build_record(
            record,
            RuleType::Nd,
            record.net_stock,
            notes,
            config,
        ))
    }

    /// RF 规则: 过剩部分退仓
    ///
    /// # 规则
    /// 1. 计算类型包含 RF
    /// 2. total_available = net_stock + pending_received > safety_stock
    /// 3. 有效销量 < 该商品 80 分位门槛（高销量店铺不动）
    /// 4. return_qty = min(total - safety, total - min_remaining)
    /// 5. min_return_qty <= return_qty <= net_stock，否则不出建议（不截断）
    pub fn evaluate_rf(
        record: &InventoryRecord,
        threshold: f64,
        mode: CalculationType,
        config: &EngineConfig,
    ) -> RuleDecision {
        if !mode.permits_rf() {
            return RuleDecision::Skip(SkipReason::FilteredOut { rule: RuleType::Rf });
        }

        let total_available = record.total_available();
        if total_available <= record.safety_stock {
            return RuleDecision::Skip(SkipReason::NoSurplus {
                total_available,
                safety_stock: record.safety_stock,
            });
        }

        let sold = record_effective_sold_qty(record);
        if (sold as f64) >= threshold {
            return RuleDecision::Skip(SkipReason::TopSeller { sold, threshold });
        }

        let min_remaining = Self::calculate_min_remaining(
            record.raw_last_month_sold,
            record.raw_mtd_sold,
            record.safety_stock,
            config,
        );
        let return_qty =
            Self::calculate_rf_return_qty(total_available, record.safety_stock, min_remaining);

        if return_qty < config.min_return_qty {
            return RuleDecision::Skip(SkipReason::BelowMinimum {
                return_qty,
                min_return_qty: config.min_return_qty,
            });
        }
        if return_qty > record.net_stock {
            return RuleDecision::Skip(SkipReason::ExceedsNetStock {
                return_qty,
                net_stock: record.net_stock,
            });
        }

        let mut notes = vec![RF_RULE_NOTE.to_string()];
        notes.extend(record.notes.iter().cloned());

        RuleDecision::Recommend(Self::build_record(
            record,
            RuleType::Rf,
            return_qty,
            notes,
            config,
        ))
    }

    /// 计算退货后最少保留库存
    ///
    /// # 规则
    /// - 上月销量 > 安全库存 或 本月至今销量 > 安全库存:
    ///   max(floor(safety * ratio), safety + active_extra)
    /// - 否则: safety + idle_extra
    ///
    /// 比较使用截断前的两个销量字段，不使用有效销量
    pub fn calculate_min_remaining(
        last_month_sold: u64,
        mtd_sold: u64,
        safety_stock: u64,
        config: &EngineConfig,
    ) -> u64 {
        if last_month_sold > safety_stock || mtd_sold > safety_stock {
            let scaled = (safety_stock as f64 * config.active_buffer_ratio).floor() as u64;
            scaled.max(safety_stock.saturating_add(config.active_buffer_extra))
        } else {
            safety_stock.saturating_add(config.idle_buffer_extra)
        }
    }

    /// 计算 RF 退货件数
    ///
    /// 可能为 0（保留量吃掉全部可用库存时），由调用方按最少件数拦截
    pub fn calculate_rf_return_qty(
        total_available: u64,
        safety_stock: u64,
        min_remaining: u64,
    ) -> u64 {
        let potential_return = total_available.saturating_sub(safety_stock);
        let max_return = total_available.saturating_sub(min_remaining);
        potential_return.min(max_return)
    }

    fn build_record(
        record: &InventoryRecord,
        rule_type: RuleType,
        return_qty: u64,
        notes: Vec<String>,
        config: &EngineConfig,
    ) -> RecommendationRecord {
        RecommendationRecord {
            article_id: record.article_id.clone(),
            product_desc: record.article_description.clone(),
            om: record.om.clone(),
            source_site: record.site.clone(),
            receive_site: config.receive_site.clone(),
            return_qty,
            rule_type,
            priority: rule_type.priority(),
            remaining_stock: record.net_stock - return_qty,
            notes: notes.join("; "),
        }
    }
}
