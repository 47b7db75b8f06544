// ==========================================
// 退货建议分析系统 - 有效销量估算
// ==========================================
// 规则: 上月销量 > 0 取上月销量，否则取本月至今销量
// ==========================================

use crate::domain::inventory::InventoryRecord;

/// 有效销量（优先使用最近完整周期）
pub fn effective_sold_qty(last_month_sold: u64, mtd_sold: u64) -> u64 {
    if last_month_sold > 0 {
        last_month_sold
    } else {
        mtd_sold
    }
}

/// 记录的有效销量
pub fn record_effective_sold_qty(record: &InventoryRecord) -> u64 {
    effective_sold_qty(record.last_month_sold, record.mtd_sold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_sold_qty_cases() {
        assert_eq!(effective_sold_qty(5, 3), 5);
        assert_eq!(effective_sold_qty(0, 8), 8);
        assert_eq!(effective_sold_qty(0, 0), 0);
    }

    #[test]
    fn test_effective_sold_qty_idempotent() {
        for (last_month, mtd) in [(5, 3), (0, 8), (0, 0), (7, 0)] {
            let once = effective_sold_qty(last_month, mtd);
            // 以结果作为上月销量再算一次，结果不变
            assert_eq!(effective_sold_qty(once, mtd), once);
        }
    }
}
