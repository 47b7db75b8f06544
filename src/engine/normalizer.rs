// ==========================================
// 退货建议分析系统 - 数据标准化器
// ==========================================
// 职责: 原始表 → 标准化库存表（类型转换 / 截断 / 标注）
// 红线: 纯转换，不修改输入表；单元格异常不报错
// 致命错误: 仅缺少必需列
// ==========================================

use crate::config::EngineConfig;
use crate::domain::inventory::{
    columns, InventoryRecord, NormalizedTable, RawInventoryRow, RawTable,
};
use crate::domain::types::RpType;
use crate::importer::{
    DataCleaner, DataCleanerImpl, FieldMapper, FieldMapperImpl, ImportResult,
};
use tracing::instrument;

// ==========================================
// Normalizer - 数据标准化器
// ==========================================
pub struct Normalizer {
    mapper: FieldMapperImpl,
    cleaner: DataCleanerImpl,
    sales_cap: u64,
}

impl Normalizer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            mapper: FieldMapperImpl,
            cleaner: DataCleanerImpl::new(config.article_id_width),
            sales_cap: config.sales_cap,
        }
    }

    /// 标准化整张表
    ///
    /// # 返回
    /// - Ok(NormalizedTable): 行序与输入一致
    /// - Err(MissingColumns): 缺少必需列，整次运行失败
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn preprocess(&self, table: &RawTable) -> ImportResult<NormalizedTable> {
        self.mapper.validate_columns(&table.headers)?;

        let records: Vec<InventoryRecord> = table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.normalize_row(&self.mapper.map_row(row, idx + 1)))
            .collect();

        let clamped = records.iter().filter(|r| !r.notes.is_empty()).count();
        tracing::info!(
            rows = records.len(),
            annotated_rows = clamped,
            "数据标准化完成"
        );

        Ok(NormalizedTable::new(records))
    }

    /// 标准化单行（全函数）
    pub fn normalize_row(&self, raw: &RawInventoryRow) -> InventoryRecord {
        let c = &self.cleaner;
        let mut notes = Vec::new();

        let raw_last_month_sold = c.clean_non_negative_int(raw.last_month_sold.as_deref());
        let raw_mtd_sold = c.clean_non_negative_int(raw.mtd_sold.as_deref());

        let last_month_sold = self.guard_sales(
            raw_last_month_sold,
            columns::LAST_MONTH_SOLD,
            raw.row_number,
            &mut notes,
        );
        let mtd_sold = self.guard_sales(
            raw_mtd_sold,
            columns::MTD_SOLD,
            raw.row_number,
            &mut notes,
        );

        InventoryRecord {
            article_id: c.clean_article_id(raw.article.as_deref()),
            article_description: c.clean_text(raw.article_description.as_deref()),
            product_hierarchy: raw
                .product_hierarchy
                .as_deref()
                .map(|v| c.clean_text(Some(v))),
            om: c.clean_text(raw.om.as_deref()),
            site: c.clean_text(raw.site.as_deref()),
            rp_type: RpType::parse(&c.clean_text(raw.rp_type.as_deref())),
            net_stock: c.clean_non_negative_int(raw.net_stock.as_deref()),
            pending_received: c.clean_non_negative_int(raw.pending_received.as_deref()),
            safety_stock: c.clean_non_negative_int(raw.safety_stock.as_deref()),
            last_month_sold,
            mtd_sold,
            raw_last_month_sold,
            raw_mtd_sold,
            notes,
            row_number: raw.row_number,
        }
    }

    /// 销量范围校验：超出上限则截断并标注
    fn guard_sales(&self, value: u64, field: &str, row: usize, notes: &mut Vec<String>) -> u64 {
        if value > self.sales_cap {
            tracing::warn!(row, field, value, cap = self.sales_cap, "销量数据超出范围，已截断");
            notes.push(format!("{}销量数据超出范围", field));
            self.sales_cap
        } else {
            value
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(net: &str, last_month: &str, mtd: &str) -> RawInventoryRow {
        RawInventoryRow {
            article: Some("106545309001".to_string()),
            om: Some(" Candy ".to_string()),
            rp_type: Some(" RF ".to_string()),
            site: Some("H001".to_string()),
            net_stock: Some(net.to_string()),
            pending_received: Some("2".to_string()),
            safety_stock: Some("5".to_string()),
            last_month_sold: Some(last_month.to_string()),
            mtd_sold: Some(mtd.to_string()),
            row_number: 1,
            ..RawInventoryRow::default()
        }
    }

    #[test]
    fn test_normalize_row_basic() {
        let record = Normalizer::default().normalize_row(&raw("10", "3", "2"));

        assert_eq!(record.article_id, "106545309001");
        assert_eq!(record.om, "Candy");
        assert_eq!(record.rp_type, RpType::Rf);
        assert_eq!(record.net_stock, 10);
        assert_eq!(record.pending_received, 2);
        assert_eq!(record.last_month_sold, 3);
        assert!(record.notes.is_empty());
        assert_eq!(record.article_description, "");
        assert_eq!(record.product_hierarchy, None);
    }

    #[test]
    fn test_normalize_row_negative_and_garbage_become_zero() {
        let record = Normalizer::default().normalize_row(&raw("-4", "n/a", ""));

        assert_eq!(record.net_stock, 0);
        assert_eq!(record.last_month_sold, 0);
        assert_eq!(record.mtd_sold, 0);
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_normalize_row_sales_clamped_and_annotated() {
        let record = Normalizer::default().normalize_row(&raw("10", "250000", "100001"));

        assert_eq!(record.last_month_sold, 100_000);
        assert_eq!(record.mtd_sold, 100_000);
        assert_eq!(record.raw_last_month_sold, 250_000);
        assert_eq!(record.raw_mtd_sold, 100_001);
        assert_eq!(
            record.notes,
            vec![
                "Last Month Sold Qty销量数据超出范围".to_string(),
                "MTD Sold Qty销量数据超出范围".to_string(),
            ]
        );
        assert_eq!(
            record.notes_text(),
            "Last Month Sold Qty销量数据超出范围; MTD Sold Qty销量数据超出范围"
        );
    }

    #[test]
    fn test_normalize_row_cap_boundary_not_annotated() {
        let record = Normalizer::default().normalize_row(&raw("10", "100000", "0"));

        assert_eq!(record.last_month_sold, 100_000);
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_preprocess_missing_column_fails() {
        let table = RawTable::new(vec!["Article".to_string(), "OM".to_string()]);
        assert!(Normalizer::default().preprocess(&table).is_err());
    }
}
