// ==========================================
// 退货建议分析系统 - 字段映射器实现
// ==========================================
// 职责: 必需列校验 + 源字段 → RawInventoryRow
// ==========================================

use crate::domain::inventory::{columns, RawInventoryRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn validate_columns(&self, headers: &[String]) -> ImportResult<()> {
        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .filter(|required| !headers.iter().any(|h| h.trim() == **required))
            .map(|s| s.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            tracing::error!(missing = ?missing, "源表缺少必需列");
            Err(ImportError::MissingColumns(missing))
        }
    }

    fn map_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawInventoryRow {
        RawInventoryRow {
            article: self.get_string(row, columns::ARTICLE),
            article_description: self.get_string(row, columns::ARTICLE_DESCRIPTION),
            product_hierarchy: self.get_string(row, columns::PRODUCT_HIERARCHY),
            om: self.get_string(row, columns::OM),
            rp_type: self.get_string(row, columns::RP_TYPE),
            site: self.get_string(row, columns::SITE),
            net_stock: self.get_string(row, columns::NET_STOCK),
            pending_received: self.get_string(row, columns::PENDING_RECEIVED),
            safety_stock: self.get_string(row, columns::SAFETY_STOCK),
            last_month_sold: self.get_string(row, columns::LAST_MONTH_SOLD),
            mtd_sold: self.get_string(row, columns::MTD_SOLD),
            row_number,
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白 → None）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_headers() -> Vec<String> {
        columns::REQUIRED.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_columns_ok() {
        assert!(FieldMapper.validate_columns(&all_headers()).is_ok());
    }

    #[test]
    fn test_validate_columns_missing_lists_every_column() {
        let headers: Vec<String> = all_headers()
            .into_iter()
            .filter(|h| h != "OM" && h != "Safety Stock")
            .collect();

        match FieldMapper.validate_columns(&headers) {
            Err(ImportError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["OM".to_string(), "Safety Stock".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_product_hierarchy_is_optional() {
        let headers = all_headers();
        assert!(!headers.iter().any(|h| h == columns::PRODUCT_HIERARCHY));
        assert!(FieldMapper.validate_columns(&headers).is_ok());
    }

    #[test]
    fn test_map_row_trim_and_empty_as_none() {
        let mut row = HashMap::new();
        row.insert("Article".to_string(), "  106545309001  ".to_string());
        row.insert("OM".to_string(), "".to_string());
        row.insert("SaSa Net Stock".to_string(), "10".to_string());

        let raw = FieldMapper.map_row(&row, 3);

        assert_eq!(raw.article, Some("106545309001".to_string()));
        assert_eq!(raw.om, None);
        assert_eq!(raw.net_stock, Some("10".to_string()));
        assert_eq!(raw.site, None);
        assert_eq!(raw.row_number, 3);
    }
}
