// ==========================================
// 退货建议分析系统 - 结果导出
// ==========================================
// 职责: 建议表 → CSV; 分析结果 → JSON
// 说明: 只输出数据，不做样式（报表样式由外部报告生成器负责）
// ==========================================

use crate::domain::recommendation::{AnalysisResult, RecommendationTable};
use crate::importer::{ImportError, ImportResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 建议表 CSV 表头
pub const RECOMMENDATION_HEADERS: [&str; 9] = [
    "Article",
    "Product Desc",
    "OM",
    "Transfer Site",
    "Receive Site",
    "Transfer Qty",
    "Notes",
    "Priority",
    "Type",
];

/// 写出建议表 CSV
pub fn write_recommendations_csv<W: Write>(
    writer: W,
    recommendations: &RecommendationTable,
) -> ImportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(RECOMMENDATION_HEADERS)?;

    for rec in recommendations {
        csv_writer.write_record([
            rec.article_id.as_str(),
            rec.product_desc.as_str(),
            rec.om.as_str(),
            rec.source_site.as_str(),
            rec.receive_site.as_str(),
            &rec.return_qty.to_string(),
            rec.notes.as_str(),
            &rec.priority.to_string(),
            &rec.rule_type.to_string(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ImportError::ExportError(e.to_string()))
}

/// 写出分析结果 JSON（pretty）
pub fn write_result_json<W: Write>(writer: W, result: &AnalysisResult) -> ImportResult<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

/// 建议表写入文件
pub fn save_recommendations_csv<P: AsRef<Path>>(
    path: P,
    recommendations: &RecommendationTable,
) -> ImportResult<()> {
    let file = File::create(path.as_ref())?;
    write_recommendations_csv(BufWriter::new(file), recommendations)?;
    tracing::info!(path = %path.as_ref().display(), rows = recommendations.len(), "建议表已导出");
    Ok(())
}

/// 分析结果写入文件
pub fn save_result_json<P: AsRef<Path>>(path: P, result: &AnalysisResult) -> ImportResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_result_json(&mut writer, result)?;
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), "分析结果已导出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::RecommendationRecord;
    use crate::domain::types::RuleType;

    #[test]
    fn test_write_recommendations_csv() {
        let table = RecommendationTable::new(vec![RecommendationRecord {
            article_id: "106545309001".to_string(),
            product_desc: "Test Product 1".to_string(),
            om: "Candy".to_string(),
            source_site: "H001".to_string(),
            receive_site: "D001".to_string(),
            return_qty: 10,
            rule_type: RuleType::Nd,
            priority: 1,
            remaining_stock: 0,
            notes: "ND类型退仓 - 优先级1".to_string(),
        }]);

        let mut buffer = Vec::new();
        write_recommendations_csv(&mut buffer, &table).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Article,Product Desc,OM,Transfer Site,Receive Site,Transfer Qty,Notes,Priority,Type"
        );
        assert_eq!(
            lines[1],
            "106545309001,Test Product 1,Candy,H001,D001,10,ND类型退仓 - 优先级1,1,ND"
        );
    }

    #[test]
    fn test_write_empty_table_only_header() {
        let mut buffer = Vec::new();
        write_recommendations_csv(&mut buffer, &RecommendationTable::default()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
