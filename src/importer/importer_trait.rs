// ==========================================
// 退货建议分析系统 - 导入管道 Trait
// ==========================================
// 职责: 定义文件解析 / 字段映射 / 数据清洗接口（不包含实现）
// ==========================================

use crate::domain::inventory::{RawInventoryRow, RawTable};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表（表头 + 行记录）
    ///
    /// # 返回
    /// - Ok(RawTable): 完全空白的行已跳过
    /// - Err: 文件不存在、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 列校验 + 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 校验必需列，缺失时返回 MissingColumns（列出全部缺失列）
    fn validate_columns(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行映射为 RawInventoryRow（空白 → None）
    fn map_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawInventoryRow;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单值清洗接口（阶段 2）
// 红线: 全部为全函数，不返回错误
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// Article 标准化（去小数部分，纯数字且不超宽则左补零）
    fn clean_article_id(&self, value: Option<&str>) -> String;

    /// 文本 TRIM（缺失 → 空串）
    fn clean_text(&self, value: Option<&str>) -> String;

    /// 非负整数（解析失败/负数 → 0，小数截断）
    fn clean_non_negative_int(&self, value: Option<&str>) -> u64;
}
