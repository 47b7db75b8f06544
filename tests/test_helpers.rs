// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供标准化库存记录构建器、原始表构建、临时 CSV 文件
// ==========================================

#![allow(dead_code)]

use std::io::Write;
use stock_return_advisor::domain::inventory::columns;
use stock_return_advisor::importer::CsvParser;
use stock_return_advisor::{InventoryRecord, NormalizedTable, RawTable, RpType};
use tempfile::NamedTempFile;

// ==========================================
// InventoryRecord 构建器
// ==========================================

pub struct InventoryRecordBuilder {
    record: InventoryRecord,
}

impl InventoryRecordBuilder {
    pub fn new(article_id: &str, site: &str) -> Self {
        Self {
            record: InventoryRecord {
                article_id: article_id.to_string(),
                article_description: format!("Product {}", article_id),
                product_hierarchy: None,
                om: "Candy".to_string(),
                site: site.to_string(),
                rp_type: RpType::Rf,
                net_stock: 0,
                pending_received: 0,
                safety_stock: 0,
                last_month_sold: 0,
                mtd_sold: 0,
                raw_last_month_sold: 0,
                raw_mtd_sold: 0,
                notes: Vec::new(),
                row_number: 1,
            },
        }
    }

    pub fn nd(mut self) -> Self {
        self.record.rp_type = RpType::Nd;
        self
    }

    pub fn rp_type(mut self, rp_type: &str) -> Self {
        self.record.rp_type = RpType::parse(rp_type);
        self
    }

    pub fn om(mut self, om: &str) -> Self {
        self.record.om = om.to_string();
        self
    }

    pub fn stock(mut self, net_stock: u64, pending_received: u64, safety_stock: u64) -> Self {
        self.record.net_stock = net_stock;
        self.record.pending_received = pending_received;
        self.record.safety_stock = safety_stock;
        self
    }

    pub fn sold(mut self, last_month_sold: u64, mtd_sold: u64) -> Self {
        self.record.last_month_sold = last_month_sold;
        self.record.mtd_sold = mtd_sold;
        self.record.raw_last_month_sold = last_month_sold;
        self.record.raw_mtd_sold = mtd_sold;
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.record.notes.push(note.to_string());
        self
    }

    pub fn row(mut self, row_number: usize) -> Self {
        self.record.row_number = row_number;
        self
    }

    pub fn build(self) -> InventoryRecord {
        self.record
    }
}

/// 由记录列表构建标准化表（自动编号行号）
pub fn normalized_table(records: Vec<InventoryRecord>) -> NormalizedTable {
    NormalizedTable::new(
        records
            .into_iter()
            .enumerate()
            .map(|(idx, mut r)| {
                r.row_number = idx + 1;
                r
            })
            .collect(),
    )
}

// ==========================================
// 原始表构建
// ==========================================

/// 含全部必需列的空原始表
pub fn raw_table() -> RawTable {
    RawTable::new(columns::REQUIRED.iter().map(|c| c.to_string()).collect())
}

/// 追加一行（按 REQUIRED 列顺序给值）
pub fn push_raw_row(table: &mut RawTable, values: [&str; 10]) {
    table.push_row(columns::REQUIRED.iter().copied().zip(values));
}

/// 原始示例数据: 两个 Article，四家店铺
///
/// - H001: ND，库存 10
/// - H002: RF，同品高销量
/// - H003: RF，低销量过剩
/// - H004: RF，同品高销量
pub fn sample_raw_table() -> RawTable {
    CsvParser
        .parse_reader(sample_csv().as_bytes())
        .expect("样例数据解析失败")
}

/// 样例 CSV 文本（与 sample_raw_table 同数据）
pub fn sample_csv() -> String {
    let mut lines = vec![columns::REQUIRED.join(",")];
    lines.push("106545309001,Test Product 1,Candy,ND,H001,10,0,5,0,0".to_string());
    lines.push("106545309001,Test Product 1,Candy,RF,H002,15,3,8,2,1".to_string());
    lines.push("106545309002,Test Product 2,Hippo,RF,H003,8,2,4,1,1".to_string());
    lines.push("106545309002,Test Product 2,Hippo,RF,H004,20,5,10,8,4".to_string());
    lines.join("\n")
}

/// 写入临时 CSV 文件（需要保持存活）
pub fn write_temp_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file.flush().expect("刷新临时文件失败");
    file
}
