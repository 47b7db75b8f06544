// ==========================================
// 退货建议分析系统 - 库存领域模型
// ==========================================
// 职责: 原始表 / 导入中间结构体 / 标准化库存记录
// 生命周期: 仅在单次分析运行内
// ==========================================

use crate::domain::types::RpType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 源表列名
// ==========================================
pub mod columns {
    pub const ARTICLE: &str = "Article";
    pub const ARTICLE_DESCRIPTION: &str = "Article Description";
    pub const OM: &str = "OM";
    pub const RP_TYPE: &str = "RP Type";
    pub const SITE: &str = "Site";
    pub const NET_STOCK: &str = "SaSa Net Stock";
    pub const PENDING_RECEIVED: &str = "Pending Received";
    pub const SAFETY_STOCK: &str = "Safety Stock";
    pub const LAST_MONTH_SOLD: &str = "Last Month Sold Qty";
    pub const MTD_SOLD: &str = "MTD Sold Qty";
    pub const PRODUCT_HIERARCHY: &str = "Product Hierarchy";

    /// 必需列（缺任一列则整次运行失败）
    pub const REQUIRED: [&str; 10] = [
        ARTICLE,
        ARTICLE_DESCRIPTION,
        OM,
        RP_TYPE,
        SITE,
        NET_STOCK,
        PENDING_RECEIVED,
        SAFETY_STOCK,
        LAST_MONTH_SOLD,
        MTD_SOLD,
    ];
}

// ==========================================
// RawTable - 文件解析结果
// ==========================================
// headers 保持源文件列顺序; rows 为 列名 -> 单元格文本
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 以列名/值对追加一行（测试与内存构表使用）
    pub fn push_row<K, V, I>(&mut self, cells: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let row = cells
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// RawInventoryRow - 导入中间结构体
// ==========================================
// 用途: 字段映射后的原始值（空白 → None），尚未做类型转换
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryRow {
    pub article: Option<String>,
    pub article_description: Option<String>,
    pub product_hierarchy: Option<String>,
    pub om: Option<String>,
    pub rp_type: Option<String>,
    pub site: Option<String>,
    pub net_stock: Option<String>,
    pub pending_received: Option<String>,
    pub safety_stock: Option<String>,
    pub last_month_sold: Option<String>,
    pub mtd_sold: Option<String>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// InventoryRecord - 标准化库存记录
// ==========================================
// 不变量: 所有整数字段 >= 0; 两个销量字段 <= 销量上限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    // ===== 标识 =====
    pub article_id: String, // 12 位左补零（非数字原样保留）
    pub article_description: String,
    pub product_hierarchy: Option<String>, // 可选列，原样透传
    pub om: String,
    pub site: String,
    pub rp_type: RpType,

    // ===== 库存 =====
    pub net_stock: u64,        // SaSa Net Stock
    pub pending_received: u64, // 在途
    pub safety_stock: u64,     // 安全库存

    // ===== 销量 =====
    pub last_month_sold: u64, // 上月销量
    pub mtd_sold: u64,        // 本月至今销量

    // 截断前的销量（RF 保留量分档使用）
    pub raw_last_month_sold: u64,
    pub raw_mtd_sold: u64,

    // ===== 标注 =====
    pub notes: Vec<String>, // 标准化过程中累积，只追加
    pub row_number: usize,
}

impl InventoryRecord {
    /// 标注文本（"; " 连接，空列表为空串）
    pub fn notes_text(&self) -> String {
        self.notes.join("; ")
    }

    pub fn total_available(&self) -> u64 {
        self.net_stock.saturating_add(self.pending_received)
    }
}

// ==========================================
// NormalizedTable - 标准化后的只读快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    records: Vec<InventoryRecord>,
}

impl NormalizedTable {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InventoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a NormalizedTable {
    type Item = &'a InventoryRecord;
    type IntoIter = std::slice::Iter<'a, InventoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
