// ==========================================
// 退货建议分析系统 - 数据清洗器实现
// ==========================================
// 职责: Article 标准化 / TRIM / 安全整数转换
// 红线: 全函数，异常值就地兜底，不抛错
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner {
    article_id_width: usize, // Article 标准宽度
}

impl DataCleaner {
    pub fn new(article_id_width: usize) -> Self {
        Self { article_id_width }
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(12)
    }
}

impl DataCleanerTrait for DataCleaner {
    fn clean_article_id(&self, value: Option<&str>) -> String {
        let trimmed = match value {
            Some(v) => v.trim(),
            None => return String::new(),
        };

        // 去掉数值解析带来的小数部分（"106545309001.0" → "106545309001"）
        let integral = match trimmed.split_once('.') {
            Some((head, _)) => head,
            None => trimmed,
        };

        let all_digits = !integral.is_empty() && integral.chars().all(|c| c.is_ascii_digit());
        if all_digits && integral.len() <= self.article_id_width {
            format!("{:0>width$}", integral, width = self.article_id_width)
        } else {
            trimmed.to_string()
        }
    }

    fn clean_text(&self, value: Option<&str>) -> String {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    }

    fn clean_non_negative_int(&self, value: Option<&str>) -> u64 {
        let parsed = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            // as 转换对超大值饱和截断
            Some(n) if n.is_finite() && n > 0.0 => n.trunc() as u64,
            _ => 0,
        }
    }
}
