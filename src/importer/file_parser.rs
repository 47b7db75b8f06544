// ==========================================
// 退货建议分析系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::inventory::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析（文件与内存数据共用）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut table = RawTable::new(headers);
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = table.headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            table.rows.push(row_map);
        }

        Ok(table)
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格转文本
    ///
    /// 整数值的浮点单元格按整数输出（Article 列常被 Excel 存为数字）
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", *f as i64)
            }
            other => other.to_string().trim().to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）；空工作表得到无表头的空表，由列校验报告缺失列
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(RawTable::new(Vec::new()));
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut table = RawTable::new(headers);
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = table.headers.get(col_idx) {
                    row_map.insert(header.clone(), Self::cell_to_string(cell));
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            table.rows.push(row_map);
        }

        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let table = match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path)?,
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(path)?,
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        tracing::info!(
            file = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "文件解析完成"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            "Article,OM,Site",
            "106545309001,Candy,H001",
            "106545309002,Hippo,H002",
        ]);

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(table.headers, vec!["Article", "OM", "Site"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("Article"), Some(&"106545309001".to_string()));
        assert_eq!(table.rows[1].get("OM"), Some(&"Hippo".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["Article,OM", "A1,Candy", ",", "A2,Hippo"]);

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_csv_parser_trims_headers_and_values() {
        let table = CsvParser
            .parse_reader(" Article , OM \n 123 , Candy \n".as_bytes())
            .unwrap();

        assert_eq!(table.headers, vec!["Article", "OM"]);
        assert_eq!(table.rows[0].get("Article"), Some(&"123".to_string()));
    }

    #[test]
    fn test_universal_parser_unsupported_extension() {
        let result = UniversalFileParser.parse("inventory.txt");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_excel_cell_whole_float_rendered_as_integer() {
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(106545309001.0)), "106545309001");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(ExcelParser::cell_to_string(&Data::Empty), "");
    }

    fn excel_fixture() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/inventory_sample.xlsx")
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let table = ExcelParser.parse_to_raw_table(&excel_fixture()).unwrap();

        assert_eq!(table.headers.len(), 10);
        assert_eq!(table.headers[0], "Article");
        assert_eq!(table.headers[9], "MTD Sold Qty");
        // 第 4 行为空行，应跳过
        assert_eq!(table.len(), 4);
        // 数字单元格中的 Article 不带小数
        assert_eq!(table.rows[0].get("Article"), Some(&"106545309001".to_string()));
        assert_eq!(table.rows[0].get("RP Type"), Some(&"ND".to_string()));
        assert_eq!(table.rows[3].get("SaSa Net Stock"), Some(&"20".to_string()));
    }

    #[test]
    fn test_excel_parser_file_not_found() {
        let result = ExcelParser.parse_to_raw_table(Path::new("non_existent.xlsx"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_excel_parser_rejects_corrupt_workbook() {
        let mut temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        temp_file.write_all(b"not a workbook").unwrap();
        temp_file.flush().unwrap();

        let result = ExcelParser.parse_to_raw_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_universal_parser_dispatches_xlsx() {
        let table = UniversalFileParser.parse(excel_fixture()).unwrap();
        assert_eq!(table.len(), 4);
    }
}
