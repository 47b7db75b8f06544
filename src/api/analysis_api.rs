// ==========================================
// 退货建议分析系统 - 分析 API
// ==========================================
// 职责: 文件 → 原始表 → 完整分析运行 → 结果导出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::inventory::RawTable;
use crate::domain::recommendation::AnalysisResult;
use crate::domain::types::CalculationType;
use crate::engine::ReturnAnalysisOrchestrator;
use crate::export;
use crate::importer::UniversalFileParser;
use std::path::Path;
use std::str::FromStr;

// ==========================================
// AnalysisApi - 分析 API
// ==========================================

/// 分析API
///
/// 职责：
/// 1. 读取 Excel/CSV 库存文件
/// 2. 执行 标准化 → 建议 → 质检 → 摘要
/// 3. 导出建议表 CSV / 结果 JSON
pub struct AnalysisApi {
    parser: UniversalFileParser,
    orchestrator: ReturnAnalysisOrchestrator,
}

impl AnalysisApi {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            parser: UniversalFileParser,
            orchestrator: ReturnAnalysisOrchestrator::new(config),
        }
    }

    /// 解析计算模式字符串
    ///
    /// 接受 nd_only / nd / rf_only / rf / both（不区分大小写）
    pub fn parse_mode(value: &str) -> ApiResult<CalculationType> {
        CalculationType::from_str(value).map_err(ApiError::InvalidInput)
    }

    /// 分析库存文件
    ///
    /// # 参数
    /// - file_path: .xlsx / .xls / .csv 文件路径
    /// - mode: 计算模式
    ///
    /// # 返回
    /// - Ok(AnalysisResult): 分析结果
    /// - Err(ApiError::MissingColumns): 缺少必需列
    /// - Err(ApiError::InvalidInput): 文件不存在 / 格式不支持
    pub fn analyze_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        mode: CalculationType,
    ) -> ApiResult<AnalysisResult> {
        let path = file_path.as_ref();
        tracing::info!(file = %path.display(), mode = %mode, "收到分析请求");

        let table = self.parser.parse(path)?;
        self.analyze_table(&table, mode)
    }

    /// 分析已解析的原始表（无表头的空表同样按缺列报告）
    pub fn analyze_table(
        &self,
        table: &RawTable,
        mode: CalculationType,
    ) -> ApiResult<AnalysisResult> {
        Ok(self.orchestrator.run(table, mode)?)
    }

    /// 导出建议表 CSV
    pub fn export_recommendations_csv<P: AsRef<Path>>(
        &self,
        result: &AnalysisResult,
        path: P,
    ) -> ApiResult<()> {
        export::save_recommendations_csv(path, &result.recommendations)?;
        Ok(())
    }

    /// 导出完整结果 JSON
    pub fn export_result_json<P: AsRef<Path>>(
        &self,
        result: &AnalysisResult,
        path: P,
    ) -> ApiResult<()> {
        export::save_result_json(path, result)?;
        Ok(())
    }
}

impl Default for AnalysisApi {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
