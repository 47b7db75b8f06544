// ==========================================
// 退货建议分析系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI 及外部调用方使用
// ==========================================

pub mod analysis_api;
pub mod error;

// 重导出核心类型
pub use analysis_api::AnalysisApi;
pub use error::{ApiError, ApiResult};
