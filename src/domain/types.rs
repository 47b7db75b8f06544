// ==========================================
// 退货建议分析系统 - 领域类型定义
// ==========================================
// 职责: 补货类型 / 计算类型 / 规则类型 / 质检状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 补货类型 (RP Type)
// ==========================================
// ND: 强制清仓; RF: 按安全库存管理; 其他值不参与任何规则
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RpType {
    Nd,            // No Demand - 全部退仓
    Rf,            // Replenished/Forecasted - 仅过剩部分退仓
    Other(String), // 未识别的类型（保留原值）
}

impl RpType {
    /// 从已 TRIM 的源值解析（大小写敏感，与源表口径一致）
    pub fn parse(value: &str) -> Self {
        match value {
            "ND" => RpType::Nd,
            "RF" => RpType::Rf,
            other => RpType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RpType::Nd => "ND",
            RpType::Rf => "RF",
            RpType::Other(v) => v.as_str(),
        }
    }
}

impl fmt::Display for RpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 计算类型 (Calculation Type)
// ==========================================
// 序列化格式: snake_case (nd_only / rf_only / both)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    NdOnly, // 只计算 ND
    RfOnly, // 只计算 RF
    Both,   // ND + RF
}

impl CalculationType {
    pub fn permits_nd(self) -> bool {
        matches!(self, CalculationType::NdOnly | CalculationType::Both)
    }

    pub fn permits_rf(self) -> bool {
        matches!(self, CalculationType::RfOnly | CalculationType::Both)
    }

    /// 分析类型说明（供报告/日志使用）
    pub fn description(self) -> &'static str {
        match self {
            CalculationType::NdOnly => "ND 类型退仓分析",
            CalculationType::RfOnly => "RF 类型过剩退仓分析",
            CalculationType::Both => "综合退货分析 (ND + RF)",
        }
    }
}

impl Default for CalculationType {
    fn default() -> Self {
        CalculationType::Both
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationType::NdOnly => write!(f, "nd_only"),
            CalculationType::RfOnly => write!(f, "rf_only"),
            CalculationType::Both => write!(f, "both"),
        }
    }
}

impl FromStr for CalculationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nd_only" | "nd" => Ok(CalculationType::NdOnly),
            "rf_only" | "rf" => Ok(CalculationType::RfOnly),
            "both" => Ok(CalculationType::Both),
            other => Err(format!(
                "未知计算类型: {}（可选 nd_only / rf_only / both）",
                other
            )),
        }
    }
}

// ==========================================
// 规则类型 (Rule Type)
// ==========================================
// 顺序: ND(优先级1) < RF(优先级2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleType {
    #[serde(rename = "ND")]
    Nd,
    #[serde(rename = "RF")]
    Rf,
}

impl RuleType {
    pub fn priority(self) -> u8 {
        match self {
            RuleType::Nd => 1,
            RuleType::Rf => 2,
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Nd => write!(f, "ND"),
            RuleType::Rf => write!(f, "RF"),
        }
    }
}

// ==========================================
// 质检项 / 质检状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityCheck {
    NoRecommendations,    // 空建议集（直接通过）
    ArticleOmConsistency, // Article 与 OM 一致性
    PositiveQuantity,     // 退货数量为正
    StockBound,           // 退货数量不超过原库存
    ArticleFormat,        // Article 长度 <= 12
}

impl fmt::Display for QualityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityCheck::NoRecommendations => write!(f, "NO_RECOMMENDATIONS"),
            QualityCheck::ArticleOmConsistency => write!(f, "ARTICLE_OM_CONSISTENCY"),
            QualityCheck::PositiveQuantity => write!(f, "POSITIVE_QUANTITY"),
            QualityCheck::StockBound => write!(f, "STOCK_BOUND"),
            QualityCheck::ArticleFormat => write!(f, "ARTICLE_FORMAT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rp_type_parse() {
        assert_eq!(RpType::parse("ND"), RpType::Nd);
        assert_eq!(RpType::parse("RF"), RpType::Rf);
        assert_eq!(RpType::parse("nd"), RpType::Other("nd".to_string()));
        assert_eq!(RpType::parse(""), RpType::Other(String::new()));
    }

    #[test]
    fn test_calculation_type_from_str() {
        assert_eq!("nd_only".parse::<CalculationType>(), Ok(CalculationType::NdOnly));
        assert_eq!(" RF_ONLY ".parse::<CalculationType>(), Ok(CalculationType::RfOnly));
        assert_eq!("both".parse::<CalculationType>(), Ok(CalculationType::Both));
        assert!("all".parse::<CalculationType>().is_err());
    }

    #[test]
    fn test_calculation_type_filters() {
        assert!(CalculationType::Both.permits_nd());
        assert!(CalculationType::Both.permits_rf());
        assert!(CalculationType::NdOnly.permits_nd());
        assert!(!CalculationType::NdOnly.permits_rf());
        assert!(!CalculationType::RfOnly.permits_nd());
    }

    #[test]
    fn test_rule_type_priority() {
        assert_eq!(RuleType::Nd.priority(), 1);
        assert_eq!(RuleType::Rf.priority(), 2);
        assert!(RuleType::Nd < RuleType::Rf);
    }
}
