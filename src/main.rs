// ==========================================
// 退货建议分析系统 - 命令行入口
// ==========================================
// 用法:
//   stock-return-advisor stock.xlsx --mode both --output returns.csv
// ==========================================

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use stock_return_advisor::{
    logging, perf, AnalysisApi, AnalysisResult, CalculationType, EngineConfig, APP_NAME, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "stock-return-advisor")]
#[command(version, about = "门店库存退仓建议分析")]
struct Args {
    /// 库存文件（.xlsx / .xls / .csv）
    input: PathBuf,

    /// 计算模式: both / nd_only / rf_only
    #[arg(long, default_value = "both")]
    mode: String,

    /// 引擎配置 JSON 文件（缺省时读取 STOCK_RETURN_ADVISOR_CONFIG）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 建议表 CSV 输出路径
    #[arg(long)]
    output: Option<PathBuf>,

    /// 完整结果 JSON 输出路径
    #[arg(long)]
    json: Option<PathBuf>,

    /// 任一质检项失败时以非零状态退出
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init();
    perf::configure_from_env();

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => EngineConfig::from_env().context("加载配置失败")?,
    };

    let mode = AnalysisApi::parse_mode(&args.mode)?;
    let api = AnalysisApi::new(config);

    let result = api
        .analyze_file(&args.input, mode)
        .with_context(|| format!("分析失败: {}", args.input.display()))?;

    print_report(&result, mode);

    if let Some(path) = &args.output {
        api.export_recommendations_csv(&result, path)
            .with_context(|| format!("写出建议表失败: {}", path.display()))?;
        println!("建议表已写出: {}", path.display());
    }

    if let Some(path) = &args.json {
        api.export_result_json(&result, path)
            .with_context(|| format!("写出分析结果失败: {}", path.display()))?;
        println!("分析结果已写出: {}", path.display());
    }

    if args.strict && !result.all_checks_passed() {
        bail!("质量检查未全部通过");
    }

    Ok(())
}

fn print_report(result: &AnalysisResult, mode: CalculationType) {
    let summary = &result.summary;

    println!("==================================================");
    println!("{} - {}", APP_NAME, mode.description());
    println!("运行ID: {}", result.run_id);
    println!("输入行数: {}", result.input_rows);
    println!("建议条数: {}", summary.total_recommendations);
    println!("退货总件数: {}", summary.total_return_qty);
    println!("ND / RF: {} / {}", summary.nd_count, summary.rf_count);
    println!("涉及 Article: {}  涉及 OM: {}", summary.by_article.len(), summary.by_om.len());
    println!("--------------------------------------------------");

    for finding in &result.findings {
        println!("[{}] {} {}", finding.status, finding.check, finding.message);
    }
    println!("==================================================");
}
