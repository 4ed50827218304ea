// apps/rh_cli/src/commands/run.rs

//! 运行命令
//!
//! 加载项目文件，完整重算后按文本或 CSV 输出报告。

use anyhow::{Context, Result};
use clap::Args;
use rh_config::OutputFormat;
use rh_report::DesignProject;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 项目文件路径 (JSON)
    #[arg(short, long)]
    pub project: PathBuf,

    /// 以 CSV 输出雨水口表（覆盖项目中的输出格式）
    #[arg(long)]
    pub csv: bool,

    /// 输出文件，缺省时写到标准输出
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== RoadHydro 设计计算 ===");

    let project = DesignProject::from_file(&args.project)
        .with_context(|| format!("无法加载项目文件: {}", args.project.display()))?;
    info!(
        "项目: {} 个变坡点, {} 个雨水口, 降雨 {}",
        project.profile.len(),
        project.inlets.len(),
        project.selection
    );

    let validation = project.validate();
    if !validation.is_valid() {
        warn!("项目存在 {} 个验证错误，结果可能为 0", validation.error_count());
    }

    let outcome = match project.recompute() {
        Ok(outcome) => outcome,
        Err(e) => {
            if e.is_contract_violation() {
                error!("项目数据不满足计算前提，请先运行 validate: {}", e);
            }
            return Err(e).context("重算失败");
        }
    };

    let format = if args.csv { OutputFormat::Csv } else { project.config.output.format };
    let text = match format {
        OutputFormat::Csv => outcome.report.to_csv().context("CSV 输出失败")?,
        OutputFormat::Text => outcome.report.to_string(),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("无法写入输出文件: {}", path.display()))?;
            info!("报告已写入 {}", path.display());
        }
        None => print!("{}", text),
    }

    let summary = &outcome.report.summary;
    info!(
        "完成: 截流 {:.3} cfs, 末端旁通 {:.3} cfs, 最大积水宽度 {:.2} ft",
        summary.total_intercepted, summary.final_bypass, summary.max_flooding_width
    );
    Ok(())
}
