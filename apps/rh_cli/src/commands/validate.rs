// apps/rh_cli/src/commands/validate.rs

//! 项目验证命令

use anyhow::{bail, Context, Result};
use clap::Args;
use rh_report::DesignProject;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 项目文件路径 (JSON)
    #[arg(short, long)]
    pub project: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== RoadHydro 项目验证 ===");
    println!("检查项目文件: {}", args.project.display());

    let project = DesignProject::from_file(&args.project)
        .with_context(|| format!("无法加载项目文件: {}", args.project.display()))?;
    let report = project.validate();

    for e in &report.errors {
        error!("{}", e);
    }
    for w in &report.warnings {
        warn!("{}", w);
    }
    println!("\n=== 验证结果 ===\n{}", report);

    let success = if args.strict { report.is_valid_strict() } else { report.is_valid() };
    if success {
        println!("✓ 验证通过");
        Ok(())
    } else {
        println!("✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            report.error_count(),
            report.warning_count()
        )
    }
}
