// apps/rh_cli/src/main.rs

//! RoadHydro 命令行界面
//!
//! 读取 JSON 项目文件，重算纵断面与雨水口级联并输出报告。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**，只通过 `DesignProject` 访问下层。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// RoadHydro 道路排水设计命令行工具
#[derive(Parser)]
#[command(name = "rh_cli")]
#[command(author = "RoadHydro Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "RoadHydro roadway profile and inlet drainage calculator", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 重算并输出设计报告
    Run(commands::run::RunArgs),
    /// 验证项目文件
    Validate(commands::validate::ValidateArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// 安装全局日志订阅者
///
/// 同时安装 `log` 兼容层，各库 crate 通过 `log` 门面输出的记录也会进入订阅者。
fn init_logging(level: Level) -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(parse_level(&cli.log_level))?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
