// apps/rh_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、默认配置和降雨系数表。

use anyhow::{Context, Result};
use clap::Args;
use rh_config::DesignConfig;
use rh_drainage::rainfall::catalog;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示默认配置 (JSON)
    #[arg(long)]
    pub defaults: bool,

    /// 显示降雨 IDF 系数表
    #[arg(long)]
    pub rainfall: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== RoadHydro 信息 ===");
    println!("RoadHydro CLI 版本: {}", env!("CARGO_PKG_VERSION"));

    let show_all = !args.defaults && !args.rainfall;

    if args.defaults || show_all {
        println!();
        print_default_config()?;
    }

    if args.rainfall || show_all {
        println!();
        print_rainfall_table();
    }

    Ok(())
}

fn print_default_config() -> Result<()> {
    println!("=== 默认配置 ===");
    let json = serde_json::to_string_pretty(&DesignConfig::default()).context("无法序列化默认配置")?;
    println!("{}", json);
    Ok(())
}

fn print_rainfall_table() {
    println!("=== 降雨 IDF 系数 I = a·(t + b)^c, t [h] ===");
    println!("  {:<10} {:<10} {:>8} {:>8} {:>8}", "分区", "重现期", "a", "b", "c");
    for (region, period, c) in catalog() {
        println!("  {:<10} {:<10} {:>8.3} {:>8.3} {:>8.3}", region.name(), period.name(), c.a, c.b, c.c);
    }
}
