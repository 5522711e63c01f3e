// ==========================================
// LogiFlow 排程引擎 - 命令行入口
// ==========================================
// 用法:
//   logiflow-scheduler [--db <db_path>] [--import <orders.csv>]
//
// 流程: 打开数据库 → 加载配置 → (导入) → 批量排产 → 生产重排
//       → 配送排程 → 路线重排 → 输出效率报表 JSON
// ==========================================

use anyhow::{bail, Context};
use std::path::PathBuf;

use logiflow_scheduler::app::{get_default_db_path, AppState};
use logiflow_scheduler::logging;

struct CliArgs {
    db_path: String,
    import: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut db_path = None;
    let mut import = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => db_path = Some(args.next().context("--db 缺少路径参数")?),
            "--import" => import = Some(PathBuf::from(args.next().context("--import 缺少文件参数")?)),
            other => bail!("未知参数: {}", other),
        }
    }

    Ok(CliArgs {
        db_path: db_path.unwrap_or_else(get_default_db_path),
        import,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", logiflow_scheduler::APP_NAME, logiflow_scheduler::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;
    tracing::info!("使用数据库: {}", args.db_path);

    let state = AppState::new(args.db_path)
        .await
        .map_err(anyhow::Error::msg)
        .context("无法初始化AppState")?;

    if let Some(path) = args.import {
        let imported = state
            .order_api
            .import_csv(&path)
            .with_context(|| format!("导入失败: {}", path.display()))?;
        tracing::info!(orders = imported.len(), "CSV 导入完成");
    }

    let batch = state.scheduling_api.schedule_pending_orders()?;
    for failure in &batch.failed {
        tracing::warn!(order_id = %failure.order_id, code = %failure.code, "{}", failure.message);
    }

    state.scheduling_api.optimize_production()?;

    for schedule in &batch.scheduled {
        if let Err(e) = state.scheduling_api.schedule_delivery(&schedule.order_id) {
            tracing::warn!(order_id = %schedule.order_id, code = e.code(), "配送排程失败: {}", e);
        }
    }

    let summary = state.scheduling_api.optimize_routes()?;
    tracing::info!(
        clusters = summary.clusters,
        rerouted = summary.rerouted,
        "路线重排完成"
    );

    let report = state.dashboard_api.get_efficiency_report()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
