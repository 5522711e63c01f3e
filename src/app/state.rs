// ==========================================
// LogiFlow 排程引擎 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, OrderApi, SchedulingApi};
use crate::app::scheduling_store::SchedulingStore;
use crate::config::{ConfigManager, SchedulingConfig};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::events::{NoOpEventPublisher, OptionalEventPublisher};
use crate::repository::document_store::DocumentStore;
use crate::repository::sqlite_document_store::SqliteDocumentStore;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "LOGIFLOW_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置快照（启动时加载）
    pub config: SchedulingConfig,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 排程状态容器
    pub store: Arc<SchedulingStore>,

    /// 订单API
    pub order_api: Arc<OrderApi>,

    /// 排程API
    pub scheduling_api: Arc<SchedulingApi>,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开共享连接并建表
    /// 2. 从 config_kv 加载配置快照
    /// 3. 装配 SchedulingStore 与各 API
    pub async fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState,数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("无法初始化表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        Self::from_connection(db_path, conn).await
    }

    /// 从已有连接装配（测试可传入内存库）
    pub async fn from_connection(db_path: String, conn: Arc<Mutex<Connection>>) -> Result<Self, String> {
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let config = SchedulingConfig::load(config_manager.as_ref())
            .await
            .map_err(|e| format!("无法加载排程配置: {}", e))?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let documents: Arc<dyn DocumentStore> = Arc::new(SqliteDocumentStore::from_connection(conn));
        // 事件发布器（未接入下游时仅记录 debug 日志）
        let events = OptionalEventPublisher::with_publisher(Arc::new(NoOpEventPublisher));
        let store = Arc::new(
            SchedulingStore::from_config(&config, clock.clone()).with_event_publisher(events),
        );

        let order_api = Arc::new(OrderApi::new(documents.clone(), clock));
        let scheduling_api = Arc::new(SchedulingApi::new(
            store.clone(),
            order_api.clone(),
            documents,
        ));
        let dashboard_api = Arc::new(DashboardApi::new(store.clone()));

        tracing::info!("AppState初始化完成");
        Ok(Self {
            db_path,
            config,
            config_manager,
            store,
            order_api,
            scheduling_api,
            dashboard_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先使用环境变量 LOGIFLOW_DB_PATH,否则落在用户数据目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./logiflow.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("logiflow-scheduler");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("logiflow.db");
        }
    }

    path.to_string_lossy().to_string()
}
