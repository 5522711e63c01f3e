// ==========================================
// LogiFlow 排程引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 物流门户的生产/配送两阶段排程核心
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 文档存储
pub mod repository;

// 引擎层 - 排程规则
pub mod engine;

// 导入层 - CSV 订单
pub mod importer;

// 配置层 - 路线参数与资源池
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态容器与装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{OrderItemStatus, OrderPriority, OrderStatus, ScheduleStatus, VehicleStatus};

// 领域实体
pub use domain::{
    DeliverySchedule, Driver, GeoPoint, NewOrder, Order, OrderItem, ProductionLine,
    ProductionSchedule, Route, Vehicle,
};

// 引擎
pub use engine::{
    DeliveryScheduler, EfficiencyReport, ProductionScheduler, RouteOptimizer, SchedulingError,
    SchedulingResult,
};

// 应用
pub use app::{AppState, SchedulingStore};

// API
pub use api::{DashboardApi, OrderApi, SchedulingApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "LogiFlow 排程引擎";
