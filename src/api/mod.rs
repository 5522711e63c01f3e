// ==========================================
// LogiFlow 排程引擎 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供中继层/命令行调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod order_api;
pub mod scheduling_api;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use order_api::{OrderApi, OrderReceipt, StoredOrder};
pub use scheduling_api::{BatchScheduleResult, ScheduleFailure, SchedulingApi};
