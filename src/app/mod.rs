// ==========================================
// LogiFlow 排程引擎 - 应用层
// ==========================================
// 职责: 进程内排程状态与应用装配
// ==========================================

pub mod scheduling_store;
pub mod state;

// 重导出
pub use scheduling_store::{SchedulingState, SchedulingStore};
pub use state::{get_default_db_path, AppState};
