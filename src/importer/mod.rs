// ==========================================
// LogiFlow 排程引擎 - 导入层
// ==========================================
// 职责: 外部订单数据批量导入
// 支持: CSV
// ==========================================

pub mod error;
pub mod order_csv;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use order_csv::OrderCsvImporter;
