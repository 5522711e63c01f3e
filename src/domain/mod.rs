// ==========================================
// LogiFlow 排程引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod delivery;
pub mod fleet;
pub mod order;
pub mod production;
pub mod types;

// 重导出核心类型
pub use delivery::{DeliverySchedule, Route};
pub use fleet::{Driver, GeoPoint, Vehicle};
pub use order::{NewOrder, Order, OrderItem};
pub use production::{ProductionLine, ProductionSchedule};
pub use types::{OrderItemStatus, OrderPriority, OrderStatus, ScheduleStatus, VehicleStatus};
