// ==========================================
// LogiFlow 排程引擎 - 引擎层
// ==========================================
// 职责: 生产排程、配送排程、路线重排、效率分析
// 红线: Engine 不访问存储,不读系统时钟
// ==========================================

pub mod analytics;
pub mod clock;
pub mod delivery_scheduler;
pub mod error;
pub mod events;
pub mod production_scheduler;
pub mod resource_pool;
pub mod route_optimizer;
pub mod routing;

// 重导出核心引擎
pub use analytics::{delivery_efficiency, production_efficiency, EfficiencyReport, StatusCounts};
pub use clock::{Clock, FixedClock, SystemClock};
pub use delivery_scheduler::DeliveryScheduler;
pub use error::{SchedulingError, SchedulingResult};
pub use events::{
    NoOpEventPublisher, OptionalEventPublisher, SchedulingEvent, SchedulingEventPublisher,
    SchedulingEventType,
};
pub use production_scheduler::ProductionScheduler;
pub use resource_pool::{DriverPool, LineLoad, LinePool, LineSlot, VehiclePool};
pub use route_optimizer::{RouteOptimizationSummary, RouteOptimizer};
pub use routing::{Leg, RoutePlanner, StraightLineRouter};
