// ==========================================
// LogiFlow 排程引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 原则: 排程操作快速失败,不降级到默认资源
// ==========================================

use thiserror::Error;

use crate::repository::error::RepositoryError;

/// 排程错误类型
#[derive(Error, Debug)]
pub enum SchedulingError {
    // ===== 输入错误 =====
    #[error("无效订单: {0}")]
    InvalidOrder(String),

    #[error("无效排程: {0}")]
    InvalidSchedule(String),

    // ===== 资源池耗尽 =====
    #[error("无可用产能: {0}")]
    NoCapacity(String),

    #[error("无可用车辆: order_id={order_id}, load={load}")]
    NoVehicleAvailable { order_id: String, load: u32 },

    #[error("无可用司机: order_id={0}")]
    NoDriverAvailable(String),

    // ===== 路线 =====
    #[error("无法规划路线: address={0}")]
    RouteUnavailable(String),

    // ===== 状态 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== 外部协作方 =====
    #[error("文档存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("排程状态锁获取失败: {0}")]
    LockPoisoned(String),
}

impl SchedulingError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        SchedulingError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn transition(from: impl ToString, to: impl ToString) -> Self {
        SchedulingError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

// 存储层任何失败对排程调用方都表现为 StoreUnavailable
impl From<RepositoryError> for SchedulingError {
    fn from(err: RepositoryError) -> Self {
        SchedulingError::StoreUnavailable(err.to_string())
    }
}

/// Result 类型别名
pub type SchedulingResult<T> = Result<T, SchedulingError>;
