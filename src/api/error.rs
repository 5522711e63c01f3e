// ==========================================
// LogiFlow 排程引擎 - API层错误类型
// ==========================================
// 职责: 将排程/存储/导入错误转换为调用方可展示的错误消息
// ==========================================

use serde::Serialize;
use thiserror::Error;

use crate::engine::error::SchedulingError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 排程错误
    // ==========================================
    #[error("无效订单: {0}")]
    InvalidOrder(String),

    #[error("无效排程: {0}")]
    InvalidSchedule(String),

    #[error("无可用产能: {0}")]
    NoCapacity(String),

    #[error("无可用车辆: {0}")]
    NoVehicleAvailable(String),

    #[error("无可用司机: {0}")]
    NoDriverAvailable(String),

    #[error("无法规划路线: {0}")]
    RouteUnavailable(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 通用业务错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    /// 文档存储不可用（不吞掉,原样上抛）
    #[error("文档存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 错误码（供前端/中继层映射）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidOrder(_) => "INVALID_ORDER",
            ApiError::InvalidSchedule(_) => "INVALID_SCHEDULE",
            ApiError::NoCapacity(_) => "NO_CAPACITY",
            ApiError::NoVehicleAvailable(_) => "NO_VEHICLE_AVAILABLE",
            ApiError::NoDriverAvailable(_) => "NO_DRIVER_AVAILABLE",
            ApiError::RouteUnavailable(_) => "ROUTE_UNAVAILABLE",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::InternalError(_) | ApiError::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// 转换为失败回执
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// 失败回执（与下单成功回执同形: success + message）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}

// ==========================================
// 从 SchedulingError 转换
// ==========================================
impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::InvalidOrder(msg) => ApiError::InvalidOrder(msg),
            SchedulingError::InvalidSchedule(msg) => ApiError::InvalidSchedule(msg),
            SchedulingError::NoCapacity(msg) => ApiError::NoCapacity(msg),
            e @ SchedulingError::NoVehicleAvailable { .. } => ApiError::NoVehicleAvailable(e.to_string()),
            SchedulingError::NoDriverAvailable(order_id) => ApiError::NoDriverAvailable(order_id),
            SchedulingError::RouteUnavailable(address) => ApiError::RouteUnavailable(address),
            SchedulingError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            SchedulingError::InvalidStateTransition { from, to } => {
                ApiError::InvalidStateTransition { from, to }
            }
            SchedulingError::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
            SchedulingError::LockPoisoned(msg) => ApiError::InternalError(msg),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            other => ApiError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
