// ==========================================
// LogiFlow 排程引擎 - 领域类型定义
// ==========================================
// 职责: 订单/排程/车辆的状态枚举与优先级
// 红线: 状态只能单调前进,不可回退
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单优先级 (Order Priority)
// ==========================================
// 权重: high=3, medium=2, low=1 (仅用于排序,不对用户展示)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPriority {
    Low,
    Medium,
    High,
}

impl OrderPriority {
    /// 优先级权重
    pub fn weight(&self) -> u8 {
        match self {
            OrderPriority::High => 3,
            OrderPriority::Medium => 2,
            OrderPriority::Low => 1,
        }
    }

    /// 从字符串解析优先级（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(OrderPriority::High),
            "medium" => Some(OrderPriority::Medium),
            "low" => Some(OrderPriority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderPriority::High => write!(f, "high"),
            OrderPriority::Medium => write!(f, "medium"),
            OrderPriority::Low => write!(f, "low"),
        }
    }
}

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 顺序: Pending < Processing < InTransit < Delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,    // 待处理
    Processing, // 生产中
    InTransit,  // 配送中
    Delivered,  // 已送达
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::InTransit => write!(f, "in-transit"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

// ==========================================
// 订单明细状态 (Order Item Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderItemStatus {
    Pending,
    InProduction,
    Completed,
}

impl fmt::Display for OrderItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderItemStatus::Pending => write!(f, "pending"),
            OrderItemStatus::InProduction => write!(f, "in-production"),
            OrderItemStatus::Completed => write!(f, "completed"),
        }
    }
}

// ==========================================
// 排程状态 (Schedule Status)
// ==========================================
// 生产排程与配送排程共用
// 顺序: Scheduled < InProgress < Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    Scheduled,  // 已排程
    InProgress, // 执行中
    Completed,  // 已完成
}

impl ScheduleStatus {
    /// 是否仍占用资源（未完成）
    pub fn is_live(&self) -> bool {
        *self != ScheduleStatus::Completed
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Scheduled => write!(f, "scheduled"),
            ScheduleStatus::InProgress => write!(f, "in-progress"),
            ScheduleStatus::Completed => write!(f, "completed"),
        }
    }
}

// ==========================================
// 车辆状态 (Vehicle Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Available,   // 空闲
    InTransit,   // 在途
    Maintenance, // 维保
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "available"),
            VehicleStatus::InTransit => write!(f, "in-transit"),
            VehicleStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

// ==========================================
// 单调状态推进
// ==========================================

/// 判断状态迁移是否为严格前进
///
/// 状态枚举按声明顺序排序,只允许从低到高迁移
pub fn is_forward<S: PartialOrd>(from: S, to: S) -> bool {
    to > from
}
