// ==========================================
// LogiFlow 排程引擎 - 订单领域模型
// ==========================================
// 职责: 订单/订单明细定义与基础校验
// 红线: 不含引擎逻辑,不含数据访问逻辑
// ==========================================

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::types::{OrderItemStatus, OrderPriority, OrderStatus};

// ==========================================
// OrderItem - 订单明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,              // 明细ID
    pub product_id: String,      // 产品ID
    pub quantity: u32,           // 数量
    pub status: OrderItemStatus, // 明细状态
}

// ==========================================
// Order - 客户订单
// ==========================================
// 用途: 生产排程与配送排程的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub scheduled_date: String,

    // ===== 配送分配 =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_driver_id: Option<String>,

    pub priority: OrderPriority,
    #[serde(default)]
    pub items: Vec<OrderItem>,

    // ===== 时长 (小时) =====
    pub required_production_time: f64,
    pub estimated_delivery_time: f64,

    // 指定车型（可选,为空表示任意车型）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_vehicle_type: Option<String>,
}

impl Order {
    /// 生产时长
    pub fn production_duration(&self) -> Duration {
        hours_to_duration(self.required_production_time)
    }

    /// 订单总件数（用于车辆装载判断）
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// 基础校验
    ///
    /// # 返回
    /// - Ok(()): 订单可排程
    /// - Err(reason): 不可排程的原因
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("订单ID不能为空".to_string());
        }
        if !self.required_production_time.is_finite() || self.required_production_time <= 0.0 {
            return Err(format!(
                "订单{}的生产时长必须大于0: requiredProductionTime={}",
                self.id, self.required_production_time
            ));
        }
        if try_hours_to_duration(self.required_production_time).is_none() {
            return Err(format!(
                "订单{}的生产时长超出可表示范围: requiredProductionTime={}",
                self.id, self.required_production_time
            ));
        }
        if !self.estimated_delivery_time.is_finite() || self.estimated_delivery_time < 0.0 {
            return Err(format!(
                "订单{}的预计配送时长无效: estimatedDeliveryTime={}",
                self.id, self.estimated_delivery_time
            ));
        }
        Ok(())
    }
}

// ==========================================
// NewOrder - 下单请求体
// ==========================================
// 订单去掉 id/createdAt 后的形状,由存储层分配身份
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: String,
    #[serde(default = "default_order_status")]
    pub status: OrderStatus,
    pub delivery_address: String,
    pub scheduled_date: String,
    pub priority: OrderPriority,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub required_production_time: f64,
    #[serde(default)]
    pub estimated_delivery_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_vehicle_type: Option<String>,
}

fn default_order_status() -> OrderStatus {
    OrderStatus::Pending
}

impl NewOrder {
    /// 绑定存储分配的ID,生成完整订单
    pub fn into_order(self, id: impl Into<String>) -> Order {
        Order {
            id: id.into(),
            customer_id: self.customer_id,
            status: self.status,
            delivery_address: self.delivery_address,
            scheduled_date: self.scheduled_date,
            assigned_vehicle_id: None,
            assigned_driver_id: None,
            priority: self.priority,
            items: self.items,
            required_production_time: self.required_production_time,
            estimated_delivery_time: self.estimated_delivery_time,
            required_vehicle_type: self.required_vehicle_type,
        }
    }
}

/// 小时数转换为时长（毫秒精度,超出范围时饱和）
pub fn hours_to_duration(hours: f64) -> Duration {
    try_hours_to_duration(hours).unwrap_or(if hours < 0.0 { Duration::MIN } else { Duration::MAX })
}

/// 小时数转换为时长,非有限值或超出 TimeDelta 范围时返回 None
pub fn try_hours_to_duration(hours: f64) -> Option<Duration> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

/// 时长转换为小时数
pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}
