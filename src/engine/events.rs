// ==========================================
// LogiFlow 排程引擎 - 排程事件发布
// ==========================================
// 职责: 状态容器提交成功后通知下游（看板刷新等）
// 说明: 引擎层定义 trait,上层实现适配器
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 排程事件类型
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingEventType {
    /// 订单登记
    OrderRegistered,
    /// 生产排程生成
    ProductionScheduled,
    /// 生产队列重排
    ProductionOptimized,
    /// 生产状态推进
    ProductionStatusChanged,
    /// 配送排程生成
    DeliveryScheduled,
    /// 配送路线重排
    DeliveryRoutesOptimized,
    /// 配送状态推进
    DeliveryStatusChanged,
    /// 资源池变更
    ResourcePoolChanged,
}

impl SchedulingEventType {
    pub fn as_str(&self) -> &str {
        match self {
            SchedulingEventType::OrderRegistered => "OrderRegistered",
            SchedulingEventType::ProductionScheduled => "ProductionScheduled",
            SchedulingEventType::ProductionOptimized => "ProductionOptimized",
            SchedulingEventType::ProductionStatusChanged => "ProductionStatusChanged",
            SchedulingEventType::DeliveryScheduled => "DeliveryScheduled",
            SchedulingEventType::DeliveryRoutesOptimized => "DeliveryRoutesOptimized",
            SchedulingEventType::DeliveryStatusChanged => "DeliveryStatusChanged",
            SchedulingEventType::ResourcePoolChanged => "ResourcePoolChanged",
        }
    }
}

/// 排程事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingEvent {
    pub event_type: SchedulingEventType,
    /// 受影响的订单（None 表示全量,如重排）
    pub order_id: Option<String>,
    /// 受影响的排程ID
    pub schedule_id: Option<String>,
}

impl SchedulingEvent {
    /// 单订单事件
    pub fn for_order(
        event_type: SchedulingEventType,
        order_id: impl Into<String>,
        schedule_id: Option<String>,
    ) -> Self {
        Self {
            event_type,
            order_id: Some(order_id.into()),
            schedule_id,
        }
    }

    /// 全量事件
    pub fn full_scope(event_type: SchedulingEventType) -> Self {
        Self {
            event_type,
            order_id: None,
            schedule_id: None,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 排程事件发布者
///
/// 发布失败不回滚已提交的排程,仅记录告警
pub trait SchedulingEventPublisher: Send + Sync {
    fn publish(&self, event: SchedulingEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl SchedulingEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: SchedulingEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}, order_id={:?}",
            event.event_type.as_str(),
            event.order_id
        );
        Ok(())
    }
}

/// 可选的事件发布者包装
#[derive(Clone, Default)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn SchedulingEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn SchedulingEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（失败只告警）
    pub fn publish(&self, event: SchedulingEvent) {
        if let Some(publisher) = &self.inner {
            let event_type = event.event_type.as_str().to_string();
            if let Err(e) = publisher.publish(event) {
                tracing::warn!("排程事件发布失败: event_type={}, error={}", event_type, e);
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}
