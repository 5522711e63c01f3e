// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

use logiflow_scheduler::app::SchedulingStore;
use logiflow_scheduler::config::{SchedulingConfig, SchedulingConfigReader};
use logiflow_scheduler::domain::{NewOrder, Order, OrderItem};
use logiflow_scheduler::engine::FixedClock;
use logiflow_scheduler::{OrderItemStatus, OrderPriority, OrderStatus};

/// 测试基准时间 2026-03-02 08:00:00
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// 按配置装配一个使用固定时钟的 SchedulingStore
pub async fn build_store(reader: &dyn SchedulingConfigReader, clock: Arc<FixedClock>) -> SchedulingStore {
    let config = SchedulingConfig::load(reader).await.expect("配置加载失败");
    SchedulingStore::from_config(&config, clock)
}

// ==========================================
// Order 构建器
// ==========================================

pub struct OrderBuilder {
    id: String,
    customer_id: String,
    priority: OrderPriority,
    hours: f64,
    delivery_hours: f64,
    address: String,
    quantities: Vec<u32>,
    vehicle_type: Option<String>,
}

impl OrderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            customer_id: "CUST-1".to_string(),
            priority: OrderPriority::Medium,
            hours: 1.0,
            delivery_hours: 1.0,
            address: "0.0,0.1".to_string(),
            quantities: vec![1],
            vehicle_type: None,
        }
    }

    pub fn customer(mut self, customer_id: &str) -> Self {
        self.customer_id = customer_id.to_string();
        self
    }

    pub fn priority(mut self, priority: OrderPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.hours = hours;
        self
    }

    pub fn delivery_hours(mut self, hours: f64) -> Self {
        self.delivery_hours = hours;
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn quantities(mut self, quantities: &[u32]) -> Self {
        self.quantities = quantities.to_vec();
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: &str) -> Self {
        self.vehicle_type = Some(vehicle_type.to_string());
        self
    }

    fn items(&self) -> Vec<OrderItem> {
        self.quantities
            .iter()
            .enumerate()
            .map(|(i, q)| OrderItem {
                id: format!("{}-{}", self.id, i + 1),
                product_id: format!("P-{}", i + 1),
                quantity: *q,
                status: OrderItemStatus::Pending,
            })
            .collect()
    }

    pub fn build(self) -> Order {
        self.build_new().into_order(self.id.clone())
    }

    /// 下单请求体（无ID）
    pub fn build_new(&self) -> NewOrder {
        NewOrder {
            customer_id: self.customer_id.clone(),
            status: OrderStatus::Pending,
            delivery_address: self.address.clone(),
            scheduled_date: "2026-03-02".to_string(),
            priority: self.priority,
            items: self.items(),
            required_production_time: self.hours,
            estimated_delivery_time: self.delivery_hours,
            required_vehicle_type: self.vehicle_type.clone(),
        }
    }
}
