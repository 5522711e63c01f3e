// ==========================================
// LogiFlow 排程引擎 - 订单 API
// ==========================================
// 职责: 下单与订单列表（中继层 POST/GET /api/orders 的库接口）
// 存储: 文档集合 orders,文档体 = 订单字段 + createdAt
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::{NewOrder, Order};
use crate::engine::clock::Clock;
use crate::importer::OrderCsvImporter;
use crate::repository::document_store::{
    collections, create_record, upsert_record, DocumentStore, OrderBy,
};

pub const ORDER_SAVED_MESSAGE: &str = "Order saved successfully!";

/// 下单回执
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub success: bool,
    pub message: String,
    pub id: String,
}

/// 存储中的订单文档体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    #[serde(flatten)]
    order: NewOrder,
    created_at: NaiveDateTime,
}

/// 订单列表项（文档ID + 订单字段 + createdAt）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    #[serde(flatten)]
    pub order: Order,
    pub created_at: NaiveDateTime,
}

// ==========================================
// OrderApi
// ==========================================
pub struct OrderApi {
    documents: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl OrderApi {
    pub fn new(documents: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { documents, clock }
    }

    /// 下单
    ///
    /// # 错误
    /// - StoreUnavailable: 文档存储写入失败
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    pub fn place_order(&self, order: NewOrder) -> ApiResult<OrderReceipt> {
        let record = OrderRecord {
            order,
            created_at: self.clock.now(),
        };
        let id = create_record(self.documents.as_ref(), collections::ORDERS, &record)?;

        info!(order_id = %id, "订单已保存");
        Ok(OrderReceipt {
            success: true,
            message: ORDER_SAVED_MESSAGE.to_string(),
            id,
        })
    }

    /// 订单列表（按 createdAt 降序）
    pub fn list_orders(&self) -> ApiResult<Vec<StoredOrder>> {
        let documents = self
            .documents
            .list(collections::ORDERS, Some(OrderBy::CreatedAtDesc))?;

        let mut orders = Vec::with_capacity(documents.len());
        for doc in documents {
            let record: OrderRecord = doc.decode()?;
            orders.push(StoredOrder {
                order: record.order.into_order(doc.id),
                created_at: record.created_at,
            });
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// 按ID查找订单
    pub fn find_order(&self, order_id: &str) -> ApiResult<Order> {
        self.list_orders()?
            .into_iter()
            .map(|stored| stored.order)
            .find(|order| order.id == order_id)
            .ok_or_else(|| ApiError::NotFound(format!("Order(id={})", order_id)))
    }

    /// 批量导入 CSV 订单（沿用文件中的订单ID,重复导入覆盖）
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn import_csv(&self, path: &Path) -> ApiResult<Vec<Order>> {
        let orders = OrderCsvImporter::import_file(path)?;
        let created_at = self.clock.now();

        for order in &orders {
            let record = OrderRecord {
                order: NewOrder {
                    customer_id: order.customer_id.clone(),
                    status: order.status,
                    delivery_address: order.delivery_address.clone(),
                    scheduled_date: order.scheduled_date.clone(),
                    priority: order.priority,
                    items: order.items.clone(),
                    required_production_time: order.required_production_time,
                    estimated_delivery_time: order.estimated_delivery_time,
                    required_vehicle_type: order.required_vehicle_type.clone(),
                },
                created_at,
            };
            upsert_record(self.documents.as_ref(), collections::ORDERS, &order.id, &record)?;
        }

        info!(orders = orders.len(), "CSV 订单已写入文档存储");
        Ok(orders)
    }
}
