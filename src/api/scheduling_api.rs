// ==========================================
// LogiFlow 排程引擎 - 排程 API
// ==========================================
// 职责: 对已下单订单执行生产/配送排程与重排,并把排程写入文档存储
// 架构: API 层 → SchedulingStore（锁内持久化钩子）→ Engine 层
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api::error::ApiResult;
use crate::api::order_api::OrderApi;
use crate::app::scheduling_store::SchedulingStore;
use crate::domain::delivery::DeliverySchedule;
use crate::domain::production::ProductionSchedule;
use crate::engine::error::{SchedulingError, SchedulingResult};
use crate::engine::route_optimizer::RouteOptimizationSummary;
use crate::repository::document_store::{collections, upsert_record, DocumentStore};

/// 批量排程结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchScheduleResult {
    pub scheduled: Vec<ProductionSchedule>,
    pub failed: Vec<ScheduleFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFailure {
    pub order_id: String,
    pub code: String,
    pub message: String,
}

// ==========================================
// SchedulingApi
// ==========================================
pub struct SchedulingApi {
    store: Arc<SchedulingStore>,
    orders: Arc<OrderApi>,
    documents: Arc<dyn DocumentStore>,
}

impl SchedulingApi {
    pub fn new(
        store: Arc<SchedulingStore>,
        orders: Arc<OrderApi>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            store,
            orders,
            documents,
        }
    }

    fn persist<T: Serialize>(&self, collection: &str, id: &str, record: &T) -> SchedulingResult<()> {
        upsert_record(self.documents.as_ref(), collection, id, record).map_err(SchedulingError::from)
    }

    fn persist_production(&self, schedule: &ProductionSchedule) -> SchedulingResult<()> {
        self.persist(collections::PRODUCTION_SCHEDULES, &schedule.id, schedule)
    }

    fn persist_delivery(&self, schedule: &DeliverySchedule) -> SchedulingResult<()> {
        self.persist(collections::DELIVERY_SCHEDULES, &schedule.id, schedule)
    }

    // ==========================================
    // 生产排程
    // ==========================================

    /// 为已下单订单生成生产排程
    #[instrument(skip(self))]
    pub fn schedule_order(&self, order_id: &str) -> ApiResult<ProductionSchedule> {
        let order = match self.store.get_order(order_id) {
            Ok(order) => order,
            Err(SchedulingError::NotFound { .. }) => self.orders.find_order(order_id)?,
            Err(e) => return Err(e.into()),
        };
        let schedule = self
            .store
            .schedule_production_with(&order, |ps| self.persist_production(ps))?;
        Ok(schedule)
    }

    /// 为文档存储中尚未排产的订单批量生成生产排程
    ///
    /// 单个订单失败不影响其余订单,失败原因逐条返回
    #[instrument(skip(self))]
    pub fn schedule_pending_orders(&self) -> ApiResult<BatchScheduleResult> {
        // 内存状态 + 已落库的排程（进程重启后内存为空）
        let mut scheduled_ids: Vec<String> = self
            .store
            .production_schedules()?
            .into_iter()
            .map(|s| s.order_id)
            .collect();
        for doc in self.documents.list(collections::PRODUCTION_SCHEDULES, None)? {
            let persisted: ProductionSchedule = doc.decode()?;
            scheduled_ids.push(persisted.order_id);
        }

        // 先下单的先排
        let mut pending = self.orders.list_orders()?;
        pending.reverse();

        let mut result = BatchScheduleResult::default();
        for stored in pending {
            let order = stored.order;
            if scheduled_ids.contains(&order.id) {
                continue;
            }
            match self
                .store
                .schedule_production_with(&order, |ps| self.persist_production(ps))
            {
                Ok(schedule) => result.scheduled.push(schedule),
                Err(e) => {
                    let api_error: crate::api::error::ApiError = e.into();
                    warn!(order_id = %order.id, error = %api_error, "订单排产失败");
                    result.failed.push(ScheduleFailure {
                        order_id: order.id.clone(),
                        code: api_error.code().to_string(),
                        message: api_error.to_string(),
                    });
                }
            }
        }

        info!(
            scheduled = result.scheduled.len(),
            failed = result.failed.len(),
            "批量排产完成"
        );
        Ok(result)
    }

    /// 生产队列重排并回写全部生产排程及被调整的配送排程
    pub fn optimize_production(&self) -> ApiResult<Vec<ProductionSchedule>> {
        let schedules = self.store.optimize_production_schedule_with(|all, realigned| {
            all.iter().try_for_each(|s| self.persist_production(s))?;
            realigned.iter().try_for_each(|d| self.persist_delivery(d))
        })?;
        Ok(schedules)
    }

    pub fn start_production(&self, schedule_id: &str) -> ApiResult<ProductionSchedule> {
        Ok(self
            .store
            .start_production_with(schedule_id, |ps| self.persist_production(ps))?)
    }

    pub fn complete_production(&self, schedule_id: &str) -> ApiResult<ProductionSchedule> {
        Ok(self
            .store
            .complete_production_with(schedule_id, |ps| self.persist_production(ps))?)
    }

    // ==========================================
    // 配送排程
    // ==========================================

    /// 为已排产订单生成配送排程
    #[instrument(skip(self))]
    pub fn schedule_delivery(&self, order_id: &str) -> ApiResult<DeliverySchedule> {
        let order = self.store.get_order(order_id)?;
        let production = self
            .store
            .production_schedules()?
            .into_iter()
            .find(|s| s.order_id == order_id)
            .ok_or_else(|| SchedulingError::not_found("ProductionSchedule", order_id))?;

        Ok(self
            .store
            .schedule_delivery_with(&order, &production, |ds| self.persist_delivery(ds))?)
    }

    /// 配送路线重排并回写全部配送排程
    pub fn optimize_routes(&self) -> ApiResult<RouteOptimizationSummary> {
        Ok(self.store.optimize_delivery_routes_with(|all| {
            all.iter().try_for_each(|d| self.persist_delivery(d))
        })?)
    }

    pub fn start_delivery(&self, delivery_id: &str) -> ApiResult<DeliverySchedule> {
        Ok(self
            .store
            .start_delivery_with(delivery_id, |ds| self.persist_delivery(ds))?)
    }

    pub fn complete_delivery(
        &self,
        delivery_id: &str,
        actual_arrival: NaiveDateTime,
    ) -> ApiResult<DeliverySchedule> {
        Ok(self
            .store
            .complete_delivery_with(delivery_id, actual_arrival, |ds| self.persist_delivery(ds))?)
    }
}
