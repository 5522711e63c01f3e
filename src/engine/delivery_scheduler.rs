// ==========================================
// LogiFlow 排程引擎 - 配送排程引擎
// ==========================================
// 职责: 订单 + 生产排程 → 车辆 + 司机 + 路线 + 预计到达
// 红线: 配送开始时间 = 生产结束时间（不得提前）
// ==========================================

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::delivery::DeliverySchedule;
use crate::domain::order::Order;
use crate::domain::production::ProductionSchedule;
use crate::domain::types::ScheduleStatus;
use crate::engine::error::{SchedulingError, SchedulingResult};
use crate::engine::resource_pool::{DriverPool, VehiclePool};
use crate::engine::routing::RoutePlanner;

// ==========================================
// DeliveryScheduler - 配送排程引擎
// ==========================================
pub struct DeliveryScheduler {
    // 无状态引擎
}

impl Default for DeliveryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryScheduler {
    pub fn new() -> Self {
        Self {}
    }

    /// 为已排产订单生成配送排程
    ///
    /// 规则:
    /// 1) 生产排程必须属于该订单
    /// 2) 规划路线（路线规划协作方）
    /// 3) 选车: 可用 + 车型/容量满足 → 最小容量 → 离目的地最近
    /// 4) 选司机: 最久未用优先
    /// 5) 开始时间 = 生产结束时间; 预计到达 = 开始 + 路线时长
    ///
    /// 不占用资源,不追加排程（由状态容器统一提交）
    ///
    /// # 错误
    /// - InvalidSchedule: 订单与生产排程不匹配,或订单已有配送排程
    /// - RouteUnavailable: 地址无法规划
    /// - NoVehicleAvailable / NoDriverAvailable: 资源池耗尽
    #[instrument(skip_all, fields(
        order_id = %order.id,
        production_schedule_id = %production.id
    ))]
    pub fn schedule_delivery(
        &self,
        order: &Order,
        production: &ProductionSchedule,
        vehicles: &VehiclePool,
        drivers: &DriverPool,
        router: &dyn RoutePlanner,
        existing: &[DeliverySchedule],
    ) -> SchedulingResult<DeliverySchedule> {
        if production.order_id != order.id {
            warn!(
                schedule_order_id = %production.order_id,
                "生产排程不属于该订单"
            );
            return Err(SchedulingError::InvalidSchedule(format!(
                "生产排程{}属于订单{},与订单{}不匹配",
                production.id, production.order_id, order.id
            )));
        }

        if existing.iter().any(|d| d.order_id == order.id) {
            return Err(SchedulingError::InvalidSchedule(format!(
                "订单{}已存在配送排程",
                order.id
            )));
        }

        let route = router.plan_route(&order.delivery_address)?;

        let load = order.total_quantity();
        let vehicle = vehicles
            .select_best_fit(load, order.required_vehicle_type.as_deref(), route.destination())
            .ok_or_else(|| SchedulingError::NoVehicleAvailable {
                order_id: order.id.clone(),
                load,
            })?;

        let driver = drivers
            .select_least_recently_used()
            .ok_or_else(|| SchedulingError::NoDriverAvailable(order.id.clone()))?;

        let start_time = production.end_time;
        let estimated_arrival = start_time + route.travel_time();

        let schedule = DeliverySchedule {
            id: Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            production_schedule_id: production.id.clone(),
            vehicle_id: vehicle.id.clone(),
            driver_id: driver.id.clone(),
            start_time,
            estimated_arrival,
            status: ScheduleStatus::Scheduled,
            route,
            actual_arrival: None,
        };

        info!(
            delivery_id = %schedule.id,
            vehicle_id = %schedule.vehicle_id,
            driver_id = %schedule.driver_id,
            distance_km = schedule.route.distance,
            eta = %schedule.estimated_arrival,
            "配送排程已生成"
        );
        Ok(schedule)
    }
}
