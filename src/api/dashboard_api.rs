// ==========================================
// LogiFlow 排程引擎 - 看板 API
// ==========================================
// 职责: 效率指标与排程/资源概览查询
// 红线: 只读,不修改排程状态
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::app::scheduling_store::SchedulingStore;
use crate::domain::delivery::DeliverySchedule;
use crate::domain::fleet::Vehicle;
use crate::domain::production::ProductionSchedule;
use crate::engine::analytics::EfficiencyReport;

pub struct DashboardApi {
    store: Arc<SchedulingStore>,
}

impl DashboardApi {
    pub fn new(store: Arc<SchedulingStore>) -> Self {
        Self { store }
    }

    /// 效率报表
    pub fn get_efficiency_report(&self) -> ApiResult<EfficiencyReport> {
        Ok(self.store.efficiency_report()?)
    }

    /// 生产效率 [0,1],无排程时为 0
    pub fn get_production_efficiency(&self) -> ApiResult<f64> {
        Ok(self.store.production_efficiency()?)
    }

    /// 配送效率 [0,1],无已完成配送时为 0
    pub fn get_delivery_efficiency(&self) -> ApiResult<f64> {
        Ok(self.store.delivery_efficiency()?)
    }

    pub fn list_production_schedules(&self) -> ApiResult<Vec<ProductionSchedule>> {
        Ok(self.store.production_schedules()?)
    }

    pub fn list_delivery_schedules(&self) -> ApiResult<Vec<DeliverySchedule>> {
        Ok(self.store.delivery_schedules()?)
    }

    pub fn list_available_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        Ok(self.store.available_vehicles()?)
    }
}
