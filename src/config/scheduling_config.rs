// ==========================================
// LogiFlow 排程引擎 - 排程配置快照
// ==========================================
// 职责: 启动时一次性读取配置,装配引擎与资源池
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::config_manager::{
    default_drivers, default_production_lines, default_vehicles, DEFAULT_AVERAGE_SPEED_KMH,
};
use crate::config::scheduling_config_trait::{ConfigResult, SchedulingConfigReader};
use crate::domain::fleet::{Driver, GeoPoint, Vehicle};
use crate::domain::production::ProductionLine;
use crate::engine::production_scheduler::{ProductionScheduler, DEFAULT_MAX_QUEUE_PER_LINE};
use crate::engine::resource_pool::{DriverPool, LinePool, VehiclePool};
use crate::engine::route_optimizer::{RouteOptimizer, DEFAULT_CLUSTER_RADIUS_KM};
use crate::engine::routing::StraightLineRouter;

/// 排程配置快照（不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfig {
    pub cluster_radius_km: f64,
    pub average_speed_kmh: f64,
    pub max_queue_per_line: usize,
    pub depot: GeoPoint,
    pub production_lines: Vec<ProductionLine>,
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub gazetteer: HashMap<String, GeoPoint>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            cluster_radius_km: DEFAULT_CLUSTER_RADIUS_KM,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            max_queue_per_line: DEFAULT_MAX_QUEUE_PER_LINE,
            depot: GeoPoint::new(0.0, 0.0),
            production_lines: default_production_lines(),
            vehicles: default_vehicles(),
            drivers: default_drivers(),
            gazetteer: HashMap::new(),
        }
    }
}

impl SchedulingConfig {
    /// 从配置读取器加载快照
    pub async fn load(reader: &dyn SchedulingConfigReader) -> ConfigResult<Self> {
        let config = Self {
            cluster_radius_km: reader.get_cluster_radius_km().await?,
            average_speed_kmh: reader.get_average_speed_kmh().await?,
            max_queue_per_line: reader.get_max_queue_per_line().await?,
            depot: reader.get_depot_location().await?,
            production_lines: reader.get_production_lines().await?,
            vehicles: reader.get_vehicles().await?,
            drivers: reader.get_drivers().await?,
            gazetteer: reader.get_gazetteer().await?,
        };

        tracing::info!(
            lines = config.production_lines.len(),
            vehicles = config.vehicles.len(),
            drivers = config.drivers.len(),
            radius_km = config.cluster_radius_km,
            "排程配置已加载"
        );
        Ok(config)
    }

    pub fn router(&self) -> StraightLineRouter {
        StraightLineRouter::new(self.depot, self.average_speed_kmh)
            .with_gazetteer(self.gazetteer.clone())
    }

    pub fn production_scheduler(&self) -> ProductionScheduler {
        ProductionScheduler::new(self.max_queue_per_line)
    }

    pub fn route_optimizer(&self) -> RouteOptimizer {
        RouteOptimizer::new(self.cluster_radius_km)
    }

    pub fn line_pool(&self) -> LinePool {
        LinePool::new(self.production_lines.clone())
    }

    pub fn vehicle_pool(&self) -> VehiclePool {
        VehiclePool::new(self.vehicles.clone())
    }

    pub fn driver_pool(&self) -> DriverPool {
        DriverPool::new(self.drivers.clone())
    }
}
