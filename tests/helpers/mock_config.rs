// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use std::collections::HashMap;

use logiflow_scheduler::config::{ConfigResult, SchedulingConfigReader};
use logiflow_scheduler::domain::{Driver, GeoPoint, ProductionLine, Vehicle};
use logiflow_scheduler::VehicleStatus;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub cluster_radius_km: f64,
    pub average_speed_kmh: f64,
    pub max_queue_per_line: usize,
    pub depot: GeoPoint,
    pub gazetteer: HashMap<String, GeoPoint>,
    pub production_lines: Vec<ProductionLine>,
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
}

impl MockConfig {
    /// 创建默认配置: 一条线、一辆车、一名司机
    pub fn default() -> Self {
        Self {
            cluster_radius_km: 25.0,
            average_speed_kmh: 50.0,
            max_queue_per_line: 8,
            depot: GeoPoint::new(0.0, 0.0),
            gazetteer: HashMap::new(),
            production_lines: vec![ProductionLine::new("line-1", 0.85)],
            vehicles: vec![mock_vehicle("vehicle-1", 100)],
            drivers: vec![Driver::new("driver-1", "Ana")],
        }
    }

    /// 多线多车配置
    pub fn with_fleet(lines: usize, vehicles: usize, drivers: usize) -> Self {
        let mut config = Self::default();
        config.production_lines = (1..=lines)
            .map(|i| ProductionLine::new(format!("line-{}", i), 0.8))
            .collect();
        config.vehicles = (1..=vehicles)
            .map(|i| mock_vehicle(&format!("vehicle-{}", i), 100))
            .collect();
        config.drivers = (1..=drivers)
            .map(|i| Driver::new(format!("driver-{}", i), format!("Driver {}", i)))
            .collect();
        config
    }

    /// 单线排队上限
    pub fn with_max_queue(mut self, max_queue_per_line: usize) -> Self {
        self.max_queue_per_line = max_queue_per_line;
        self
    }

    /// 聚类半径
    pub fn with_radius(mut self, cluster_radius_km: f64) -> Self {
        self.cluster_radius_km = cluster_radius_km;
        self
    }
}

pub fn mock_vehicle(id: &str, capacity: u32) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        plate_number: format!("PL-{}", id),
        vehicle_type: "truck".to_string(),
        status: VehicleStatus::Available,
        current_location: None,
        capacity,
    }
}

#[async_trait]
impl SchedulingConfigReader for MockConfig {
    async fn get_cluster_radius_km(&self) -> ConfigResult<f64> {
        Ok(self.cluster_radius_km)
    }

    async fn get_average_speed_kmh(&self) -> ConfigResult<f64> {
        Ok(self.average_speed_kmh)
    }

    async fn get_depot_location(&self) -> ConfigResult<GeoPoint> {
        Ok(self.depot)
    }

    async fn get_gazetteer(&self) -> ConfigResult<HashMap<String, GeoPoint>> {
        Ok(self.gazetteer.clone())
    }

    async fn get_max_queue_per_line(&self) -> ConfigResult<usize> {
        Ok(self.max_queue_per_line)
    }

    async fn get_production_lines(&self) -> ConfigResult<Vec<ProductionLine>> {
        Ok(self.production_lines.clone())
    }

    async fn get_vehicles(&self) -> ConfigResult<Vec<Vehicle>> {
        Ok(self.vehicles.clone())
    }

    async fn get_drivers(&self) -> ConfigResult<Vec<Driver>> {
        Ok(self.drivers.clone())
    }
}
