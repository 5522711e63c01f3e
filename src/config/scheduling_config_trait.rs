// ==========================================
// LogiFlow 排程引擎 - 排程配置读取 Trait
// ==========================================
// 职责: 定义排程装配所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;

use crate::domain::fleet::{Driver, GeoPoint, Vehicle};
use crate::domain::production::ProductionLine;

/// 配置读取结果
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// SchedulingConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、测试 Mock
#[async_trait]
pub trait SchedulingConfigReader: Send + Sync {
    // ===== 路线 =====

    /// 配送聚类半径（公里）
    ///
    /// # 默认值
    /// - 25.0
    async fn get_cluster_radius_km(&self) -> ConfigResult<f64>;

    /// 直线估算平均车速（公里/小时）
    ///
    /// # 默认值
    /// - 50.0
    async fn get_average_speed_kmh(&self) -> ConfigResult<f64>;

    /// 配送中心坐标
    ///
    /// # 默认值
    /// - (0, 0)
    async fn get_depot_location(&self) -> ConfigResult<GeoPoint>;

    /// 地址 → 坐标 对照表
    async fn get_gazetteer(&self) -> ConfigResult<HashMap<String, GeoPoint>>;

    // ===== 资源池 =====

    /// 单条生产线允许的未完成排程数上限
    ///
    /// # 默认值
    /// - 8
    async fn get_max_queue_per_line(&self) -> ConfigResult<usize>;

    async fn get_production_lines(&self) -> ConfigResult<Vec<ProductionLine>>;

    async fn get_vehicles(&self) -> ConfigResult<Vec<Vehicle>>;

    async fn get_drivers(&self) -> ConfigResult<Vec<Driver>>;
}
