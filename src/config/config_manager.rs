// ==========================================
// LogiFlow 排程引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::scheduling_config_trait::{ConfigResult, SchedulingConfigReader};
use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::fleet::{Driver, GeoPoint, Vehicle};
use crate::domain::production::ProductionLine;
use crate::domain::types::VehicleStatus;
use crate::engine::production_scheduler::DEFAULT_MAX_QUEUE_PER_LINE;
use crate::engine::route_optimizer::DEFAULT_CLUSTER_RADIUS_KM;

/// 默认平均车速（公里/小时）
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 50.0;

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 会对传入连接再次应用统一 PRAGMA 并建表（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
            ensure_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3",
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::debug!(config_key = key, "配置已写入");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 读取 JSON 配置;缺失返回 None,格式错误告警后返回 None
    fn get_json_config<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<Option<T>> {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(None),
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    error = %e,
                    "配置格式错误，使用默认值"
                );
                Ok(None)
            }
        }
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// SchedulingConfigReader Trait 实现
// ==========================================
#[async_trait]
impl SchedulingConfigReader for ConfigManager {
    // ===== 路线 =====

    async fn get_cluster_radius_km(&self) -> ConfigResult<f64> {
        let value = self.get_config_or_default(config_keys::CLUSTER_RADIUS_KM, "25.0")?;
        Ok(value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(DEFAULT_CLUSTER_RADIUS_KM))
    }

    async fn get_average_speed_kmh(&self) -> ConfigResult<f64> {
        let value = self.get_config_or_default(config_keys::AVERAGE_SPEED_KMH, "50.0")?;
        Ok(value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_AVERAGE_SPEED_KMH))
    }

    async fn get_depot_location(&self) -> ConfigResult<GeoPoint> {
        Ok(self
            .get_json_config::<GeoPoint>(config_keys::DEPOT_LOCATION)?
            .unwrap_or_else(|| GeoPoint::new(0.0, 0.0)))
    }

    async fn get_gazetteer(&self) -> ConfigResult<HashMap<String, GeoPoint>> {
        Ok(self
            .get_json_config::<HashMap<String, GeoPoint>>(config_keys::GAZETTEER)?
            .unwrap_or_default())
    }

    // ===== 资源池 =====

    async fn get_max_queue_per_line(&self) -> ConfigResult<usize> {
        let value = self.get_config_or_default(config_keys::MAX_QUEUE_PER_LINE, "8")?;
        Ok(value
            .parse::<usize>()
            .ok()
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_QUEUE_PER_LINE))
    }

    async fn get_production_lines(&self) -> ConfigResult<Vec<ProductionLine>> {
        Ok(self
            .get_json_config::<Vec<ProductionLine>>(config_keys::PRODUCTION_LINES)?
            .unwrap_or_else(default_production_lines))
    }

    async fn get_vehicles(&self) -> ConfigResult<Vec<Vehicle>> {
        Ok(self
            .get_json_config::<Vec<Vehicle>>(config_keys::VEHICLES)?
            .unwrap_or_else(default_vehicles))
    }

    async fn get_drivers(&self) -> ConfigResult<Vec<Driver>> {
        Ok(self
            .get_json_config::<Vec<Driver>>(config_keys::DRIVERS)?
            .unwrap_or_else(default_drivers))
    }
}

// ==========================================
// 缺省资源池（未配置时的单线/单车/单司机）
// ==========================================

pub fn default_production_lines() -> Vec<ProductionLine> {
    vec![ProductionLine::new("line-1", 0.85)]
}

pub fn default_vehicles() -> Vec<Vehicle> {
    vec![Vehicle {
        id: "vehicle-1".to_string(),
        plate_number: "ABC123".to_string(),
        vehicle_type: "truck".to_string(),
        status: VehicleStatus::Available,
        current_location: None,
        capacity: u32::MAX,
    }]
}

pub fn default_drivers() -> Vec<Driver> {
    vec![Driver::new("driver-1", "")]
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 路线
    pub const CLUSTER_RADIUS_KM: &str = "cluster_radius_km";
    pub const AVERAGE_SPEED_KMH: &str = "average_speed_kmh";
    pub const DEPOT_LOCATION: &str = "depot_location"; // {"lat":..,"lng":..}
    pub const GAZETTEER: &str = "gazetteer"; // {"地址": {"lat":..,"lng":..}}

    // 资源池
    pub const MAX_QUEUE_PER_LINE: &str = "max_queue_per_line";
    pub const PRODUCTION_LINES: &str = "production_lines"; // JSON 数组
    pub const VEHICLES: &str = "vehicles"; // JSON 数组
    pub const DRIVERS: &str = "drivers"; // JSON 数组
}
