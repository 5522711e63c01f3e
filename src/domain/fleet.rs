// ==========================================
// LogiFlow 排程引擎 - 车队领域模型
// ==========================================
// 职责: 车辆、司机、地理坐标
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::VehicleStatus;

/// 平均地球半径（公里）
const EARTH_RADIUS_KM: f64 = 6371.0;

// ==========================================
// GeoPoint - 经纬度坐标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 球面距离（公里, haversine）
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// 转换为路线途经点 [lat, lng]
    pub fn as_waypoint(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    pub fn from_waypoint(waypoint: [f64; 2]) -> Self {
        Self::new(waypoint[0], waypoint[1])
    }
}

// ==========================================
// Vehicle - 配送车辆
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub plate_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoPoint>,
    #[serde(default = "default_capacity")]
    pub capacity: u32, // 装载上限（件）
}

fn default_capacity() -> u32 {
    u32::MAX
}

impl Vehicle {
    /// 是否可以装载指定件数与车型
    pub fn fits(&self, load: u32, required_type: Option<&str>) -> bool {
        let type_ok = required_type
            .map(|t| self.vehicle_type.eq_ignore_ascii_case(t))
            .unwrap_or(true);
        type_ok && self.capacity >= load
    }
}

// ==========================================
// Driver - 司机
// ==========================================
// 可用性: 未绑定在执行中的配送排程即为可用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    #[serde(default)]
    pub name: String,
    // 最近一次释放时间（用于最久未用优先）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_released_at: Option<NaiveDateTime>,
}

impl Driver {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            last_released_at: None,
        }
    }
}
