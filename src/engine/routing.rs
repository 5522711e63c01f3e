// ==========================================
// LogiFlow 排程引擎 - 路线规划协作方
// ==========================================
// 职责: 给定配送地址返回 {distance, duration, waypoints}
// 说明: 引擎把路线规划当作黑盒,默认实现为直线估算器
// ==========================================

use std::collections::HashMap;

use crate::domain::delivery::Route;
use crate::domain::fleet::GeoPoint;
use crate::engine::error::{SchedulingError, SchedulingResult};

/// 单段行程估算
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub distance_km: f64,
    pub duration_h: f64,
}

/// 路线规划接口
pub trait RoutePlanner: Send + Sync {
    /// 从配送中心到指定地址的路线
    fn plan_route(&self, address: &str) -> SchedulingResult<Route>;

    /// 两点之间的行程估算（路线重排时使用）
    fn leg(&self, from: GeoPoint, to: GeoPoint) -> Leg;

    /// 配送中心坐标
    fn depot(&self) -> GeoPoint;
}

// ==========================================
// StraightLineRouter - 直线估算器
// ==========================================
// 地址解析: 先按 "lat,lng" 解析,再查地名表
// 时长 = 球面距离 / 平均车速
#[derive(Debug, Clone)]
pub struct StraightLineRouter {
    depot: GeoPoint,
    average_speed_kmh: f64,
    gazetteer: HashMap<String, GeoPoint>,
}

impl StraightLineRouter {
    pub fn new(depot: GeoPoint, average_speed_kmh: f64) -> Self {
        Self {
            depot,
            average_speed_kmh,
            gazetteer: HashMap::new(),
        }
    }

    /// 批量登记地址坐标
    pub fn with_gazetteer(mut self, entries: HashMap<String, GeoPoint>) -> Self {
        for (address, point) in entries {
            self.register(&address, point);
        }
        self
    }

    /// 登记单个地址坐标
    pub fn register(&mut self, address: &str, point: GeoPoint) {
        self.gazetteer.insert(normalize_address(address), point);
    }

    /// 地址 → 坐标
    pub fn resolve(&self, address: &str) -> Option<GeoPoint> {
        parse_coordinates(address).or_else(|| self.gazetteer.get(&normalize_address(address)).copied())
    }
}

impl RoutePlanner for StraightLineRouter {
    fn plan_route(&self, address: &str) -> SchedulingResult<Route> {
        let destination = self
            .resolve(address)
            .ok_or_else(|| SchedulingError::RouteUnavailable(address.to_string()))?;
        let leg = self.leg(self.depot, destination);

        Ok(Route {
            distance: leg.distance_km,
            duration: leg.duration_h,
            waypoints: vec![self.depot.as_waypoint(), destination.as_waypoint()],
        })
    }

    fn leg(&self, from: GeoPoint, to: GeoPoint) -> Leg {
        let distance_km = from.distance_km(&to);
        let duration_h = if self.average_speed_kmh > 0.0 {
            distance_km / self.average_speed_kmh
        } else {
            0.0
        };
        Leg {
            distance_km,
            duration_h,
        }
    }

    fn depot(&self) -> GeoPoint {
        self.depot
    }
}

fn normalize_address(address: &str) -> String {
    address.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// 解析 "lat,lng" 形式的地址
fn parse_coordinates(address: &str) -> Option<GeoPoint> {
    let (lat, lng) = address.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Some(GeoPoint::new(lat, lng))
    } else {
        None
    }
}
