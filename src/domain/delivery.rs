// ==========================================
// LogiFlow 排程引擎 - 配送领域模型
// ==========================================
// 职责: 配送排程与路线定义
// 红线: 配送开始时间不得早于对应生产排程结束时间
// ==========================================

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::fleet::GeoPoint;
use crate::domain::order::hours_to_duration;
use crate::domain::types::ScheduleStatus;

// ==========================================
// Route - 配送路线
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance: f64, // 公里
    pub duration: f64, // 小时
    pub waypoints: Vec<[f64; 2]>,
}

impl Route {
    /// 路线时长
    pub fn travel_time(&self) -> Duration {
        hours_to_duration(self.duration)
    }

    /// 终点坐标（最后一个途经点）
    pub fn destination(&self) -> Option<GeoPoint> {
        self.waypoints.last().copied().map(GeoPoint::from_waypoint)
    }

    /// 起点坐标（第一个途经点）
    pub fn origin(&self) -> Option<GeoPoint> {
        self.waypoints.first().copied().map(GeoPoint::from_waypoint)
    }
}

// ==========================================
// DeliverySchedule - 配送排程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySchedule {
    pub id: String,
    pub order_id: String,
    pub production_schedule_id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    pub start_time: NaiveDateTime,
    pub estimated_arrival: NaiveDateTime,
    pub status: ScheduleStatus,
    pub route: Route,
    // 实际到达时间（完成时记录）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_arrival: Option<NaiveDateTime>,
}

impl DeliverySchedule {
    /// 计划配送时长
    pub fn estimated_duration(&self) -> Duration {
        self.estimated_arrival - self.start_time
    }

    /// 实际配送时长（未完成时为 None）
    pub fn actual_duration(&self) -> Option<Duration> {
        self.actual_arrival.map(|arrival| arrival - self.start_time)
    }

    /// 按当前路线重算预计到达时间
    pub fn refresh_arrival(&mut self) {
        self.estimated_arrival = self.start_time + self.route.travel_time();
    }
}
