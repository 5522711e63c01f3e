// ==========================================
// LogiFlow 排程引擎 - 配送路线重排
// ==========================================
// 职责: 未发车配送按地理邻近聚类,簇内按最近邻重排路线
// 输出: 原配送排程集合,更新 route / estimatedArrival
// 红线: 不改变车辆/司机分配,不改变开始时间
// ==========================================
// 聚类: 按数组顺序贪心,加入第一个"种子点距离 ≤ 半径"的簇,否则新建簇
// 簇内: 从配送中心出发,每次前往最近的未访问点;距离相同取数组中靠前者
// 路线: 第 k 个到访点的路线 = 配送中心 → 前 k 个到访点（累计距离/时长）
// 簇即一次合并配送批次,预计到达时间按其在批次中的到访次序计算
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::delivery::{DeliverySchedule, Route};
use crate::domain::fleet::GeoPoint;
use crate::domain::types::ScheduleStatus;
use crate::engine::routing::RoutePlanner;

/// 默认聚类半径（公里）
pub const DEFAULT_CLUSTER_RADIUS_KM: f64 = 25.0;

/// 重排结果摘要
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteOptimizationSummary {
    pub clusters: usize,           // 簇数量
    pub rerouted: usize,           // 参与重排的配送数
    pub chain_distance_km: f64,    // 各簇串联行驶总里程
    pub direct_distance_km: f64,   // 逐单直送总里程（对照）
}

#[derive(Debug)]
struct Cluster {
    seed: GeoPoint,
    members: Vec<(usize, GeoPoint)>,
}

// ==========================================
// RouteOptimizer - 路线重排引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct RouteOptimizer {
    cluster_radius_km: f64,
}

impl Default for RouteOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER_RADIUS_KM)
    }
}

impl RouteOptimizer {
    pub fn new(cluster_radius_km: f64) -> Self {
        Self {
            cluster_radius_km: cluster_radius_km.max(0.0),
        }
    }

    pub fn cluster_radius_km(&self) -> f64 {
        self.cluster_radius_km
    }

    /// 配送路线重排
    ///
    /// 已发车、已完成或缺少终点坐标的配送保持不变
    #[instrument(skip(self, schedules, router), fields(
        schedules_count = schedules.len(),
        radius_km = self.cluster_radius_km
    ))]
    pub fn optimize_delivery_routes(
        &self,
        schedules: &mut [DeliverySchedule],
        router: &dyn RoutePlanner,
    ) -> RouteOptimizationSummary {
        let depot = router.depot();

        // 1. 待重排配送的终点
        let stops: Vec<(usize, GeoPoint)> = schedules
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status == ScheduleStatus::Scheduled)
            .filter_map(|(i, s)| s.route.destination().map(|d| (i, d)))
            .collect();

        // 2. 贪心聚类
        let clusters = self.cluster(&stops);

        let mut summary = RouteOptimizationSummary {
            clusters: clusters.len(),
            rerouted: stops.len(),
            ..Default::default()
        };

        // 3. 簇内最近邻
        for cluster in &clusters {
            let mut remaining = cluster.members.clone();

            let mut current = depot;
            let mut waypoints = vec![depot.as_waypoint()];
            let mut distance = 0.0;
            let mut duration = 0.0;

            while !remaining.is_empty() {
                let mut best = 0usize;
                let mut best_km = f64::INFINITY;
                for (pos, (_, point)) in remaining.iter().enumerate() {
                    let km = router.leg(current, *point).distance_km;
                    if km < best_km {
                        best = pos;
                        best_km = km;
                    }
                }
                let (idx, point) = remaining.remove(best);
                let leg = router.leg(current, point);

                distance += leg.distance_km;
                duration += leg.duration_h;
                waypoints.push(point.as_waypoint());
                summary.direct_distance_km += router.leg(depot, point).distance_km;

                let schedule = &mut schedules[idx];
                schedule.route = Route {
                    distance,
                    duration,
                    waypoints: waypoints.clone(),
                };
                schedule.refresh_arrival();
                current = point;
            }

            debug!(
                members = cluster.members.len(),
                chain_km = distance,
                "簇内路线已重排"
            );
            summary.chain_distance_km += distance;
        }

        info!(
            clusters = summary.clusters,
            rerouted = summary.rerouted,
            chain_km = summary.chain_distance_km,
            direct_km = summary.direct_distance_km,
            "配送路线重排完成"
        );
        summary
    }

    fn cluster(&self, stops: &[(usize, GeoPoint)]) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::new();
        for &(idx, point) in stops {
            match clusters
                .iter_mut()
                .find(|c| c.seed.distance_km(&point) <= self.cluster_radius_km)
            {
                Some(cluster) => cluster.members.push((idx, point)),
                None => clusters.push(Cluster {
                    seed: point,
                    members: vec![(idx, point)],
                }),
            }
        }
        clusters
    }
}
