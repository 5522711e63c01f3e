// ==========================================
// LogiFlow 排程引擎 - 效率分析
// ==========================================
// 职责: 从排程集合计算生产效率、配送效率与看板指标
// 红线: 分析函数永不失败,空输入返回 0
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::delivery::DeliverySchedule;
use crate::domain::production::ProductionSchedule;
use crate::domain::types::ScheduleStatus;
use crate::engine::resource_pool::LineLoad;

/// 生产效率: 所有生产排程效率快照的均值
///
/// 空集合返回 0
pub fn production_efficiency(schedules: &[ProductionSchedule]) -> f64 {
    if schedules.is_empty() {
        return 0.0;
    }
    let total: f64 = schedules.iter().map(|s| s.efficiency).sum();
    (total / schedules.len() as f64).clamp(0.0, 1.0)
}

/// 配送效率: 已完成配送的 计划时长/实际时长 均值,单项截断到 [0,1]
///
/// - 无已完成配送返回 0
/// - 实际时长 ≤ 0（瞬时送达）记为 1
pub fn delivery_efficiency(schedules: &[DeliverySchedule]) -> f64 {
    let ratios: Vec<f64> = completed(schedules)
        .filter_map(|s| {
            let actual = s.actual_duration()?.num_milliseconds() as f64;
            let estimated = s.estimated_duration().num_milliseconds() as f64;
            if actual <= 0.0 {
                return Some(1.0);
            }
            Some((estimated / actual).clamp(0.0, 1.0))
        })
        .collect();

    if ratios.is_empty() {
        return 0.0;
    }
    ratios.iter().sum::<f64>() / ratios.len() as f64
}

/// 准时率: 实际到达 ≤ 预计到达 的已完成配送占比
pub fn on_time_rate(schedules: &[DeliverySchedule]) -> f64 {
    let mut total = 0usize;
    let mut on_time = 0usize;
    for s in completed(schedules) {
        if let Some(actual) = s.actual_arrival {
            total += 1;
            if actual <= s.estimated_arrival {
                on_time += 1;
            }
        }
    }
    if total == 0 {
        return 0.0;
    }
    on_time as f64 / total as f64
}

fn completed(schedules: &[DeliverySchedule]) -> impl Iterator<Item = &DeliverySchedule> {
    schedules
        .iter()
        .filter(|s| s.status == ScheduleStatus::Completed)
}

// ==========================================
// 看板报表
// ==========================================

/// 按状态计数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    fn from_statuses(statuses: impl Iterator<Item = ScheduleStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                ScheduleStatus::Scheduled => counts.scheduled += 1,
                ScheduleStatus::InProgress => counts.in_progress += 1,
                ScheduleStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }
}

/// 效率报表（看板展示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyReport {
    pub production_efficiency: f64,
    pub delivery_efficiency: f64,
    pub on_time_rate: f64,
    pub production: StatusCounts,
    pub delivery: StatusCounts,
    pub line_loads: Vec<LineLoad>,
}

impl EfficiencyReport {
    pub fn build(
        production: &[ProductionSchedule],
        delivery: &[DeliverySchedule],
        line_loads: Vec<LineLoad>,
    ) -> Self {
        Self {
            production_efficiency: production_efficiency(production),
            delivery_efficiency: delivery_efficiency(delivery),
            on_time_rate: on_time_rate(delivery),
            production: StatusCounts::from_statuses(production.iter().map(|s| s.status)),
            delivery: StatusCounts::from_statuses(delivery.iter().map(|s| s.status)),
            line_loads,
        }
    }
}
