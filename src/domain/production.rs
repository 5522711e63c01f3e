// ==========================================
// LogiFlow 排程引擎 - 生产领域模型
// ==========================================
// 职责: 生产线与生产排程定义
// 红线: 一条生产线同一时刻最多承载一个生产窗口
// ==========================================

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::ScheduleStatus;

// ==========================================
// ProductionLine - 生产线
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLine {
    pub id: String,
    pub efficiency: f64, // 效率 [0,1]
    #[serde(default = "default_in_service")]
    pub in_service: bool, // 是否在役（停线时不参与分配）
}

fn default_in_service() -> bool {
    true
}

impl ProductionLine {
    pub fn new(id: impl Into<String>, efficiency: f64) -> Self {
        Self {
            id: id.into(),
            efficiency: efficiency.clamp(0.0, 1.0),
            in_service: true,
        }
    }
}

// ==========================================
// ProductionSchedule - 生产排程
// ==========================================
// 一个排程对应且仅对应一个订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSchedule {
    pub id: String,
    pub order_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: ScheduleStatus,
    pub priority: u8,    // 优先级权重 (3/2/1)
    pub line_id: String,
    pub efficiency: f64, // 分配时生产线效率快照
}

impl ProductionSchedule {
    /// 排程窗口时长
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// 窗口是否与 [start, end) 重叠
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && start < self.end_time
    }
}
