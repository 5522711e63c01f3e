// ==========================================
// LogiFlow 排程引擎 - 生产排程引擎
// ==========================================
// 职责: 订单 → 生产线 + 时间窗口; 生产队列按优先级重排
// 输入: 订单 + 生产线池 + 当前生产排程集合
// 输出: 新生产排程（由状态容器负责追加）
// ==========================================
// 红线: 同一生产线的未完成窗口互不重叠
// 红线: 重排只移动时间窗口,不改变 line_id / efficiency
// ==========================================

use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::order::Order;
use crate::domain::production::ProductionSchedule;
use crate::domain::types::ScheduleStatus;
use crate::engine::error::{SchedulingError, SchedulingResult};
use crate::engine::resource_pool::LinePool;

/// 默认单线最大排队数
pub const DEFAULT_MAX_QUEUE_PER_LINE: usize = 8;

// ==========================================
// ProductionScheduler - 生产排程引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ProductionScheduler {
    max_queue_per_line: usize,
}

impl Default for ProductionScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUEUE_PER_LINE)
    }
}

impl ProductionScheduler {
    pub fn new(max_queue_per_line: usize) -> Self {
        Self {
            max_queue_per_line: max_queue_per_line.max(1),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为订单生成生产排程
    ///
    /// 规则:
    /// 1) requiredProductionTime 必须 > 0
    /// 2) 选择生产线（见 LinePool::select_slot）
    /// 3) 窗口 = [可开工时间, 可开工时间 + 生产时长]
    /// 4) 优先级权重 high=3 / medium=2 / low=1
    /// 5) 记录生产线效率快照
    ///
    /// 不修改订单,不追加排程
    ///
    /// # 错误
    /// - InvalidOrder: 时长非法或订单已有排程
    /// - NoCapacity: 无可用生产线
    #[instrument(skip(self, order, lines, schedules), fields(
        order_id = %order.id,
        priority = %order.priority,
        schedules_count = schedules.len()
    ))]
    pub fn schedule_production(
        &self,
        order: &Order,
        lines: &LinePool,
        schedules: &[ProductionSchedule],
        now: NaiveDateTime,
    ) -> SchedulingResult<ProductionSchedule> {
        order.validate().map_err(SchedulingError::InvalidOrder)?;

        if schedules.iter().any(|s| s.order_id == order.id) {
            warn!("订单已存在生产排程,拒绝重复排程");
            return Err(SchedulingError::InvalidOrder(format!(
                "订单{}已存在生产排程",
                order.id
            )));
        }

        let slot = lines.select_slot(schedules, now, self.max_queue_per_line)?;
        let start_time = slot.start_time;
        let end_time = start_time
            .checked_add_signed(order.production_duration())
            .ok_or_else(|| {
                warn!(start = %start_time, "生产窗口结束时间越界");
                SchedulingError::InvalidOrder(format!(
                    "订单{}的生产窗口结束时间越界: start={} requiredProductionTime={}",
                    order.id, start_time, order.required_production_time
                ))
            })?;

        let schedule = ProductionSchedule {
            id: Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            start_time,
            end_time,
            status: ScheduleStatus::Scheduled,
            priority: order.priority.weight(),
            line_id: slot.line_id,
            efficiency: slot.efficiency,
        };

        info!(
            schedule_id = %schedule.id,
            line_id = %schedule.line_id,
            start = %schedule.start_time,
            end = %schedule.end_time,
            "生产排程已生成"
        );
        Ok(schedule)
    }

    /// 生产队列重排
    ///
    /// 规则:
    /// 1) 全集按优先级降序稳定排序（同优先级保持插入顺序）
    /// 2) 按生产线分组,仅移动 scheduled 状态的排程
    /// 3) 每条线的首个可移动排程从锚点开工:
    ///    锚点 = max(可移动排程最早开工时间, 执行中排程最晚结束时间)
    /// 4) 其后排程紧接前一排程结束时间,结束时间 = 开工 + duration_of
    ///
    /// 排程集合与时长不变时,连续执行结果一致
    ///
    /// # 错误
    /// - InvalidOrder: 重排后窗口结束时间越界（调用方丢弃本次结果）
    #[instrument(skip(self, schedules, duration_of), fields(schedules_count = schedules.len()))]
    pub fn optimize_production_schedule<F>(
        &self,
        schedules: &mut Vec<ProductionSchedule>,
        duration_of: F,
    ) -> SchedulingResult<()>
    where
        F: Fn(&ProductionSchedule) -> Duration,
    {
        if schedules.is_empty() {
            debug!("生产排程为空,跳过重排");
            return Ok(());
        }

        // Vec::sort_by 为稳定排序
        schedules.sort_by(|a, b| b.priority.cmp(&a.priority));

        // 按生产线分组（保持排序后的顺序）
        let mut by_line: HashMap<String, Vec<usize>> = HashMap::new();
        let mut line_order: Vec<String> = Vec::new();
        for (idx, schedule) in schedules.iter().enumerate() {
            if !by_line.contains_key(&schedule.line_id) {
                line_order.push(schedule.line_id.clone());
            }
            by_line.entry(schedule.line_id.clone()).or_default().push(idx);
        }

        let mut moved = 0usize;
        for line_id in &line_order {
            let indices = &by_line[line_id];

            let floor = indices
                .iter()
                .map(|&i| &schedules[i])
                .filter(|s| s.status == ScheduleStatus::InProgress)
                .map(|s| s.end_time)
                .max();

            let movable: Vec<usize> = indices
                .iter()
                .copied()
                .filter(|&i| schedules[i].status == ScheduleStatus::Scheduled)
                .collect();

            let earliest = match movable.iter().map(|&i| schedules[i].start_time).min() {
                Some(t) => t,
                None => continue,
            };
            let mut cursor = match floor {
                Some(f) if f > earliest => f,
                _ => earliest,
            };

            for &i in &movable {
                let duration = duration_of(&schedules[i]);
                let schedule = &mut schedules[i];
                if schedule.start_time != cursor {
                    moved += 1;
                }
                let end_time = cursor.checked_add_signed(duration).ok_or_else(|| {
                    SchedulingError::InvalidOrder(format!(
                        "订单{}重排后的生产窗口结束时间越界: start={}",
                        schedule.order_id, cursor
                    ))
                })?;
                schedule.start_time = cursor;
                schedule.end_time = end_time;
                cursor = end_time;
            }
        }

        info!(lines = line_order.len(), moved, "生产队列重排完成");
        Ok(())
    }
}
