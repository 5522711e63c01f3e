// ==========================================
// LogiFlow 排程引擎 - 资源池
// ==========================================
// 职责: 生产线/车辆/司机的有界资源池,显式占用与释放
// 红线: 一个资源同一时刻只绑定一个活动排程
// ==========================================
// 生产线: 占用关系由生产排程集合推导（line_id + 未完成状态）
// 车辆/司机: 显式 acquire / release,绑定到配送排程ID
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::domain::fleet::{Driver, GeoPoint, Vehicle};
use crate::domain::production::{ProductionLine, ProductionSchedule};
use crate::domain::types::VehicleStatus;
use crate::engine::error::{SchedulingError, SchedulingResult};

// ==========================================
// LinePool - 生产线池
// ==========================================

/// 生产线分配结果
#[derive(Debug, Clone, PartialEq)]
pub struct LineSlot {
    pub line_id: String,
    pub efficiency: f64,
    pub start_time: NaiveDateTime, // 可开工时间
}

/// 生产线负载快照（看板用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLoad {
    pub line_id: String,
    pub in_service: bool,
    pub live_schedules: usize,
    pub free_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct LinePool {
    lines: Vec<ProductionLine>,
}

impl LinePool {
    pub fn new(lines: Vec<ProductionLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[ProductionLine] {
        &self.lines
    }

    pub fn get(&self, line_id: &str) -> Option<&ProductionLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// 添加生产线（ID重复时覆盖效率与在役状态）
    pub fn add(&mut self, line: ProductionLine) {
        match self.lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }

    /// 设置生产线在役状态
    pub fn set_in_service(&mut self, line_id: &str, in_service: bool) -> SchedulingResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| SchedulingError::not_found("ProductionLine", line_id))?;
        line.in_service = in_service;
        Ok(())
    }

    /// 选择生产线
    ///
    /// 规则:
    /// 1) 仅考虑在役且排队数 < max_queue 的生产线
    /// 2) 可开工时间 = max(now, 该线未完成窗口的最晚结束时间)
    /// 3) 按 (可开工时间, 未完成排程数, 池内顺序) 取最小
    ///    空闲线都从 now 开工,因此等价于"最少负载优先";全忙时排到最早空出的线
    ///
    /// # 错误
    /// - NoCapacity: 无候选生产线
    pub fn select_slot(
        &self,
        schedules: &[ProductionSchedule],
        now: NaiveDateTime,
        max_queue: usize,
    ) -> SchedulingResult<LineSlot> {
        let mut best: Option<(NaiveDateTime, usize, usize)> = None;

        for (idx, line) in self.lines.iter().enumerate() {
            if !line.in_service {
                continue;
            }
            let (live, last_end) = live_load(schedules, &line.id);
            if live >= max_queue {
                debug!(line_id = %line.id, live, "生产线排队已满,跳过");
                continue;
            }
            let free_at = last_end.map(|end| end.max(now)).unwrap_or(now);
            let key = (free_at, live, idx);
            if best.map(|b| key < b).unwrap_or(true) {
                best = Some(key);
            }
        }

        let (start_time, _, idx) = best.ok_or_else(|| {
            SchedulingError::NoCapacity(format!(
                "{}条生产线均不可用（停线或排队已达上限{}）",
                self.lines.len(),
                max_queue
            ))
        })?;
        let line = &self.lines[idx];

        Ok(LineSlot {
            line_id: line.id.clone(),
            efficiency: line.efficiency,
            start_time,
        })
    }

    /// 各生产线负载快照
    pub fn loads(&self, schedules: &[ProductionSchedule]) -> Vec<LineLoad> {
        self.lines
            .iter()
            .map(|line| {
                let (live, free_at) = live_load(schedules, &line.id);
                LineLoad {
                    line_id: line.id.clone(),
                    in_service: line.in_service,
                    live_schedules: live,
                    free_at,
                }
            })
            .collect()
    }
}

/// 统计某生产线未完成排程数与最晚结束时间
fn live_load(schedules: &[ProductionSchedule], line_id: &str) -> (usize, Option<NaiveDateTime>) {
    schedules
        .iter()
        .filter(|s| s.line_id == line_id && s.status.is_live())
        .fold((0, None), |(count, last), s| {
            let last = match last {
                Some(t) if t >= s.end_time => Some(t),
                _ => Some(s.end_time),
            };
            (count + 1, last)
        })
}

// ==========================================
// VehiclePool - 车辆池
// ==========================================

#[derive(Debug, Clone, PartialEq)]
struct VehicleSlot {
    vehicle: Vehicle,
    bound_to: Option<String>, // 绑定的配送排程ID
}

#[derive(Debug, Clone, Default)]
pub struct VehiclePool {
    slots: Vec<VehicleSlot>,
}

impl VehiclePool {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            slots: vehicles
                .into_iter()
                .map(|vehicle| VehicleSlot {
                    vehicle,
                    bound_to: None,
                })
                .collect(),
        }
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.slots.iter().map(|s| s.vehicle.clone()).collect()
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.slots
            .iter()
            .find(|s| s.vehicle.id == vehicle_id)
            .map(|s| &s.vehicle)
    }

    pub fn add(&mut self, vehicle: Vehicle) {
        match self.slots.iter_mut().find(|s| s.vehicle.id == vehicle.id) {
            Some(slot) => slot.vehicle = vehicle,
            None => self.slots.push(VehicleSlot {
                vehicle,
                bound_to: None,
            }),
        }
    }

    /// 可分配: 状态为 available 且未绑定
    pub fn is_available(&self, vehicle_id: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.vehicle.id == vehicle_id && slot_available(s))
    }

    /// 当前可分配车辆
    pub fn available(&self) -> Vec<&Vehicle> {
        self.slots
            .iter()
            .filter(|s| slot_available(s))
            .map(|s| &s.vehicle)
            .collect()
    }

    /// 最优车辆选择
    ///
    /// 规则: 可用 + 车型/容量满足 → 容量最小者 → 距离目的地最近者 → 池内顺序
    /// 无位置信息的车辆距离视为无穷远
    pub fn select_best_fit(
        &self,
        load: u32,
        required_type: Option<&str>,
        destination: Option<GeoPoint>,
    ) -> Option<&Vehicle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| slot_available(s) && s.vehicle.fits(load, required_type))
            .min_by(|(ia, a), (ib, b)| {
                let da = proximity(&a.vehicle, destination);
                let db = proximity(&b.vehicle, destination);
                a.vehicle
                    .capacity
                    .cmp(&b.vehicle.capacity)
                    .then_with(|| da.partial_cmp(&db).unwrap_or(Ordering::Equal))
                    .then_with(|| ia.cmp(ib))
            })
            .map(|(_, s)| &s.vehicle)
    }

    /// 占用车辆
    pub fn acquire(&mut self, vehicle_id: &str, delivery_id: &str) -> SchedulingResult<()> {
        let slot = self.slot_mut(vehicle_id)?;
        if !slot_available(slot) {
            return Err(SchedulingError::InvalidSchedule(format!(
                "车辆{}已被占用或不可用: status={}, bound_to={:?}",
                vehicle_id, slot.vehicle.status, slot.bound_to
            )));
        }
        slot.bound_to = Some(delivery_id.to_string());
        Ok(())
    }

    /// 发车: 车辆状态 → in-transit
    pub fn dispatch(&mut self, vehicle_id: &str) -> SchedulingResult<()> {
        let slot = self.slot_mut(vehicle_id)?;
        slot.vehicle.status = VehicleStatus::InTransit;
        Ok(())
    }

    /// 释放车辆: 解除绑定,状态 → available,位置更新到最后送达点
    pub fn release(&mut self, vehicle_id: &str, location: Option<GeoPoint>) -> SchedulingResult<()> {
        let slot = self.slot_mut(vehicle_id)?;
        slot.bound_to = None;
        slot.vehicle.status = VehicleStatus::Available;
        if location.is_some() {
            slot.vehicle.current_location = location;
        }
        Ok(())
    }

    /// 设置车辆状态（维保/恢复）
    ///
    /// 已绑定的车辆不可转入维保
    pub fn set_status(&mut self, vehicle_id: &str, status: VehicleStatus) -> SchedulingResult<()> {
        let slot = self.slot_mut(vehicle_id)?;
        if slot.bound_to.is_some() && status != slot.vehicle.status {
            return Err(SchedulingError::transition(slot.vehicle.status, status));
        }
        slot.vehicle.status = status;
        Ok(())
    }

    fn slot_mut(&mut self, vehicle_id: &str) -> SchedulingResult<&mut VehicleSlot> {
        self.slots
            .iter_mut()
            .find(|s| s.vehicle.id == vehicle_id)
            .ok_or_else(|| SchedulingError::not_found("Vehicle", vehicle_id))
    }
}

fn slot_available(slot: &VehicleSlot) -> bool {
    slot.vehicle.status == VehicleStatus::Available && slot.bound_to.is_none()
}

fn proximity(vehicle: &Vehicle, destination: Option<GeoPoint>) -> f64 {
    match (vehicle.current_location, destination) {
        (Some(from), Some(to)) => from.distance_km(&to),
        _ => f64::INFINITY,
    }
}

// ==========================================
// DriverPool - 司机池
// ==========================================

#[derive(Debug, Clone, PartialEq)]
struct DriverSlot {
    driver: Driver,
    bound_to: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DriverPool {
    slots: Vec<DriverSlot>,
}

impl DriverPool {
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self {
            slots: drivers
                .into_iter()
                .map(|driver| DriverSlot {
                    driver,
                    bound_to: None,
                })
                .collect(),
        }
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.slots.iter().map(|s| s.driver.clone()).collect()
    }

    pub fn add(&mut self, driver: Driver) {
        match self.slots.iter_mut().find(|s| s.driver.id == driver.id) {
            Some(slot) => slot.driver = driver,
            None => self.slots.push(DriverSlot {
                driver,
                bound_to: None,
            }),
        }
    }

    pub fn is_available(&self, driver_id: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.driver.id == driver_id && s.bound_to.is_none())
    }

    /// 最久未用优先: 从未释放过的司机最先,其余按释放时间升序,再按池内顺序
    pub fn select_least_recently_used(&self) -> Option<&Driver> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.bound_to.is_none())
            .min_by(|(ia, a), (ib, b)| {
                a.driver
                    .last_released_at
                    .cmp(&b.driver.last_released_at)
                    .then_with(|| ia.cmp(ib))
            })
            .map(|(_, s)| &s.driver)
    }

    pub fn acquire(&mut self, driver_id: &str, delivery_id: &str) -> SchedulingResult<()> {
        let slot = self.slot_mut(driver_id)?;
        if let Some(bound) = &slot.bound_to {
            return Err(SchedulingError::InvalidSchedule(format!(
                "司机{}已绑定配送排程{}",
                driver_id, bound
            )));
        }
        slot.bound_to = Some(delivery_id.to_string());
        Ok(())
    }

    pub fn release(&mut self, driver_id: &str, at: NaiveDateTime) -> SchedulingResult<()> {
        let slot = self.slot_mut(driver_id)?;
        slot.bound_to = None;
        slot.driver.last_released_at = Some(at);
        Ok(())
    }

    fn slot_mut(&mut self, driver_id: &str) -> SchedulingResult<&mut DriverSlot> {
        self.slots
            .iter_mut()
            .find(|s| s.driver.id == driver_id)
            .ok_or_else(|| SchedulingError::not_found("Driver", driver_id))
    }
}
