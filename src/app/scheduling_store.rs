// ==========================================
// LogiFlow 排程引擎 - 排程状态容器
// ==========================================
// 职责: 持有订单/生产排程/配送排程/资源池,代调用方分派到各引擎
// 红线: 单一互斥锁保护全部集合;失败不提交任何部分结果
// ==========================================
// 提交方式: 在锁内对状态副本计算,全部步骤成功后整体替换
// 持久化钩子（*_with）在锁内、提交前执行,钩子失败则不提交
// 事件在释放锁之后发布
// ==========================================

use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, instrument, warn};

use crate::config::scheduling_config::SchedulingConfig;
use crate::domain::delivery::DeliverySchedule;
use crate::domain::fleet::{Driver, Vehicle};
use crate::domain::order::Order;
use crate::domain::production::{ProductionLine, ProductionSchedule};
use crate::domain::types::{is_forward, OrderItemStatus, OrderStatus, ScheduleStatus, VehicleStatus};
use crate::engine::analytics::{self, EfficiencyReport};
use crate::engine::clock::Clock;
use crate::engine::delivery_scheduler::DeliveryScheduler;
use crate::engine::error::{SchedulingError, SchedulingResult};
use crate::engine::events::{OptionalEventPublisher, SchedulingEvent, SchedulingEventType};
use crate::engine::production_scheduler::ProductionScheduler;
use crate::engine::resource_pool::{DriverPool, LinePool, VehiclePool};
use crate::engine::route_optimizer::{RouteOptimizationSummary, RouteOptimizer};
use crate::engine::routing::RoutePlanner;

// ==========================================
// SchedulingState - 受保护的状态
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SchedulingState {
    pub orders: Vec<Order>,
    pub production_schedules: Vec<ProductionSchedule>,
    pub delivery_schedules: Vec<DeliverySchedule>,
    pub lines: LinePool,
    pub vehicles: VehiclePool,
    pub drivers: DriverPool,
}

impl SchedulingState {
    pub fn new(lines: LinePool, vehicles: VehiclePool, drivers: DriverPool) -> Self {
        Self {
            lines,
            vehicles,
            drivers,
            ..Default::default()
        }
    }

    fn order_mut(&mut self, order_id: &str) -> SchedulingResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| SchedulingError::not_found("Order", order_id))
    }

    fn production_mut(&mut self, schedule_id: &str) -> SchedulingResult<&mut ProductionSchedule> {
        self.production_schedules
            .iter_mut()
            .find(|s| s.id == schedule_id)
            .ok_or_else(|| SchedulingError::not_found("ProductionSchedule", schedule_id))
    }

    fn delivery_mut(&mut self, delivery_id: &str) -> SchedulingResult<&mut DeliverySchedule> {
        self.delivery_schedules
            .iter_mut()
            .find(|s| s.id == delivery_id)
            .ok_or_else(|| SchedulingError::not_found("DeliverySchedule", delivery_id))
    }

    /// 订单状态只前进不后退;已处于更后状态时保持不变
    fn advance_order(&mut self, order_id: &str, to: OrderStatus) -> SchedulingResult<()> {
        let order = self.order_mut(order_id)?;
        if is_forward(order.status, to) {
            order.status = to;
        }
        Ok(())
    }

    /// 生产窗口移动后,未发车配送的开始时间跟随所属生产排程的结束时间
    ///
    /// 返回被调整的配送排程
    fn realign_deliveries(&mut self) -> SchedulingResult<Vec<DeliverySchedule>> {
        let mut realigned = Vec::new();
        for delivery in self
            .delivery_schedules
            .iter_mut()
            .filter(|d| d.status == ScheduleStatus::Scheduled)
        {
            let production_end = self
                .production_schedules
                .iter()
                .find(|p| p.id == delivery.production_schedule_id)
                .map(|p| p.end_time)
                .ok_or_else(|| {
                    SchedulingError::not_found("ProductionSchedule", &delivery.production_schedule_id)
                })?;
            if delivery.start_time == production_end {
                continue;
            }
            let estimated_arrival = production_end
                .checked_add_signed(delivery.route.travel_time())
                .ok_or_else(|| {
                    SchedulingError::InvalidSchedule(format!(
                        "配送{}的预计到达时间越界: start={}",
                        delivery.id, production_end
                    ))
                })?;
            delivery.start_time = production_end;
            delivery.estimated_arrival = estimated_arrival;
            realigned.push(delivery.clone());
        }
        Ok(realigned)
    }

    fn advance_items(&mut self, order_id: &str, to: OrderItemStatus) -> SchedulingResult<()> {
        let order = self.order_mut(order_id)?;
        for item in order.items.iter_mut() {
            if is_forward(item.status, to) {
                item.status = to;
            }
        }
        Ok(())
    }
}

/// 排程状态迁移: 要求当前状态恰为 expected
fn step(current: ScheduleStatus, expected: ScheduleStatus, to: ScheduleStatus) -> SchedulingResult<()> {
    if current != expected || !is_forward(current, to) {
        return Err(SchedulingError::transition(current, to));
    }
    Ok(())
}

fn no_hook<T: ?Sized>(_: &T) -> SchedulingResult<()> {
    Ok(())
}

// ==========================================
// SchedulingStore - 状态容器
// ==========================================
pub struct SchedulingStore {
    state: Mutex<SchedulingState>,
    clock: Arc<dyn Clock>,
    router: Arc<dyn RoutePlanner>,
    production_scheduler: ProductionScheduler,
    delivery_scheduler: DeliveryScheduler,
    route_optimizer: RouteOptimizer,
    events: OptionalEventPublisher,
}

impl SchedulingStore {
    /// 创建状态容器（集合为空,资源池由调用方提供）
    pub fn new(state: SchedulingState, clock: Arc<dyn Clock>, router: Arc<dyn RoutePlanner>) -> Self {
        Self {
            state: Mutex::new(state),
            clock,
            router,
            production_scheduler: ProductionScheduler::default(),
            delivery_scheduler: DeliveryScheduler::new(),
            route_optimizer: RouteOptimizer::default(),
            events: OptionalEventPublisher::none(),
        }
    }

    /// 按配置快照装配
    pub fn from_config(config: &SchedulingConfig, clock: Arc<dyn Clock>) -> Self {
        let state = SchedulingState::new(config.line_pool(), config.vehicle_pool(), config.driver_pool());
        Self::new(state, clock, Arc::new(config.router()))
            .with_production_scheduler(config.production_scheduler())
            .with_route_optimizer(config.route_optimizer())
    }

    pub fn with_production_scheduler(mut self, scheduler: ProductionScheduler) -> Self {
        self.production_scheduler = scheduler;
        self
    }

    pub fn with_route_optimizer(mut self, optimizer: RouteOptimizer) -> Self {
        self.route_optimizer = optimizer;
        self
    }

    pub fn with_event_publisher(mut self, events: OptionalEventPublisher) -> Self {
        self.events = events;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    fn lock(&self) -> SchedulingResult<MutexGuard<'_, SchedulingState>> {
        self.state
            .lock()
            .map_err(|e| SchedulingError::LockPoisoned(e.to_string()))
    }

    /// 在状态副本上执行操作,成功后整体提交,然后发布事件
    fn transact<T, F>(&self, op: F) -> SchedulingResult<T>
    where
        F: FnOnce(&mut SchedulingState) -> SchedulingResult<(T, Vec<SchedulingEvent>)>,
    {
        let (value, events) = {
            let mut guard = self.lock()?;
            let mut draft = guard.clone();
            let (value, events) = op(&mut draft)?;
            *guard = draft;
            (value, events)
        };
        for event in events {
            self.events.publish(event);
        }
        Ok(value)
    }

    /// 只读访问
    fn read<T>(&self, f: impl FnOnce(&SchedulingState) -> T) -> SchedulingResult<T> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    // ==========================================
    // 订单
    // ==========================================

    /// 登记订单
    ///
    /// # 错误
    /// - InvalidOrder: 校验失败或ID重复
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub fn register_order(&self, order: Order) -> SchedulingResult<Order> {
        order.validate().map_err(SchedulingError::InvalidOrder)?;
        self.transact(|state| {
            if state.orders.iter().any(|o| o.id == order.id) {
                warn!("订单ID重复");
                return Err(SchedulingError::InvalidOrder(format!("订单{}已存在", order.id)));
            }
            state.orders.push(order.clone());
            let event = SchedulingEvent::for_order(SchedulingEventType::OrderRegistered, &order.id, None);
            Ok((order, vec![event]))
        })
    }

    // ==========================================
    // 生产排程
    // ==========================================

    /// 为订单生成生产排程并追加到集合
    ///
    /// 未登记的订单会被隐式登记
    pub fn schedule_production(&self, order: &Order) -> SchedulingResult<ProductionSchedule> {
        self.schedule_production_with(order, no_hook)
    }

    /// 同上,提交前执行持久化钩子
    #[instrument(skip(self, order, hook), fields(order_id = %order.id))]
    pub fn schedule_production_with<H>(&self, order: &Order, hook: H) -> SchedulingResult<ProductionSchedule>
    where
        H: FnOnce(&ProductionSchedule) -> SchedulingResult<()>,
    {
        let now = self.clock.now();
        self.transact(|state| {
            let schedule = self.production_scheduler.schedule_production(
                order,
                &state.lines,
                &state.production_schedules,
                now,
            )?;
            hook(&schedule)?;

            let mut events = Vec::new();
            if !state.orders.iter().any(|o| o.id == order.id) {
                state.orders.push(order.clone());
                events.push(SchedulingEvent::for_order(
                    SchedulingEventType::OrderRegistered,
                    &order.id,
                    None,
                ));
            }
            state.production_schedules.push(schedule.clone());
            events.push(SchedulingEvent::for_order(
                SchedulingEventType::ProductionScheduled,
                &order.id,
                Some(schedule.id.clone()),
            ));
            Ok((schedule, events))
        })
    }

    /// 生产队列重排,返回重排后的全集
    ///
    /// 未发车的配送随所属生产窗口同步调整开始时间与预计到达时间
    pub fn optimize_production_schedule(&self) -> SchedulingResult<Vec<ProductionSchedule>> {
        self.optimize_production_schedule_with(|_, _| Ok(()))
    }

    /// 钩子参数: 重排后的生产排程全集、被调整的配送排程
    #[instrument(skip(self, hook))]
    pub fn optimize_production_schedule_with<H>(&self, hook: H) -> SchedulingResult<Vec<ProductionSchedule>>
    where
        H: FnOnce(&[ProductionSchedule], &[DeliverySchedule]) -> SchedulingResult<()>,
    {
        self.transact(|state| {
            let orders = &state.orders;
            self.production_scheduler
                .optimize_production_schedule(&mut state.production_schedules, |s| {
                    orders
                        .iter()
                        .find(|o| o.id == s.order_id)
                        .map(|o| o.production_duration())
                        .unwrap_or_else(|| s.duration())
                })?;
            let realigned = state.realign_deliveries()?;
            if !realigned.is_empty() {
                info!(realigned = realigned.len(), "配送开始时间已随生产窗口调整");
            }
            hook(&state.production_schedules, &realigned)?;
            Ok((
                state.production_schedules.clone(),
                vec![SchedulingEvent::full_scope(SchedulingEventType::ProductionOptimized)],
            ))
        })
    }

    /// 开工: scheduled → in-progress,订单 → processing
    ///
    /// 同一生产线同一时刻只允许一个执行中排程
    pub fn start_production(&self, schedule_id: &str) -> SchedulingResult<ProductionSchedule> {
        self.start_production_with(schedule_id, no_hook)
    }

    #[instrument(skip(self, hook))]
    pub fn start_production_with<H>(&self, schedule_id: &str, hook: H) -> SchedulingResult<ProductionSchedule>
    where
        H: FnOnce(&ProductionSchedule) -> SchedulingResult<()>,
    {
        self.transact(|state| {
            let (line_id, status) = {
                let s = state.production_mut(schedule_id)?;
                (s.line_id.clone(), s.status)
            };
            step(status, ScheduleStatus::Scheduled, ScheduleStatus::InProgress)?;

            if let Some(busy) = state
                .production_schedules
                .iter()
                .find(|s| s.line_id == line_id && s.status == ScheduleStatus::InProgress)
            {
                return Err(SchedulingError::InvalidSchedule(format!(
                    "生产线{}正在执行排程{}",
                    line_id, busy.id
                )));
            }

            let schedule = state.production_mut(schedule_id)?;
            schedule.status = ScheduleStatus::InProgress;
            let schedule = schedule.clone();

            state.advance_order(&schedule.order_id, OrderStatus::Processing)?;
            state.advance_items(&schedule.order_id, OrderItemStatus::InProduction)?;
            hook(&schedule)?;

            info!(line_id = %schedule.line_id, "生产已开工");
            let event = SchedulingEvent::for_order(
                SchedulingEventType::ProductionStatusChanged,
                &schedule.order_id,
                Some(schedule.id.clone()),
            );
            Ok((schedule, vec![event]))
        })
    }

    /// 完工: in-progress → completed,释放生产线
    pub fn complete_production(&self, schedule_id: &str) -> SchedulingResult<ProductionSchedule> {
        self.complete_production_with(schedule_id, no_hook)
    }

    #[instrument(skip(self, hook))]
    pub fn complete_production_with<H>(&self, schedule_id: &str, hook: H) -> SchedulingResult<ProductionSchedule>
    where
        H: FnOnce(&ProductionSchedule) -> SchedulingResult<()>,
    {
        self.transact(|state| {
            let schedule = state.production_mut(schedule_id)?;
            step(schedule.status, ScheduleStatus::InProgress, ScheduleStatus::Completed)?;
            schedule.status = ScheduleStatus::Completed;
            let schedule = schedule.clone();

            state.advance_items(&schedule.order_id, OrderItemStatus::Completed)?;
            hook(&schedule)?;

            info!(line_id = %schedule.line_id, "生产已完工,生产线释放");
            let event = SchedulingEvent::for_order(
                SchedulingEventType::ProductionStatusChanged,
                &schedule.order_id,
                Some(schedule.id.clone()),
            );
            Ok((schedule, vec![event]))
        })
    }

    // ==========================================
    // 配送排程
    // ==========================================

    /// 为已排产订单生成配送排程,占用车辆与司机
    pub fn schedule_delivery(
        &self,
        order: &Order,
        production: &ProductionSchedule,
    ) -> SchedulingResult<DeliverySchedule> {
        self.schedule_delivery_with(order, production, no_hook)
    }

    /// 同上,提交前执行持久化钩子
    ///
    /// 使用容器内的最新订单与生产排程（重排后的窗口）
    #[instrument(skip(self, order, production, hook), fields(
        order_id = %order.id,
        production_schedule_id = %production.id
    ))]
    pub fn schedule_delivery_with<H>(
        &self,
        order: &Order,
        production: &ProductionSchedule,
        hook: H,
    ) -> SchedulingResult<DeliverySchedule>
    where
        H: FnOnce(&DeliverySchedule) -> SchedulingResult<()>,
    {
        if production.order_id != order.id {
            warn!(schedule_order_id = %production.order_id, "生产排程不属于该订单");
            return Err(SchedulingError::InvalidSchedule(format!(
                "生产排程{}属于订单{},与订单{}不匹配",
                production.id, production.order_id, order.id
            )));
        }

        self.transact(|state| {
            let current_order = state
                .orders
                .iter()
                .find(|o| o.id == order.id)
                .cloned()
                .ok_or_else(|| SchedulingError::not_found("Order", &order.id))?;
            let current_production = state
                .production_schedules
                .iter()
                .find(|s| s.id == production.id)
                .cloned()
                .ok_or_else(|| SchedulingError::not_found("ProductionSchedule", &production.id))?;

            let delivery = self.delivery_scheduler.schedule_delivery(
                &current_order,
                &current_production,
                &state.vehicles,
                &state.drivers,
                self.router.as_ref(),
                &state.delivery_schedules,
            )?;

            state.vehicles.acquire(&delivery.vehicle_id, &delivery.id)?;
            state.drivers.acquire(&delivery.driver_id, &delivery.id)?;
            hook(&delivery)?;

            let order = state.order_mut(&delivery.order_id)?;
            order.assigned_vehicle_id = Some(delivery.vehicle_id.clone());
            order.assigned_driver_id = Some(delivery.driver_id.clone());
            state.delivery_schedules.push(delivery.clone());

            let event = SchedulingEvent::for_order(
                SchedulingEventType::DeliveryScheduled,
                &delivery.order_id,
                Some(delivery.id.clone()),
            );
            Ok((delivery, vec![event]))
        })
    }

    /// 配送路线重排
    pub fn optimize_delivery_routes(&self) -> SchedulingResult<RouteOptimizationSummary> {
        self.optimize_delivery_routes_with(no_hook)
    }

    #[instrument(skip(self, hook))]
    pub fn optimize_delivery_routes_with<H>(&self, hook: H) -> SchedulingResult<RouteOptimizationSummary>
    where
        H: FnOnce(&[DeliverySchedule]) -> SchedulingResult<()>,
    {
        self.transact(|state| {
            let summary = self
                .route_optimizer
                .optimize_delivery_routes(&mut state.delivery_schedules, self.router.as_ref());
            hook(&state.delivery_schedules)?;
            Ok((
                summary,
                vec![SchedulingEvent::full_scope(SchedulingEventType::DeliveryRoutesOptimized)],
            ))
        })
    }

    /// 发车: scheduled → in-progress,车辆 → in-transit,订单 → in-transit
    ///
    /// # 错误
    /// - InvalidSchedule: 对应生产排程尚未完工
    pub fn start_delivery(&self, delivery_id: &str) -> SchedulingResult<DeliverySchedule> {
        self.start_delivery_with(delivery_id, no_hook)
    }

    #[instrument(skip(self, hook))]
    pub fn start_delivery_with<H>(&self, delivery_id: &str, hook: H) -> SchedulingResult<DeliverySchedule>
    where
        H: FnOnce(&DeliverySchedule) -> SchedulingResult<()>,
    {
        self.transact(|state| {
            let (status, production_id) = {
                let d = state.delivery_mut(delivery_id)?;
                (d.status, d.production_schedule_id.clone())
            };
            step(status, ScheduleStatus::Scheduled, ScheduleStatus::InProgress)?;

            let production_status = state.production_mut(&production_id)?.status;
            if production_status != ScheduleStatus::Completed {
                return Err(SchedulingError::InvalidSchedule(format!(
                    "生产排程{}尚未完工（{}）,不能发车",
                    production_id, production_status
                )));
            }

            let delivery = state.delivery_mut(delivery_id)?;
            delivery.status = ScheduleStatus::InProgress;
            let delivery = delivery.clone();

            state.vehicles.dispatch(&delivery.vehicle_id)?;
            state.advance_order(&delivery.order_id, OrderStatus::InTransit)?;
            hook(&delivery)?;

            info!(vehicle_id = %delivery.vehicle_id, "配送已发车");
            let event = SchedulingEvent::for_order(
                SchedulingEventType::DeliveryStatusChanged,
                &delivery.order_id,
                Some(delivery.id.clone()),
            );
            Ok((delivery, vec![event]))
        })
    }

    /// 送达: in-progress → completed,记录实际到达,释放车辆与司机,订单 → delivered
    ///
    /// # 错误
    /// - InvalidSchedule: 实际到达早于开始时间
    pub fn complete_delivery(
        &self,
        delivery_id: &str,
        actual_arrival: NaiveDateTime,
    ) -> SchedulingResult<DeliverySchedule> {
        self.complete_delivery_with(delivery_id, actual_arrival, no_hook)
    }

    #[instrument(skip(self, hook))]
    pub fn complete_delivery_with<H>(
        &self,
        delivery_id: &str,
        actual_arrival: NaiveDateTime,
        hook: H,
    ) -> SchedulingResult<DeliverySchedule>
    where
        H: FnOnce(&DeliverySchedule) -> SchedulingResult<()>,
    {
        self.transact(|state| {
            let delivery = state.delivery_mut(delivery_id)?;
            step(delivery.status, ScheduleStatus::InProgress, ScheduleStatus::Completed)?;
            if actual_arrival < delivery.start_time {
                return Err(SchedulingError::InvalidSchedule(format!(
                    "实际到达{}早于开始时间{}",
                    actual_arrival, delivery.start_time
                )));
            }
            delivery.status = ScheduleStatus::Completed;
            delivery.actual_arrival = Some(actual_arrival);
            let delivery = delivery.clone();

            state
                .vehicles
                .release(&delivery.vehicle_id, delivery.route.destination())?;
            state.drivers.release(&delivery.driver_id, actual_arrival)?;
            state.advance_order(&delivery.order_id, OrderStatus::Delivered)?;
            hook(&delivery)?;

            info!(
                vehicle_id = %delivery.vehicle_id,
                driver_id = %delivery.driver_id,
                "配送已送达,车辆与司机释放"
            );
            let event = SchedulingEvent::for_order(
                SchedulingEventType::DeliveryStatusChanged,
                &delivery.order_id,
                Some(delivery.id.clone()),
            );
            Ok((delivery, vec![event]))
        })
    }

    // ==========================================
    // 资源池管理
    // ==========================================

    pub fn add_production_line(&self, line: ProductionLine) -> SchedulingResult<()> {
        self.transact(|state| {
            state.lines.add(line);
            Ok(((), vec![pool_changed()]))
        })
    }

    pub fn set_line_in_service(&self, line_id: &str, in_service: bool) -> SchedulingResult<()> {
        self.transact(|state| {
            state.lines.set_in_service(line_id, in_service)?;
            Ok(((), vec![pool_changed()]))
        })
    }

    pub fn add_vehicle(&self, vehicle: Vehicle) -> SchedulingResult<()> {
        self.transact(|state| {
            state.vehicles.add(vehicle);
            Ok(((), vec![pool_changed()]))
        })
    }

    /// 维保/恢复;已绑定配送的车辆不可变更
    pub fn set_vehicle_status(&self, vehicle_id: &str, status: VehicleStatus) -> SchedulingResult<()> {
        self.transact(|state| {
            state.vehicles.set_status(vehicle_id, status)?;
            Ok(((), vec![pool_changed()]))
        })
    }

    pub fn add_driver(&self, driver: Driver) -> SchedulingResult<()> {
        self.transact(|state| {
            state.drivers.add(driver);
            Ok(((), vec![pool_changed()]))
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn snapshot(&self) -> SchedulingResult<SchedulingState> {
        self.read(|s| s.clone())
    }

    pub fn orders(&self) -> SchedulingResult<Vec<Order>> {
        self.read(|s| s.orders.clone())
    }

    pub fn get_order(&self, order_id: &str) -> SchedulingResult<Order> {
        self.read(|s| s.orders.iter().find(|o| o.id == order_id).cloned())?
            .ok_or_else(|| SchedulingError::not_found("Order", order_id))
    }

    pub fn production_schedules(&self) -> SchedulingResult<Vec<ProductionSchedule>> {
        self.read(|s| s.production_schedules.clone())
    }

    pub fn delivery_schedules(&self) -> SchedulingResult<Vec<DeliverySchedule>> {
        self.read(|s| s.delivery_schedules.clone())
    }

    pub fn production_lines(&self) -> SchedulingResult<Vec<ProductionLine>> {
        self.read(|s| s.lines.lines().to_vec())
    }

    pub fn vehicles(&self) -> SchedulingResult<Vec<Vehicle>> {
        self.read(|s| s.vehicles.vehicles())
    }

    /// 当前可分配车辆
    pub fn available_vehicles(&self) -> SchedulingResult<Vec<Vehicle>> {
        self.read(|s| s.vehicles.available().into_iter().cloned().collect())
    }

    pub fn drivers(&self) -> SchedulingResult<Vec<Driver>> {
        self.read(|s| s.drivers.drivers())
    }

    // ==========================================
    // 效率分析（纯读取,空集合返回 0）
    // ==========================================

    pub fn production_efficiency(&self) -> SchedulingResult<f64> {
        self.read(|s| analytics::production_efficiency(&s.production_schedules))
    }

    pub fn delivery_efficiency(&self) -> SchedulingResult<f64> {
        self.read(|s| analytics::delivery_efficiency(&s.delivery_schedules))
    }

    pub fn efficiency_report(&self) -> SchedulingResult<EfficiencyReport> {
        self.read(|s| {
            EfficiencyReport::build(
                &s.production_schedules,
                &s.delivery_schedules,
                s.lines.loads(&s.production_schedules),
            )
        })
    }
}

fn pool_changed() -> SchedulingEvent {
    SchedulingEvent::full_scope(SchedulingEventType::ResourcePoolChanged)
}
