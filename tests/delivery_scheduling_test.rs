// ==========================================
// 配送排程集成测试
// ==========================================
// 测试目标: 配送窗口、车辆/司机分配、路线重排、配送效率
// ==========================================

mod helpers;

use std::sync::Arc;

use helpers::mock_config::{mock_vehicle, MockConfig};
use helpers::test_data_builder::{build_store, t0, OrderBuilder};
use logiflow_scheduler::app::SchedulingStore;
use logiflow_scheduler::domain::{DeliverySchedule, GeoPoint, Order};
use logiflow_scheduler::engine::FixedClock;
use logiflow_scheduler::{OrderPriority, OrderStatus, ScheduleStatus, SchedulingError, VehicleStatus};

fn schedule_both(store: &SchedulingStore, order: &Order) -> DeliverySchedule {
    let production = store.schedule_production(order).unwrap();
    store.schedule_delivery(order, &production).unwrap()
}

/// 生产完工并发车
fn dispatch(store: &SchedulingStore, delivery: &DeliverySchedule) {
    store.start_production(&delivery.production_schedule_id).unwrap();
    store.complete_production(&delivery.production_schedule_id).unwrap();
    store.start_delivery(&delivery.id).unwrap();
}

#[tokio::test]
async fn test_mismatched_production_schedule_rejected() {
    let store = build_store(&MockConfig::with_fleet(1, 2, 2), Arc::new(FixedClock::new(t0()))).await;

    let a = OrderBuilder::new("A").build();
    let b = OrderBuilder::new("B").build();
    store.schedule_production(&a).unwrap();
    let production_b = store.schedule_production(&b).unwrap();

    let err = store.schedule_delivery(&a, &production_b).unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidSchedule(_)));
    assert!(store.delivery_schedules().unwrap().is_empty());
    assert_eq!(store.available_vehicles().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delivery_starts_when_production_ends() {
    let store = build_store(&MockConfig::default(), Arc::new(FixedClock::new(t0()))).await;

    let order = OrderBuilder::new("A").hours(3.0).address("0.0,0.5").build();
    let production = store.schedule_production(&order).unwrap();
    let delivery = store.schedule_delivery(&order, &production).unwrap();

    assert!(delivery.start_time >= production.end_time);
    assert_eq!(delivery.start_time, production.end_time);
    assert!(delivery.estimated_arrival > delivery.start_time);
    assert_eq!(delivery.status, ScheduleStatus::Scheduled);
    assert_eq!(delivery.route.waypoints, vec![[0.0, 0.0], [0.0, 0.5]]);

    let stored = store.get_order("A").unwrap();
    assert_eq!(stored.assigned_vehicle_id.as_deref(), Some("vehicle-1"));
    assert_eq!(stored.assigned_driver_id.as_deref(), Some("driver-1"));
}

#[tokio::test]
async fn test_delivery_uses_optimized_production_window() {
    let store = build_store(&MockConfig::with_fleet(1, 2, 2), Arc::new(FixedClock::new(t0()))).await;

    let low = OrderBuilder::new("LOW").priority(OrderPriority::Low).hours(2.0).build();
    let high = OrderBuilder::new("HIGH").priority(OrderPriority::High).hours(1.0).build();
    store.schedule_production(&low).unwrap();
    let stale_high = store.schedule_production(&high).unwrap();
    store.optimize_production_schedule().unwrap();

    // 传入的是重排前的窗口,配送应以容器内的最新窗口为准
    let delivery = store.schedule_delivery(&high, &stale_high).unwrap();
    assert_eq!(delivery.start_time, t0() + chrono::Duration::hours(1));
}

#[tokio::test]
async fn test_booked_delivery_follows_production_after_optimize() {
    let store = build_store(&MockConfig::with_fleet(1, 2, 2), Arc::new(FixedClock::new(t0()))).await;

    let low = OrderBuilder::new("LOW").priority(OrderPriority::Low).hours(2.0).build();
    let high = OrderBuilder::new("HIGH").priority(OrderPriority::High).hours(2.0).build();
    let low_delivery = schedule_both(&store, &low);
    store.schedule_production(&high).unwrap();
    assert_eq!(low_delivery.start_time, t0() + chrono::Duration::hours(2));

    // 重排把 LOW 的生产窗口推迟到 HIGH 之后
    let optimized = store.optimize_production_schedule().unwrap();
    let low_production = optimized.iter().find(|s| s.order_id == "LOW").unwrap();
    assert_eq!(low_production.end_time, t0() + chrono::Duration::hours(4));

    let delivery = store
        .delivery_schedules()
        .unwrap()
        .into_iter()
        .find(|d| d.id == low_delivery.id)
        .unwrap();
    assert!(delivery.start_time >= low_production.end_time);
    assert_eq!(delivery.start_time, low_production.end_time);
    assert_eq!(
        delivery.estimated_arrival,
        delivery.start_time + delivery.route.travel_time()
    );
    assert_eq!(delivery.route, low_delivery.route);
    assert_eq!(delivery.vehicle_id, low_delivery.vehicle_id);
}

#[tokio::test]
async fn test_optimize_hook_receives_realigned_deliveries() {
    let store = build_store(&MockConfig::with_fleet(1, 2, 2), Arc::new(FixedClock::new(t0()))).await;

    let low = OrderBuilder::new("LOW").priority(OrderPriority::Low).hours(1.0).build();
    let high = OrderBuilder::new("HIGH").priority(OrderPriority::High).hours(1.0).build();
    let low_delivery = schedule_both(&store, &low);
    store.schedule_production(&high).unwrap();

    // 钩子失败: 生产与配送均不提交
    let err = store
        .optimize_production_schedule_with(|_, _| {
            Err(SchedulingError::StoreUnavailable("write failed".to_string()))
        })
        .unwrap_err();
    assert!(matches!(err, SchedulingError::StoreUnavailable(_)));
    assert_eq!(store.delivery_schedules().unwrap(), vec![low_delivery.clone()]);

    let mut seen = Vec::new();
    store
        .optimize_production_schedule_with(|_, realigned| {
            seen = realigned.to_vec();
            Ok(())
        })
        .unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, low_delivery.id);
    assert_eq!(seen[0].start_time, t0() + chrono::Duration::hours(2));
}

#[tokio::test]
async fn test_unknown_address_route_unavailable() {
    let store = build_store(&MockConfig::default(), Arc::new(FixedClock::new(t0()))).await;

    let order = OrderBuilder::new("A").address("somewhere unknown").build();
    let production = store.schedule_production(&order).unwrap();
    let err = store.schedule_delivery(&order, &production).unwrap_err();

    assert!(matches!(err, SchedulingError::RouteUnavailable(_)));
    assert_eq!(store.available_vehicles().unwrap().len(), 1);
}

#[tokio::test]
async fn test_gazetteer_address_resolves() {
    let mut config = MockConfig::default();
    config
        .gazetteer
        .insert("harbor warehouse".to_string(), GeoPoint::new(0.0, 0.2));
    let store = build_store(&config, Arc::new(FixedClock::new(t0()))).await;

    let order = OrderBuilder::new("A").address("Harbor  Warehouse").build();
    let delivery = schedule_both(&store, &order);
    assert_eq!(delivery.route.destination(), Some(GeoPoint::new(0.0, 0.2)));
}

#[tokio::test]
async fn test_best_fit_vehicle_by_capacity_and_type() {
    let mut config = MockConfig::with_fleet(1, 0, 3);
    let mut van = mock_vehicle("van", 5);
    van.vehicle_type = "van".to_string();
    config.vehicles = vec![mock_vehicle("big", 40), van, mock_vehicle("small", 10)];
    let store = build_store(&config, Arc::new(FixedClock::new(t0()))).await;

    // 件数 3: 容量最小的 van
    let d1 = schedule_both(&store, &OrderBuilder::new("A").quantities(&[1, 2]).build());
    assert_eq!(d1.vehicle_id, "van");

    // 指定车型 truck,件数 8: small
    let d2 = schedule_both(
        &store,
        &OrderBuilder::new("B").quantities(&[8]).vehicle_type("truck").build(),
    );
    assert_eq!(d2.vehicle_id, "small");

    // 件数 30: big
    let d3 = schedule_both(&store, &OrderBuilder::new("C").quantities(&[30]).build());
    assert_eq!(d3.vehicle_id, "big");
}

#[tokio::test]
async fn test_no_vehicle_and_no_driver() {
    let store = build_store(&MockConfig::with_fleet(1, 2, 1), Arc::new(FixedClock::new(t0()))).await;

    schedule_both(&store, &OrderBuilder::new("A").build());

    let b = OrderBuilder::new("B").build();
    let production = store.schedule_production(&b).unwrap();
    let err = store.schedule_delivery(&b, &production).unwrap_err();
    assert!(matches!(err, SchedulingError::NoDriverAvailable(_)));

    let store = build_store(&MockConfig::with_fleet(1, 1, 2), Arc::new(FixedClock::new(t0()))).await;
    let heavy = OrderBuilder::new("H").quantities(&[500]).build();
    let production = store.schedule_production(&heavy).unwrap();
    let err = store.schedule_delivery(&heavy, &production).unwrap_err();
    assert!(matches!(err, SchedulingError::NoVehicleAvailable { load: 500, .. }));
}

#[tokio::test]
async fn test_maintenance_vehicle_not_assigned() {
    let store = build_store(&MockConfig::with_fleet(1, 2, 2), Arc::new(FixedClock::new(t0()))).await;
    store
        .set_vehicle_status("vehicle-1", VehicleStatus::Maintenance)
        .unwrap();

    let delivery = schedule_both(&store, &OrderBuilder::new("A").build());
    assert_eq!(delivery.vehicle_id, "vehicle-2");
}

#[tokio::test]
async fn test_start_delivery_requires_completed_production() {
    let store = build_store(&MockConfig::default(), Arc::new(FixedClock::new(t0()))).await;
    let delivery = schedule_both(&store, &OrderBuilder::new("A").build());

    let err = store.start_delivery(&delivery.id).unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidSchedule(_)));

    dispatch(&store, &delivery);
    assert_eq!(store.get_order("A").unwrap().status, OrderStatus::InTransit);
    assert_eq!(store.vehicles().unwrap()[0].status, VehicleStatus::InTransit);
}

#[tokio::test]
async fn test_driver_least_recently_used() {
    let store = build_store(&MockConfig::with_fleet(2, 3, 2), Arc::new(FixedClock::new(t0()))).await;

    let first = schedule_both(&store, &OrderBuilder::new("A").build());
    assert_eq!(first.driver_id, "driver-1");
    dispatch(&store, &first);
    store
        .complete_delivery(&first.id, first.estimated_arrival)
        .unwrap();

    // driver-2 从未被使用,优先于刚释放的 driver-1
    let second = schedule_both(&store, &OrderBuilder::new("B").build());
    assert_eq!(second.driver_id, "driver-2");
}

#[tokio::test]
async fn test_complete_delivery_before_start_rejected() {
    let store = build_store(&MockConfig::default(), Arc::new(FixedClock::new(t0()))).await;
    let delivery = schedule_both(&store, &OrderBuilder::new("A").build());
    dispatch(&store, &delivery);

    let err = store
        .complete_delivery(&delivery.id, delivery.start_time - chrono::Duration::minutes(1))
        .unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidSchedule(_)));
    assert_eq!(
        store.delivery_schedules().unwrap()[0].status,
        ScheduleStatus::InProgress
    );
}

#[tokio::test]
async fn test_optimize_routes_clusters_nearby_stops() {
    let store = build_store(&MockConfig::with_fleet(3, 3, 3), Arc::new(FixedClock::new(t0()))).await;

    // 两个近邻点（约 11km / 22km）与一个远点（约 222km）
    let far = schedule_both(&store, &OrderBuilder::new("FAR").address("0.0,2.0").build());
    let mid = schedule_both(&store, &OrderBuilder::new("MID").address("0.0,0.2").build());
    let near = schedule_both(&store, &OrderBuilder::new("NEAR").address("0.0,0.1").build());

    let summary = store.optimize_delivery_routes().unwrap();
    assert_eq!(summary.clusters, 2);
    assert_eq!(summary.rerouted, 3);

    let schedules = store.delivery_schedules().unwrap();
    let by_order = |id: &str| schedules.iter().find(|d| d.order_id == id).unwrap().clone();

    // 最近邻: 先 NEAR 再 MID
    let near_after = by_order("NEAR");
    let mid_after = by_order("MID");
    assert_eq!(near_after.route.waypoints, vec![[0.0, 0.0], [0.0, 0.1]]);
    assert_eq!(mid_after.route.waypoints, vec![[0.0, 0.0], [0.0, 0.1], [0.0, 0.2]]);
    assert!((mid_after.route.distance - mid.route.distance).abs() < 1e-6);

    // 远点单独成簇,路线不变
    assert_eq!(by_order("FAR").route.waypoints, far.route.waypoints);

    // 开始时间与车辆分配不变
    assert_eq!(near_after.start_time, near.start_time);
    assert_eq!(near_after.vehicle_id, near.vehicle_id);
    assert_eq!(mid_after.driver_id, mid.driver_id);
}

#[tokio::test]
async fn test_optimize_routes_skips_completed() {
    let store = build_store(&MockConfig::with_fleet(2, 2, 2), Arc::new(FixedClock::new(t0()))).await;

    let done = schedule_both(&store, &OrderBuilder::new("DONE").address("0.0,0.2").build());
    dispatch(&store, &done);
    store.complete_delivery(&done.id, done.estimated_arrival).unwrap();
    schedule_both(&store, &OrderBuilder::new("OPEN").address("0.0,0.1").build());

    let summary = store.optimize_delivery_routes().unwrap();
    assert_eq!(summary.rerouted, 1);

    let schedules = store.delivery_schedules().unwrap();
    let done_after = schedules.iter().find(|d| d.order_id == "DONE").unwrap();
    assert_eq!(done_after.route, done.route);
    assert_eq!(done_after.actual_arrival, Some(done.estimated_arrival));
}

#[tokio::test]
async fn test_delivery_efficiency_from_completed() {
    let store = build_store(&MockConfig::with_fleet(2, 2, 2), Arc::new(FixedClock::new(t0()))).await;
    assert_eq!(store.delivery_efficiency().unwrap(), 0.0);

    let on_time = schedule_both(&store, &OrderBuilder::new("A").address("0.0,0.5").build());
    dispatch(&store, &on_time);
    store
        .complete_delivery(&on_time.id, on_time.estimated_arrival)
        .unwrap();
    assert!((store.delivery_efficiency().unwrap() - 1.0).abs() < 1e-9);

    // 实际耗时为计划的两倍 → 0.5,均值 0.75
    let late = schedule_both(&store, &OrderBuilder::new("B").address("0.0,0.5").build());
    dispatch(&store, &late);
    let actual = late.start_time + late.estimated_duration() * 2;
    store.complete_delivery(&late.id, actual).unwrap();

    assert!((store.delivery_efficiency().unwrap() - 0.75).abs() < 1e-6);
    let report = store.efficiency_report().unwrap();
    assert!((report.on_time_rate - 0.5).abs() < 1e-9);
}
