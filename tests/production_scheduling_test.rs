// ==========================================
// 生产排程集成测试
// ==========================================
// 测试目标: 生产窗口分配、优先级重排、生产线容量
// ==========================================

mod helpers;

use chrono::Duration;
use std::sync::Arc;

use helpers::mock_config::MockConfig;
use helpers::test_data_builder::{build_store, t0, OrderBuilder};
use logiflow_scheduler::engine::FixedClock;
use logiflow_scheduler::{OrderPriority, OrderStatus, ScheduleStatus, SchedulingError};

#[tokio::test]
async fn test_high_priority_two_hour_order() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let order = OrderBuilder::new("ORD-1")
        .priority(OrderPriority::High)
        .hours(2.0)
        .build();
    let schedule = store.schedule_production(&order).unwrap();

    assert_eq!(schedule.priority, 3);
    assert_eq!(schedule.order_id, "ORD-1");
    assert_eq!(schedule.status, ScheduleStatus::Scheduled);
    assert_eq!(schedule.start_time, t0());
    assert_eq!(schedule.end_time, schedule.start_time + Duration::hours(2));
    assert_eq!(schedule.line_id, "line-1");
    assert!((schedule.efficiency - 0.85).abs() < 1e-9);

    // 订单被隐式登记且状态未变
    let stored = store.get_order("ORD-1").unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_priority_weights() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let low = store
        .schedule_production(&OrderBuilder::new("L").priority(OrderPriority::Low).build())
        .unwrap();
    let medium = store
        .schedule_production(&OrderBuilder::new("M").priority(OrderPriority::Medium).build())
        .unwrap();
    assert_eq!(low.priority, 1);
    assert_eq!(medium.priority, 2);
}

#[tokio::test]
async fn test_windows_on_same_line_do_not_overlap() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let a = store
        .schedule_production(&OrderBuilder::new("A").hours(1.5).build())
        .unwrap();
    let b = store
        .schedule_production(&OrderBuilder::new("B").hours(0.5).build())
        .unwrap();

    assert_eq!(a.line_id, b.line_id);
    assert_eq!(b.start_time, a.end_time);
}

#[tokio::test]
async fn test_optimize_orders_by_priority_desc() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    for (id, priority) in [
        ("LOW", OrderPriority::Low),
        ("HIGH", OrderPriority::High),
        ("MED", OrderPriority::Medium),
    ] {
        store
            .schedule_production(&OrderBuilder::new(id).priority(priority).hours(1.0).build())
            .unwrap();
    }

    let optimized = store.optimize_production_schedule().unwrap();
    let ids: Vec<&str> = optimized.iter().map(|s| s.order_id.as_str()).collect();
    assert_eq!(ids, vec!["HIGH", "MED", "LOW"]);

    // 重排后首个窗口从原最早开工时间开始,其余首尾相接
    assert_eq!(optimized[0].start_time, t0());
    assert_eq!(optimized[1].start_time, optimized[0].end_time);
    assert_eq!(optimized[2].start_time, optimized[1].end_time);
}

#[tokio::test]
async fn test_high_inserted_after_low_starts_first_after_optimize() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let low = store
        .schedule_production(&OrderBuilder::new("LOW").priority(OrderPriority::Low).hours(2.0).build())
        .unwrap();
    let high = store
        .schedule_production(&OrderBuilder::new("HIGH").priority(OrderPriority::High).hours(1.0).build())
        .unwrap();
    assert!(low.start_time < high.start_time);

    let optimized = store.optimize_production_schedule().unwrap();
    let high = optimized.iter().find(|s| s.order_id == "HIGH").unwrap();
    let low = optimized.iter().find(|s| s.order_id == "LOW").unwrap();
    assert!(high.start_time < low.start_time);
    assert_eq!(low.start_time, high.end_time);
    assert_eq!(low.end_time - low.start_time, Duration::hours(2));
}

#[tokio::test]
async fn test_optimize_is_idempotent() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::with_fleet(2, 1, 1), clock).await;

    for (i, priority) in [
        OrderPriority::Low,
        OrderPriority::High,
        OrderPriority::Medium,
        OrderPriority::High,
        OrderPriority::Low,
    ]
    .into_iter()
    .enumerate()
    {
        store
            .schedule_production(
                &OrderBuilder::new(&format!("ORD-{}", i))
                    .priority(priority)
                    .hours(1.0 + i as f64 * 0.5)
                    .build(),
            )
            .unwrap();
    }

    let first = store.optimize_production_schedule().unwrap();
    let second = store.optimize_production_schedule().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_optimize_keeps_in_progress_and_starts_after_it() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let running = store
        .schedule_production(&OrderBuilder::new("RUN").priority(OrderPriority::Low).hours(3.0).build())
        .unwrap();
    store
        .schedule_production(&OrderBuilder::new("NEXT").priority(OrderPriority::High).hours(1.0).build())
        .unwrap();
    store.start_production(&running.id).unwrap();

    let optimized = store.optimize_production_schedule().unwrap();
    let run = optimized.iter().find(|s| s.order_id == "RUN").unwrap();
    let next = optimized.iter().find(|s| s.order_id == "NEXT").unwrap();

    assert_eq!(run.status, ScheduleStatus::InProgress);
    assert_eq!(run.start_time, running.start_time);
    assert!(next.start_time >= run.end_time);
}

#[tokio::test]
async fn test_oversized_duration_rejected_and_store_stays_usable() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let err = store
        .schedule_production(&OrderBuilder::new("HUGE").hours(1e10).build())
        .unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidOrder(_)));

    let err = store
        .schedule_production(&OrderBuilder::new("HUGER").hours(1e20).build())
        .unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidOrder(_)));

    // 失败不污染状态锁,后续操作正常
    assert!(store.production_schedules().unwrap().is_empty());
    let schedule = store
        .schedule_production(&OrderBuilder::new("OK").hours(1.0).build())
        .unwrap();
    assert_eq!(schedule.start_time, t0());
}

#[tokio::test]
async fn test_duplicate_production_schedule_rejected() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;
    let order = OrderBuilder::new("DUP").build();

    store.schedule_production(&order).unwrap();
    let err = store.schedule_production(&order).unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidOrder(_)));
    assert_eq!(store.production_schedules().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_duration_rejected() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    let err = store
        .schedule_production(&OrderBuilder::new("ZERO").hours(0.0).build())
        .unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidOrder(_)));
    assert!(store.production_schedules().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_capacity_when_queue_full() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default().with_max_queue(1), clock).await;

    store.schedule_production(&OrderBuilder::new("A").build()).unwrap();
    let err = store
        .schedule_production(&OrderBuilder::new("B").build())
        .unwrap_err();
    assert!(matches!(err, SchedulingError::NoCapacity(_)));
}

#[tokio::test]
async fn test_no_capacity_when_line_out_of_service() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default(), clock).await;

    store.set_line_in_service("line-1", false).unwrap();
    let err = store
        .schedule_production(&OrderBuilder::new("A").build())
        .unwrap_err();
    assert!(matches!(err, SchedulingError::NoCapacity(_)));
}

#[tokio::test]
async fn test_completed_line_becomes_free() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::default().with_max_queue(1), clock.clone()).await;

    let first = store.schedule_production(&OrderBuilder::new("A").build()).unwrap();
    store.start_production(&first.id).unwrap();
    store.complete_production(&first.id).unwrap();

    clock.advance(Duration::hours(4));
    let second = store.schedule_production(&OrderBuilder::new("B").build()).unwrap();
    assert_eq!(second.line_id, "line-1");
    assert_eq!(second.start_time, t0() + Duration::hours(4));
}

#[tokio::test]
async fn test_idle_line_preferred() {
    let clock = Arc::new(FixedClock::new(t0()));
    let store = build_store(&MockConfig::with_fleet(2, 1, 1), clock).await;

    let a = store.schedule_production(&OrderBuilder::new("A").build()).unwrap();
    let b = store.schedule_production(&OrderBuilder::new("B").build()).unwrap();

    assert_eq!(a.line_id, "line-1");
    assert_eq!(b.line_id, "line-2");
    assert_eq!(a.start_time, t0());
    assert_eq!(b.start_time, t0());
}
