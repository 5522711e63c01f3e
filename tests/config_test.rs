// ==========================================
// 配置加载集成测试
// ==========================================
// 测试目标: config_kv 读取、配置快照装配、Mock 配置读取器
// ==========================================

mod helpers;

use std::sync::Arc;

use helpers::mock_config::MockConfig;
use helpers::test_data_builder::{build_store, t0, OrderBuilder};
use logiflow_scheduler::config::{ConfigManager, SchedulingConfig, SchedulingConfigReader};
use logiflow_scheduler::domain::GeoPoint;
use logiflow_scheduler::engine::FixedClock;
use test_helpers::{create_test_db, insert_test_config, open_test_connection, set_config};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path);
    assert!(config_manager.is_ok(), "ConfigManager should be created successfully");
}

#[tokio::test]
async fn test_load_snapshot_from_config_kv() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_test_config(&conn).unwrap();

    let manager = ConfigManager::new(&db_path).unwrap();
    let config = SchedulingConfig::load(&manager).await.unwrap();

    assert_eq!(config.cluster_radius_km, 30.0);
    assert_eq!(config.average_speed_kmh, 60.0);
    assert_eq!(config.max_queue_per_line, 4);
    assert_eq!(config.depot, GeoPoint::new(0.0, 0.0));
    assert_eq!(config.production_lines.len(), 2);
    assert_eq!(config.vehicles[1].vehicle_type, "truck");
    assert_eq!(config.vehicles[1].capacity, 40);
    assert_eq!(config.drivers[1].name, "Ben");
    assert_eq!(
        config.router().resolve("harbor warehouse"),
        Some(GeoPoint::new(0.0, 0.2))
    );
}

#[tokio::test]
async fn test_default_snapshot_matches_default_pools() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    let config = SchedulingConfig::load(&manager).await.unwrap();
    assert_eq!(config, SchedulingConfig::default());
    assert_eq!(config.production_lines[0].id, "line-1");
    assert_eq!(config.vehicles[0].plate_number, "ABC123");
    assert_eq!(config.drivers[0].id, "driver-1");
}

#[tokio::test]
async fn test_malformed_pool_json_falls_back() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    set_config(&conn, "vehicles", "not json").unwrap();
    set_config(&conn, "max_queue_per_line", "many").unwrap();

    let manager = ConfigManager::new(&db_path).unwrap();
    assert_eq!(manager.get_vehicles().await.unwrap()[0].id, "vehicle-1");
    assert_eq!(manager.get_max_queue_per_line().await.unwrap(), 8);
}

#[tokio::test]
async fn test_snapshot_json_lists_values() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_global_config_value("cluster_radius_km", "12").unwrap();

    let snapshot: serde_json::Value =
        serde_json::from_str(&manager.get_config_snapshot().unwrap()).unwrap();
    assert_eq!(snapshot["cluster_radius_km"], serde_json::Value::from("12"));
}

#[tokio::test]
async fn test_mock_config_drives_store() {
    let config = MockConfig::with_fleet(2, 1, 1).with_max_queue(1);
    assert_eq!(config.get_max_queue_per_line().await.unwrap(), 1);

    let store = build_store(&config, Arc::new(FixedClock::new(t0()))).await;
    store.schedule_production(&OrderBuilder::new("A").build()).unwrap();
    store.schedule_production(&OrderBuilder::new("B").build()).unwrap();

    // 两条线各排满一单
    assert!(store
        .schedule_production(&OrderBuilder::new("C").build())
        .is_err());
}
