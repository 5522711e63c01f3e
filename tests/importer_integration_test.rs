// ==========================================
// CSV 订单导入集成测试
// ==========================================
// 测试目标: 文件导入 → 文档存储 → 批量排产
// ==========================================


use std::io::Write;
use tempfile::Builder;

use logiflow_scheduler::api::ApiError;
use logiflow_scheduler::app::AppState;
use logiflow_scheduler::importer::{ImportError, OrderCsvImporter};
use logiflow_scheduler::OrderPriority;
use test_helpers::create_test_db;

const ORDERS_CSV: &str = "\
id,customer_id,delivery_address,scheduled_date,priority,required_production_time,estimated_delivery_time,product_id,quantity
ORD-1,C-1,\"0.0,0.1\",2026-03-02,high,2,1,P-1,3
ORD-1,C-1,\"0.0,0.1\",2026-03-02,high,2,1,P-2,4
ORD-2,C-2,\"0.0,0.3\",2026-03-03,low,1.5,0.5,P-9,1
";

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_import_file_merges_items() {
    let file = csv_file(ORDERS_CSV);
    let orders = OrderCsvImporter::import_file(file.path()).unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "ORD-1");
    assert_eq!(orders[0].items.len(), 2);
    assert_eq!(orders[0].total_quantity(), 7);
    assert_eq!(orders[0].priority, OrderPriority::High);
    assert_eq!(orders[1].required_production_time, 1.5);
}

#[test]
fn test_import_rejects_wrong_extension_and_missing_file() {
    let txt = Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        OrderCsvImporter::import_file(txt.path()),
        Err(ImportError::UnsupportedFormat(_))
    ));

    let missing = std::path::Path::new("/nonexistent/orders.csv");
    assert!(matches!(
        OrderCsvImporter::import_file(missing),
        Err(ImportError::FileNotFound(_))
    ));
}

#[tokio::test]
async fn test_import_then_schedule_pending() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let app = AppState::new(db_path).await.unwrap();
    let file = csv_file(ORDERS_CSV);

    let imported = app.order_api.import_csv(file.path()).unwrap();
    assert_eq!(imported.len(), 2);

    // 重复导入按订单ID覆盖
    app.order_api.import_csv(file.path()).unwrap();
    let stored = app.order_api.list_orders().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(app.order_api.find_order("ORD-1").unwrap().items.len(), 2);

    let batch = app.scheduling_api.schedule_pending_orders().unwrap();
    assert_eq!(batch.scheduled.len(), 2);
    assert!(batch.failed.is_empty());
}

#[tokio::test]
async fn test_import_error_maps_to_api_error() {
    let (_db_file, db_path) = create_test_db().unwrap();
    let app = AppState::new(db_path).await.unwrap();
    let file = csv_file(
        "id,customer_id,delivery_address,scheduled_date,priority,required_production_time,estimated_delivery_time,product_id,quantity\n\
         ORD-1,C-1,addr,2026-03-02,urgent,2,1,P-1,3\n",
    );

    let err = app.order_api.import_csv(file.path()).unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
    assert!(app.order_api.list_orders().unwrap().is_empty());
}
