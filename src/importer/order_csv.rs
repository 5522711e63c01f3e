// ==========================================
// LogiFlow 排程引擎 - 订单 CSV 导入
// ==========================================
// 列: id,customer_id,delivery_address,scheduled_date,priority,
//     required_production_time,estimated_delivery_time,product_id,quantity
// 规则: 相同 id 的多行合并为一个订单的多条明细;首行决定订单级字段
// 可选列: required_vehicle_type
// ==========================================

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::domain::order::{Order, OrderItem};
use crate::domain::types::{OrderItemStatus, OrderPriority, OrderStatus};
use crate::importer::error::{ImportError, ImportResult};

pub const REQUIRED_COLUMNS: [&str; 9] = [
    "id",
    "customer_id",
    "delivery_address",
    "scheduled_date",
    "priority",
    "required_production_time",
    "estimated_delivery_time",
    "product_id",
    "quantity",
];

const OPTIONAL_VEHICLE_TYPE: &str = "required_vehicle_type";

/// 订单 CSV 导入器
pub struct OrderCsvImporter;

impl OrderCsvImporter {
    /// 从文件导入
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn import_file(path: &Path) -> ImportResult<Vec<Order>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(ext.to_string_lossy().to_string()));
            }
        }
        let file = File::open(path)?;
        Self::import_reader(file)
    }

    /// 从任意读取源导入
    pub fn import_reader<R: Read>(source: R) -> ImportResult<Vec<Order>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }

        let mut orders: Vec<Order> = Vec::new();
        let mut first_rows: Vec<usize> = Vec::new();
        let mut index_by_id: HashMap<String, usize> = HashMap::new();

        for (row_idx, result) in reader.records().enumerate() {
            let row = row_idx + 1;
            let record = result?;
            let fields: HashMap<&str, &str> = headers
                .iter()
                .map(String::as_str)
                .zip(record.iter())
                .collect();

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                debug!(row, "跳过空白行");
                continue;
            }

            let parsed = parse_row(row, &fields)?;
            match index_by_id.get(&parsed.id).copied() {
                Some(idx) => merge_row(row, &mut orders[idx], parsed)?,
                None => {
                    index_by_id.insert(parsed.id.clone(), orders.len());
                    orders.push(parsed);
                    first_rows.push(row);
                }
            }
        }

        for (order, &row) in orders.iter().zip(first_rows.iter()) {
            order
                .validate()
                .map_err(|message| ImportError::InvalidOrder { row, message })?;
        }

        info!(orders = orders.len(), "订单 CSV 导入完成");
        Ok(orders)
    }
}

fn field<'a>(row: usize, fields: &HashMap<&str, &'a str>, name: &str) -> ImportResult<&'a str> {
    match fields.get(name) {
        Some(v) if !v.is_empty() => Ok(*v),
        _ => Err(ImportError::MissingField {
            row,
            field: name.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(row: usize, name: &str, raw: &str) -> ImportResult<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ImportError::TypeConversionError {
        row,
        field: name.to_string(),
        message: format!("{}: {}", raw, e),
    })
}

fn parse_row(row: usize, fields: &HashMap<&str, &str>) -> ImportResult<Order> {
    let id = field(row, fields, "id")?.to_string();

    let priority_raw = field(row, fields, "priority")?;
    let priority =
        OrderPriority::parse(priority_raw).ok_or_else(|| ImportError::TypeConversionError {
            row,
            field: "priority".to_string(),
            message: format!("{}（应为 low/medium/high）", priority_raw),
        })?;

    let required_production_time: f64 = parse_number(
        row,
        "required_production_time",
        field(row, fields, "required_production_time")?,
    )?;
    let estimated_delivery_time: f64 = match fields.get("estimated_delivery_time") {
        Some(raw) if !raw.is_empty() => parse_number(row, "estimated_delivery_time", raw)?,
        _ => 0.0,
    };
    let quantity: u32 = parse_number(row, "quantity", field(row, fields, "quantity")?)?;
    let product_id = field(row, fields, "product_id")?.to_string();

    Ok(Order {
        items: vec![OrderItem {
            id: format!("{}-{}", id, 1),
            product_id,
            quantity,
            status: OrderItemStatus::Pending,
        }],
        customer_id: field(row, fields, "customer_id")?.to_string(),
        status: OrderStatus::Pending,
        delivery_address: field(row, fields, "delivery_address")?.to_string(),
        scheduled_date: field(row, fields, "scheduled_date")?.to_string(),
        assigned_vehicle_id: None,
        assigned_driver_id: None,
        priority,
        required_production_time,
        estimated_delivery_time,
        required_vehicle_type: fields
            .get(OPTIONAL_VEHICLE_TYPE)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string()),
        id,
    })
}

/// 同一订单的后续行只贡献明细;订单级字段必须一致
fn merge_row(row: usize, order: &mut Order, parsed: Order) -> ImportResult<()> {
    let conflict = |message: String| ImportError::InconsistentOrder {
        row,
        order_id: order.id.clone(),
        message,
    };
    if parsed.customer_id != order.customer_id {
        return Err(conflict(format!(
            "customer_id {} ≠ {}",
            parsed.customer_id, order.customer_id
        )));
    }
    if parsed.priority != order.priority {
        return Err(conflict(format!(
            "priority {} ≠ {}",
            parsed.priority, order.priority
        )));
    }
    if parsed.delivery_address != order.delivery_address {
        return Err(conflict("delivery_address 不一致".to_string()));
    }

    let seq = order.items.len() + 1;
    for mut item in parsed.items {
        item.id = format!("{}-{}", order.id, seq);
        order.items.push(item);
    }
    Ok(())
}
