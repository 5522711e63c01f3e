// ==========================================
// LogiFlow 排程引擎 - 文档存储接口
// ==========================================
// 职责: 以"集合 + 生成ID"的方式读写订单与排程记录
// 红线: Repository 不含业务逻辑
// ==========================================

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::repository::error::{RepositoryError, RepositoryResult};

/// 集合名称
pub mod collections {
    pub const ORDERS: &str = "orders";
    pub const PRODUCTION_SCHEDULES: &str = "productionSchedules";
    pub const DELIVERY_SCHEDULES: &str = "deliverySchedules";
}

/// 列表排序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    CreatedAtAsc,
    CreatedAtDesc,
}

/// 存储文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub collection: String,
    pub created_at: NaiveDateTime,
    pub body: serde_json::Value,
}

impl Document {
    /// 文档体反序列化为领域对象
    pub fn decode<T: DeserializeOwned>(&self) -> RepositoryResult<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

// ==========================================
// DocumentStore Trait
// ==========================================
pub trait DocumentStore: Send + Sync {
    /// 新建文档,返回生成的ID
    fn create(&self, collection: &str, record: &serde_json::Value) -> RepositoryResult<String>;

    /// 按指定ID写入（存在则覆盖文档体,保留创建时间）
    fn upsert(&self, collection: &str, id: &str, record: &serde_json::Value) -> RepositoryResult<()>;

    /// 列出集合内全部文档
    fn list(&self, collection: &str, order_by: Option<OrderBy>) -> RepositoryResult<Vec<Document>>;
}

/// 序列化后新建
pub fn create_record<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> RepositoryResult<String> {
    let value = serde_json::to_value(record)?;
    if !value.is_object() {
        return Err(RepositoryError::ValidationError(format!(
            "集合{}只接受对象文档",
            collection
        )));
    }
    store.create(collection, &value)
}

/// 序列化后按ID写入
pub fn upsert_record<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    record: &T,
) -> RepositoryResult<()> {
    let value = serde_json::to_value(record)?;
    store.upsert(collection, id, &value)
}
