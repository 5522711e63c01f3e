// ==========================================
// LogiFlow 排程引擎 - SQLite 文档存储
// ==========================================
// 职责: documents 表的写入与列表查询
// 红线: Repository 不含业务逻辑
// ==========================================

use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::document_store::{Document, DocumentStore, OrderBy};
use crate::repository::error::{RepositoryError, RepositoryResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// ==========================================
// SqliteDocumentStore
// ==========================================
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// 打开数据库文件并建表
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 内存库（测试/演示）
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl DocumentStore for SqliteDocumentStore {
    #[instrument(skip(self, record))]
    fn create(&self, collection: &str, record: &serde_json::Value) -> RepositoryResult<String> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(record)?;
        let created_at = Self::now().format(TIMESTAMP_FORMAT).to_string();

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO documents (collection, id, body_json, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![collection, id, body, created_at],
        )?;

        debug!(collection, id = %id, "文档已写入");
        Ok(id)
    }

    #[instrument(skip(self, record))]
    fn upsert(&self, collection: &str, id: &str, record: &serde_json::Value) -> RepositoryResult<()> {
        let body = serde_json::to_string(record)?;
        let created_at = Self::now().format(TIMESTAMP_FORMAT).to_string();

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO documents (collection, id, body_json, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(collection, id) DO UPDATE SET body_json = excluded.body_json
            "#,
            params![collection, id, body, created_at],
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn list(&self, collection: &str, order_by: Option<OrderBy>) -> RepositoryResult<Vec<Document>> {
        let order_clause = match order_by {
            Some(OrderBy::CreatedAtDesc) => "ORDER BY created_at DESC, rowid DESC",
            Some(OrderBy::CreatedAtAsc) | None => "ORDER BY created_at ASC, rowid ASC",
        };
        let sql = format!(
            "SELECT id, collection, body_json, created_at FROM documents WHERE collection = ?1 {}",
            order_clause
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, collection, body_json, created_at) = row?;
            let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
                .map_err(|e| {
                    RepositoryError::SerializationError(format!(
                        "文档{}创建时间无法解析: {}",
                        id, e
                    ))
                })?;
            documents.push(Document {
                id,
                collection,
                created_at,
                body: serde_json::from_str(&body_json)?,
            });
        }
        Ok(documents)
    }
}
