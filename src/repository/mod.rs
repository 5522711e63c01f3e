// ==========================================
// LogiFlow 排程引擎 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 文档存储接口,屏蔽数据库细节
// 约束: 所有查询使用参数化
// ==========================================

pub mod document_store;
pub mod error;
pub mod sqlite_document_store;

// 重导出
pub use document_store::{collections, create_record, upsert_record, Document, DocumentStore, OrderBy};
pub use error::{RepositoryError, RepositoryResult};
pub use sqlite_document_store::SqliteDocumentStore;
