// ==========================================
// LogiFlow 排程引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 行号: 数据行从 1 开始计数（不含表头）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    // ===== 数据映射错误 =====
    #[error("字段缺失 (行 {row}, 字段 {field})")]
    MissingField { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("订单字段冲突 (行 {row}, 订单 {order_id}): {message}")]
    InconsistentOrder {
        row: usize,
        order_id: String,
        message: String,
    },

    #[error("订单校验失败 (行 {row}): {message}")]
    InvalidOrder { row: usize, message: String },
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// 导入模块 Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
