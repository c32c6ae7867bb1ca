// ==========================================
// 教室分配预测系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换 Repository/Engine 错误
//       为用户友好的错误消息
// ==========================================

use crate::engine::forecast::ForecastError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
///
/// 说明: "无可用教室"不在此列, 它是预测的正常输出
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    /// 预测配置不存在 (结构化的"未配置"结果, 非通用异常)
    #[error("预测配置不存在, 请先创建配置")]
    NotConfigured,

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 内部错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::ValidationError(msg)
            | RepositoryError::FieldValueError { message: msg, .. } => ApiError::InvalidInput(msg),
            RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::BusinessRuleViolation(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// 实现 From<ForecastError>
impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::NotConfigured => ApiError::NotConfigured,
            ForecastError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            ForecastError::Repository(repo_err) => repo_err.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
