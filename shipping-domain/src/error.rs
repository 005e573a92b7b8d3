//! 领域层统一错误定义
//!
//! 覆盖查找失败、状态校验、观察者失败与持久化等最小必要集合，
//! 应用层通过 `From` 统一包装为自己的错误类型。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 查找 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },

    // --- 领域规则/状态 ---
    #[error("invalid status: {value}")]
    InvalidStatus { value: String },
    #[error("invalid transition: from={from}, to={to}")]
    InvalidTransition { from: String, to: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    // --- 通知 ---
    #[error("observer failed: observer={observer}, reason={reason}")]
    Observer { observer: String, reason: String },

    // --- 持久化 ---
    #[error("database error: {reason}")]
    Database { reason: String },

    // --- 通用 ---
    #[error("parse error: {reason}")]
    Parse { reason: String },
}

impl DomainError {
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            reason: format!("{kind} id={id}"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                reason: "row not found".to_string(),
            },
            other => DomainError::Database {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        let err = DomainError::not_found("shipment", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: shipment id=42");
    }

    #[test]
    fn parse_int_errors_convert() {
        let err: DomainError = "x1".parse::<i64>().unwrap_err().into();
        match err {
            DomainError::Parse { .. } => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}
