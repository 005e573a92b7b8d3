use shipping_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: {kind}={name}")]
    AlreadyRegistered {
        kind: &'static str,
        name: &'static str,
    },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Domain(e) if e.is_not_found())
    }

    /// 调用方输入不被接受（值非法、状态不允许等）
    pub fn is_rejected_input(&self) -> bool {
        match self {
            AppError::Validation(_) => true,
            AppError::Domain(e) => matches!(
                e,
                DomainError::InvalidValue { .. }
                    | DomainError::InvalidStatus { .. }
                    | DomainError::InvalidTransition { .. }
                    | DomainError::InvalidState { .. }
                    | DomainError::Parse { .. }
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_domain_errors() {
        let missing: AppError = DomainError::not_found("shipment", 7).into();
        assert!(missing.is_not_found());
        assert!(!missing.is_rejected_input());

        let bad: AppError = DomainError::InvalidStatus {
            value: "LOST".into(),
        }
        .into();
        assert!(bad.is_rejected_input());
        assert!(!bad.is_not_found());

        let db: AppError = DomainError::Database {
            reason: "disk full".into(),
        }
        .into();
        assert!(!db.is_rejected_input());
        assert!(AppError::Validation("empty".into()).is_rejected_input());
    }
}
