//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use crate::error::{DomainError, DomainResult};
use shipping_macros::value_object;
use std::fmt;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 承运商名称，默认 `DHL`
#[value_object(default = false)]
#[derive(Hash)]
pub struct Carrier(String);

impl Carrier {
    pub const DEFAULT: &'static str = "DHL";

    pub fn parse(name: impl Into<String>) -> DomainResult<Self> {
        let carrier = Self(name.into().trim().to_string());
        carrier.validate()?;
        Ok(carrier)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Carrier {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl ValueObject for Carrier {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                reason: "carrier must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 运单号：一经分配不再变更
#[value_object(default = false)]
#[derive(Hash)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for TrackingNumber {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.trim().is_empty() {
            return Err(DomainError::InvalidValue {
                reason: "tracking number must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 客户邮箱
#[value_object]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let email = Self(raw.into().trim().to_string());
        email.validate()?;
        Ok(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for EmailAddress {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        match self.0.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(DomainError::InvalidValue {
                reason: format!("invalid email address: {:?}", self.0),
            }),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
