//! 货运单状态与状态写入策略
//!
//! 预期的生命周期为 `PENDING → PICKED_UP → IN_TRANSIT → DELIVERED`。
//! 默认策略不做任何约束：任意字符串都会被原样记录，
//! 未知取值保存在 `Unrecognized` 中。
//!
use crate::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use shipping_macros::value_object;
use std::{convert::Infallible, fmt, str::FromStr};

#[value_object]
#[serde(from = "String", into = "String")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    PickedUp,
    InTransit,
    Delivered,
    /// 生命周期之外的原始取值
    Unrecognized(String),
}

impl ShipmentStatus {
    /// 按生命周期排列的已知状态
    pub const LIFECYCLE: [ShipmentStatus; 4] = [
        ShipmentStatus::Pending,
        ShipmentStatus::PickedUp,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
    ];

    /// 精确匹配（区分大小写），无法识别时保留原始字符串
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PENDING" => Self::Pending,
            "PICKED_UP" => Self::PickedUp,
            "IN_TRANSIT" => Self::InTransit,
            "DELIVERED" => Self::Delivered,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    fn position(&self) -> Option<usize> {
        Self::LIFECYCLE.iter().position(|s| s == self)
    }

    /// 生命周期中的下一个状态；`DELIVERED` 与未知状态没有后继
    pub fn successor(&self) -> Option<Self> {
        self.position()
            .and_then(|i| Self::LIFECYCLE.get(i + 1))
            .cloned()
    }
}

impl From<&str> for ShipmentStatus {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for ShipmentStatus {
    fn from(raw: String) -> Self {
        match Self::parse(&raw) {
            Self::Unrecognized(_) => Self::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<ShipmentStatus> for String {
    fn from(status: ShipmentStatus) -> Self {
        match status {
            ShipmentStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ShipmentStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 状态写入策略
///
/// - `Permissive`：不做校验，允许未知取值与回退
/// - `Linear`：只允许保持原状态或前进到生命周期中的下一个状态；
///   当前状态为未知取值时，允许写入任一已知状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    #[default]
    Permissive,
    Linear,
}

impl StatusPolicy {
    /// 检查 `from → to` 是否允许；该检查先于任何状态修改与通知
    pub fn check(&self, from: &ShipmentStatus, to: &ShipmentStatus) -> DomainResult<()> {
        match self {
            StatusPolicy::Permissive => Ok(()),
            StatusPolicy::Linear => {
                if !to.is_recognized() {
                    return Err(DomainError::InvalidStatus {
                        value: to.as_str().to_string(),
                    });
                }
                if !from.is_recognized() || from == to || from.successor().as_ref() == Some(to) {
                    return Ok(());
                }
                Err(DomainError::InvalidTransition {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses_exactly() {
        assert_eq!(ShipmentStatus::parse("PICKED_UP"), ShipmentStatus::PickedUp);
        assert_eq!(
            ShipmentStatus::parse("picked_up"),
            ShipmentStatus::Unrecognized("picked_up".into())
        );
        for status in ShipmentStatus::LIFECYCLE {
            assert_eq!(ShipmentStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unrecognized_keeps_the_literal_value() {
        let status: ShipmentStatus = "NOT_A_REAL_STATUS".into();
        assert!(!status.is_recognized());
        assert_eq!(status.to_string(), "NOT_A_REAL_STATUS");
        assert_eq!(String::from(status), "NOT_A_REAL_STATUS");
    }

    #[test]
    fn successor_follows_the_lifecycle() {
        assert_eq!(
            ShipmentStatus::Pending.successor(),
            Some(ShipmentStatus::PickedUp)
        );
        assert_eq!(
            ShipmentStatus::InTransit.successor(),
            Some(ShipmentStatus::Delivered)
        );
        assert_eq!(ShipmentStatus::Delivered.successor(), None);
        assert_eq!(ShipmentStatus::Unrecognized("X".into()).successor(), None);
    }

    #[test]
    fn permissive_policy_accepts_anything() {
        let policy = StatusPolicy::default();
        assert_eq!(policy, StatusPolicy::Permissive);
        assert!(
            policy
                .check(&ShipmentStatus::Delivered, &ShipmentStatus::Pending)
                .is_ok()
        );
        assert!(
            policy
                .check(&ShipmentStatus::Pending, &"NOPE".into())
                .is_ok()
        );
    }

    #[test]
    fn linear_policy_allows_only_forward_single_steps() {
        let policy = StatusPolicy::Linear;
        assert!(
            policy
                .check(&ShipmentStatus::Pending, &ShipmentStatus::PickedUp)
                .is_ok()
        );
        assert!(
            policy
                .check(&ShipmentStatus::InTransit, &ShipmentStatus::InTransit)
                .is_ok()
        );

        match policy.check(&ShipmentStatus::Pending, &ShipmentStatus::Delivered) {
            Err(DomainError::InvalidTransition { from, to }) => {
                assert_eq!(from, "PENDING");
                assert_eq!(to, "DELIVERED");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(
            policy
                .check(&ShipmentStatus::Delivered, &ShipmentStatus::Pending)
                .is_err()
        );
    }

    #[test]
    fn linear_policy_rejects_unknown_targets_but_repairs_unknown_sources() {
        let policy = StatusPolicy::Linear;
        match policy.check(&ShipmentStatus::Pending, &"LOST".into()) {
            Err(DomainError::InvalidStatus { value }) => assert_eq!(value, "LOST"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(
            policy
                .check(&"LOST".into(), &ShipmentStatus::InTransit)
                .is_ok()
        );
    }
}
