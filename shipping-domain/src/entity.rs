//! 实体（Entity）基础抽象
//!
//! 为订单与货运单提供统一的标识与创建时间。
//!
use chrono::{DateTime, Utc};
use std::{fmt::Display, str::FromStr};

/// 领域内统一使用的时间戳类型
pub type Timestamp = DateTime<Utc>;

/// 具备唯一标识与创建时间的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display;

    /// 使用给定标识与创建时间构造实体，其余字段取默认值
    fn new(id: Self::Id, created_at: Timestamp) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取创建时间
    fn created_at(&self) -> Timestamp;
}
