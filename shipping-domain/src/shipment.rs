//! 货运单实体
//!
//! 只承载可持久化的数据；状态变更通知由 [`ShipmentUpdate`](crate::update::ShipmentUpdate)
//! 在一次操作期间挂接的观察者完成。
//!
use crate::entity::{Entity, Timestamp};
use crate::status::ShipmentStatus;
use crate::tracking::TrackingNumberGenerator;
use crate::value_object::{Carrier, TrackingNumber};
use shipping_macros::{entity, entity_id};

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct ShipmentId(i64);

#[entity(id = ShipmentId)]
#[derive(Clone, PartialEq)]
pub struct Shipment {
    tracking_number: Option<TrackingNumber>,
    carrier: Carrier,
    status: ShipmentStatus,
    updated_at: Timestamp,
}

impl Shipment {
    /// 新建尚未持久化的货运单：状态 `PENDING`，没有标识与运单号
    pub fn draft(carrier: Carrier, now: Timestamp) -> Self {
        let mut shipment = <Self as Entity>::new(ShipmentId::default(), now);
        shipment.carrier = carrier;
        shipment.updated_at = now;
        shipment
    }

    /// 由存储层还原
    pub fn restore(
        id: ShipmentId,
        tracking_number: Option<TrackingNumber>,
        carrier: Carrier,
        status: ShipmentStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            created_at,
            tracking_number,
            carrier,
            status,
            updated_at,
        }
    }

    /// 尚未由存储分配标识
    pub fn is_transient(&self) -> bool {
        self.id.is_unassigned()
    }

    pub fn tracking_number(&self) -> Option<&TrackingNumber> {
        self.tracking_number.as_ref()
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn status(&self) -> &ShipmentStatus {
        &self.status
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// 缺少运单号时分配一个，已有运单号时保持不变；返回是否发生了分配
    pub fn ensure_tracking_number(&mut self, numbers: &dyn TrackingNumberGenerator) -> bool {
        if self.tracking_number.is_some() {
            return false;
        }
        self.tracking_number = Some(numbers.next_tracking_number());
        true
    }

    pub(crate) fn assign_id(&mut self, id: ShipmentId) {
        self.id = id;
    }

    /// 覆盖状态并刷新更新时间，更新时间不会回退
    pub(crate) fn write_status(&mut self, status: ShipmentStatus, now: Timestamp) {
        self.status = status;
        self.updated_at = self.updated_at.max(now);
    }
}
