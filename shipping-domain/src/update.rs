//! 货运单更新上下文（ShipmentUpdate）
//!
//! 在一次操作期间可变借用货运单，并携带本次操作挂接的观察者。
//! 观察者不随实体持久化，重新加载后需要由调用方再次挂接。
//!
use crate::clock::Clock;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::observer::StatusObserver;
use crate::shipment::Shipment;
use crate::status::{ShipmentStatus, StatusPolicy};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ShipmentUpdate<'a> {
    shipment: &'a mut Shipment,
    clock: &'a dyn Clock,
    policy: StatusPolicy,
    observers: Vec<Arc<dyn StatusObserver>>,
}

impl<'a> ShipmentUpdate<'a> {
    pub fn new(shipment: &'a mut Shipment, clock: &'a dyn Clock) -> Self {
        Self {
            shipment,
            clock,
            policy: StatusPolicy::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 追加观察者：不去重、不限数量，按挂接顺序通知
    pub fn attach_observer(&mut self, observer: Arc<dyn StatusObserver>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn shipment(&self) -> &Shipment {
        self.shipment
    }

    /// 写入新状态并同步通知全部观察者
    ///
    /// 1. 按策略校验，失败时不修改任何内容；
    /// 2. 覆盖状态并刷新更新时间；
    /// 3. 按挂接顺序调用观察者，首个失败立即返回，后续观察者不再调用。
    pub fn set_status(&mut self, status: impl Into<ShipmentStatus>) -> DomainResult<()> {
        let status = status.into();

        if let Err(err) = self.policy.check(self.shipment.status(), &status) {
            warn!(
                shipment_id = %self.shipment.id(),
                from = %self.shipment.status(),
                to = %status,
                error = %err,
                "status change rejected"
            );
            return Err(err);
        }

        self.shipment.write_status(status, self.clock.now());
        debug!(
            shipment_id = %self.shipment.id(),
            status = %self.shipment.status(),
            observers = self.observers.len(),
            "status written"
        );

        for observer in &self.observers {
            if let Err(e) = observer.on_status_changed(&*self.shipment) {
                let reason = format!("{e:#}");
                warn!(observer = observer.name(), error = %reason, "status observer failed");
                return Err(DomainError::Observer {
                    observer: observer.name().to_string(),
                    reason,
                });
            }
        }

        Ok(())
    }
}
