//! 订单实体
//!
//! 订单独占其货运单（一对一，至多一个），删除订单时货运单随之删除。
//!
use crate::entity::{Entity, Timestamp};
use crate::error::{DomainError, DomainResult};
use crate::shipment::Shipment;
use crate::value_object::EmailAddress;
use serde::{Deserialize, Serialize};
use shipping_macros::{entity, entity_id};

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct OrderId(i64);

#[entity(id = OrderId)]
#[derive(Clone, PartialEq)]
pub struct Order {
    order_number: String,
    customer_name: String,
    customer_email: EmailAddress,
    shipping_address: String,
    weight: f64,
    shipment: Option<Shipment>,
}

/// 下单输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub weight: f64,
}

fn require_text(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidValue {
            reason: format!("{field} must not be empty"),
        });
    }
    Ok(value.to_string())
}

impl Order {
    /// 校验输入并构造尚未持久化的订单
    pub fn place(input: NewOrder, now: Timestamp) -> DomainResult<Self> {
        if !input.weight.is_finite() || input.weight <= 0.0 {
            return Err(DomainError::InvalidValue {
                reason: format!("weight must be a positive number, got {}", input.weight),
            });
        }

        let mut order = <Self as Entity>::new(OrderId::default(), now);
        order.order_number = require_text("order_number", &input.order_number)?;
        order.customer_name = require_text("customer_name", &input.customer_name)?;
        order.customer_email = EmailAddress::parse(input.customer_email)?;
        order.shipping_address = require_text("shipping_address", &input.shipping_address)?;
        order.weight = input.weight;
        Ok(order)
    }

    /// 由存储层还原（字段已在下单时校验过）
    pub fn restore(
        id: OrderId,
        created_at: Timestamp,
        details: NewOrder,
        shipment: Option<Shipment>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            created_at,
            order_number: details.order_number,
            customer_name: details.customer_name,
            customer_email: EmailAddress::parse(details.customer_email)?,
            shipping_address: details.shipping_address,
            weight: details.weight,
            shipment,
        })
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_unassigned()
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &EmailAddress {
        &self.customer_email
    }

    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn shipment(&self) -> Option<&Shipment> {
        self.shipment.as_ref()
    }

    /// 挂接货运单；订单至多拥有一个货运单
    pub fn attach_shipment(&mut self, shipment: Shipment) -> DomainResult<()> {
        if self.shipment.is_some() {
            return Err(DomainError::InvalidState {
                reason: format!("order {} already has a shipment", self.order_number),
            });
        }
        self.shipment = Some(shipment);
        Ok(())
    }

    /// 订单自身字段，不含货运单
    pub fn details(&self) -> NewOrder {
        NewOrder {
            order_number: self.order_number.clone(),
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.as_str().to_string(),
            shipping_address: self.shipping_address.clone(),
            weight: self.weight,
        }
    }

    pub(crate) fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }

    pub(crate) fn take_shipment(&mut self) -> Option<Shipment> {
        self.shipment.take()
    }

    pub(crate) fn put_shipment(&mut self, shipment: Option<Shipment>) {
        self.shipment = shipment;
    }
}
