use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipping_domain::entity::Entity;
use shipping_domain::order::Order;
use shipping_domain::shipment::Shipment;

/// 数据传输对象（DTO）
///
/// - 作为应用层的输出载体，面向接口/外部系统序列化友好；
/// - 与领域模型解耦，避免将领域对象直接暴露到接口层。
pub trait Dto: Serialize + Send + Sync + 'static {}

impl<T: Dto> Dto for Vec<T> {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDto {
    pub id: i64,
    pub tracking_number: Option<String>,
    pub carrier: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dto for ShipmentDto {}

impl From<&Shipment> for ShipmentDto {
    fn from(shipment: &Shipment) -> Self {
        Self {
            id: *shipment.id().value(),
            tracking_number: shipment.tracking_number().map(|t| t.as_str().to_string()),
            carrier: shipment.carrier().as_str().to_string(),
            status: shipment.status().as_str().to_string(),
            created_at: shipment.created_at(),
            updated_at: shipment.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub shipment: Option<ShipmentDto>,
}

impl Dto for OrderDto {}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: *order.id().value(),
            order_number: order.order_number().to_string(),
            customer_name: order.customer_name().to_string(),
            customer_email: order.customer_email().as_str().to_string(),
            shipping_address: order.shipping_address().to_string(),
            weight: order.weight(),
            created_at: order.created_at(),
            shipment: order.shipment().map(ShipmentDto::from),
        }
    }
}
