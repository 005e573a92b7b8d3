//! 货运跟踪领域层（shipping-domain）
//!
//! 提供订单与货运单的领域模型，以及围绕状态变更通知的最小构件：
//! - 实体（`entity`）与值对象（`value_object`、`status`）建模
//! - 状态观察者（`observer`）与一次性的更新上下文（`update`）
//! - 时钟（`clock`）与运单号生成（`tracking`）端口
//! - 仓储接口与内存/SQLite 实现（`persist`）
//!
//! 观察者属于进程内的瞬时状态，不随实体持久化；由调用方在每次操作时
//! 通过 `ShipmentUpdate` 挂接。
//!
pub mod clock;
pub mod entity;
pub mod error;
pub mod observer;
pub mod order;
pub mod persist;
pub mod shipment;
pub mod status;
pub mod tracking;
pub mod update;
pub mod value_object;

// 允许在本 crate 内部通过 ::shipping_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 中也能解析。
extern crate self as shipping_domain;
