//! 货运跟踪应用层（shipping-application）
//!
//! 以 CQRS 的方式组织用例：命令改变状态，查询只读；
//! 两者均经由内存总线分发到处理器，处理器再委托给应用服务。
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod order_service;
pub mod orders;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod shipment_service;
pub mod shipments;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
pub use order_service::OrderService;
pub use shipment_service::ShipmentWorkflowService;
