//! 持久化（persist）
//!
//! 定义货运单与订单的仓储接口，并提供：
//! - 基于 DashMap 的内存实现（`InMemoryShippingStore`）；
//! - 基于 sqlx 的 SQLite 实现（`SqliteShippingStore`，需开启 `sqlite` 特性）。
//!
//! 两种实现遵循相同的保存语义：
//! - 临时实体（标识为 0）在保存时分配下一个标识；
//! - 货运单首次持久化时若缺少运单号则分配一个；
//! - 保存订单时级联保存其货运单，删除订单时级联删除其货运单；
//! - 同一标识的并发保存以最后一次写入为准，不做冲突检测。
//!
mod inmemory;
mod order_repository;
mod shipment_repository;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use inmemory::InMemoryShippingStore;
pub use order_repository::OrderRepository;
pub use shipment_repository::ShipmentRepository;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteShippingStore;
