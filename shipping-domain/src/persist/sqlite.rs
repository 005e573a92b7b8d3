use super::{OrderRepository, ShipmentRepository};
use crate::entity::{Entity, Timestamp};
use crate::error::DomainResult;
use crate::order::{NewOrder, Order, OrderId};
use crate::shipment::{Shipment, ShipmentId};
use crate::status::ShipmentStatus;
use crate::tracking::TrackingNumberGenerator;
use crate::value_object::{Carrier, TrackingNumber};
use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Row, Sqlite};
use std::sync::Arc;
use tracing::{debug, info};

const CREATE_SHIPMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS shipments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tracking_number TEXT UNIQUE,
    carrier TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

const CREATE_ORDERS: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_number TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    shipping_address TEXT NOT NULL,
    weight REAL NOT NULL,
    created_at TEXT NOT NULL,
    shipment_id INTEGER UNIQUE REFERENCES shipments(id)
)
"#;

const SELECT_SHIPMENT: &str =
    "SELECT id, tracking_number, carrier, status, created_at, updated_at FROM shipments";

const SELECT_ORDER: &str = "SELECT id, order_number, customer_name, customer_email, \
     shipping_address, weight, created_at, shipment_id FROM orders";

/// 基于 SQLite 的货运存储
pub struct SqliteShippingStore {
    pool: SqlitePool,
    tracking: Arc<dyn TrackingNumberGenerator>,
}

impl SqliteShippingStore {
    /// 连接数据库；数据库文件不存在时创建，`auto_migrate` 为真时建表
    pub async fn connect(
        database_url: &str,
        auto_migrate: bool,
        tracking: Arc<dyn TrackingNumberGenerator>,
    ) -> DomainResult<Self> {
        if !Sqlite::database_exists(database_url).await? {
            info!(database_url, "creating sqlite database");
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;
        let store = Self::from_pool(pool, tracking);
        if auto_migrate {
            store.migrate().await?;
        }
        Ok(store)
    }

    /// 使用已有连接池（内存库需要单连接池，否则每个连接各有一份数据）
    pub fn from_pool(pool: SqlitePool, tracking: Arc<dyn TrackingNumberGenerator>) -> Self {
        Self { pool, tracking }
    }

    pub async fn migrate(&self) -> DomainResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(CREATE_SHIPMENTS).execute(&mut *conn).await?;
        sqlx::query(CREATE_ORDERS).execute(&mut *conn).await?;
        info!("sqlite schema ready");
        Ok(())
    }

    fn shipment_from_row(row: &SqliteRow) -> DomainResult<Shipment> {
        let tracking: Option<String> = row.try_get("tracking_number")?;
        let carrier: String = row.try_get("carrier")?;
        let status: String = row.try_get("status")?;

        Ok(Shipment::restore(
            ShipmentId::new(row.try_get("id")?),
            tracking.map(TrackingNumber::new),
            Carrier::parse(carrier)?,
            ShipmentStatus::from(status),
            row.try_get::<Timestamp, _>("created_at")?,
            row.try_get::<Timestamp, _>("updated_at")?,
        ))
    }

    async fn order_from_row(&self, row: &SqliteRow) -> DomainResult<Order> {
        let shipment = match row.try_get::<Option<i64>, _>("shipment_id")? {
            Some(id) => ShipmentRepository::find_by_id(self, &ShipmentId::new(id)).await?,
            None => None,
        };

        let details = NewOrder {
            order_number: row.try_get("order_number")?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            shipping_address: row.try_get("shipping_address")?,
            weight: row.try_get("weight")?,
        };

        Order::restore(
            OrderId::new(row.try_get("id")?),
            row.try_get::<Timestamp, _>("created_at")?,
            details,
            shipment,
        )
    }
}

#[async_trait]
impl ShipmentRepository for SqliteShippingStore {
    async fn save(&self, mut shipment: Shipment) -> DomainResult<Shipment> {
        shipment.ensure_tracking_number(self.tracking.as_ref());
        let tracking = shipment.tracking_number().map(|t| t.as_str().to_string());

        if shipment.is_transient() {
            let result = sqlx::query(
                "INSERT INTO shipments (tracking_number, carrier, status, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(tracking)
            .bind(shipment.carrier().as_str())
            .bind(shipment.status().as_str())
            .bind(shipment.created_at())
            .bind(shipment.updated_at())
            .execute(&self.pool)
            .await?;
            shipment.assign_id(ShipmentId::new(result.last_insert_rowid()));
        } else {
            sqlx::query(
                "INSERT INTO shipments \
                 (id, tracking_number, carrier, status, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                 ON CONFLICT(id) DO UPDATE SET tracking_number = excluded.tracking_number, \
                 carrier = excluded.carrier, status = excluded.status, \
                 updated_at = excluded.updated_at",
            )
            .bind(*shipment.id().value())
            .bind(tracking)
            .bind(shipment.carrier().as_str())
            .bind(shipment.status().as_str())
            .bind(shipment.created_at())
            .bind(shipment.updated_at())
            .execute(&self.pool)
            .await?;
        }

        debug!(shipment_id = %shipment.id(), status = %shipment.status(), "shipment stored");
        Ok(shipment)
    }

    async fn find_by_id(&self, id: &ShipmentId) -> DomainResult<Option<Shipment>> {
        let row = sqlx::query(&format!("{SELECT_SHIPMENT} WHERE id = ?1"))
            .bind(*id.value())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::shipment_from_row).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Shipment>> {
        let rows = sqlx::query(&format!("{SELECT_SHIPMENT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::shipment_from_row).collect()
    }

    async fn delete(&self, id: &ShipmentId) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE orders SET shipment_id = NULL WHERE shipment_id = ?1")
            .bind(*id.value())
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM shipments WHERE id = ?1")
            .bind(*id.value())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let removed = result.rows_affected() > 0;
        if removed {
            debug!(shipment_id = %id, "shipment deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl OrderRepository for SqliteShippingStore {
    async fn save(&self, mut order: Order) -> DomainResult<Order> {
        let shipment = match order.take_shipment() {
            Some(s) => Some(ShipmentRepository::save(self, s).await?),
            None => None,
        };
        let shipment_id = shipment.as_ref().map(|s| *s.id().value());

        if order.is_transient() {
            let result = sqlx::query(
                "INSERT INTO orders (order_number, customer_name, customer_email, \
                 shipping_address, weight, created_at, shipment_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(order.order_number())
            .bind(order.customer_name())
            .bind(order.customer_email().as_str())
            .bind(order.shipping_address())
            .bind(order.weight())
            .bind(order.created_at())
            .bind(shipment_id)
            .execute(&self.pool)
            .await?;
            order.assign_id(OrderId::new(result.last_insert_rowid()));
        } else {
            sqlx::query(
                "INSERT INTO orders (id, order_number, customer_name, customer_email, \
                 shipping_address, weight, created_at, shipment_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
                 ON CONFLICT(id) DO UPDATE SET order_number = excluded.order_number, \
                 customer_name = excluded.customer_name, customer_email = excluded.customer_email, \
                 shipping_address = excluded.shipping_address, weight = excluded.weight, \
                 shipment_id = excluded.shipment_id",
            )
            .bind(*order.id().value())
            .bind(order.order_number())
            .bind(order.customer_name())
            .bind(order.customer_email().as_str())
            .bind(order.shipping_address())
            .bind(order.weight())
            .bind(order.created_at())
            .bind(shipment_id)
            .execute(&self.pool)
            .await?;
        }

        debug!(order_id = %order.id(), shipment_id = ?shipment_id, "order stored");
        order.put_shipment(shipment);
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> DomainResult<Option<Order>> {
        let row = sqlx::query(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(*id.value())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(self.order_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<Order>> {
        let rows = sqlx::query(&format!("{SELECT_ORDER} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            orders.push(self.order_from_row(row).await?);
        }
        Ok(orders)
    }

    async fn delete(&self, id: &OrderId) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await?;
        let shipment_id = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT shipment_id FROM orders WHERE id = ?1",
        )
        .bind(*id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(shipment_id) = shipment_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(*id.value())
            .execute(&mut *tx)
            .await?;
        if let Some(shipment_id) = shipment_id {
            sqlx::query("DELETE FROM shipments WHERE id = ?1")
                .bind(shipment_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!(order_id = %id, shipment_id = ?shipment_id, "order deleted");
        Ok(true)
    }
}
