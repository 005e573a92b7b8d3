//! 状态观察者（StatusObserver）
//!
//! 货运单状态每次写入后被同步调用；观察者自身的失败会原样交还给调用方，
//! 不做隔离或重试。
//!
use crate::shipment::Shipment;
use tracing::info;

/// 状态变更观察者
pub trait StatusObserver: Send + Sync {
    /// 观察者名称（用于失败时定位）
    fn name(&self) -> &str;

    /// 接收已写入新状态的货运单
    fn on_status_changed(&self, shipment: &Shipment) -> anyhow::Result<()>;
}

/// 邮件通知观察者
///
/// 以日志代替真实的邮件投递。
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailNotificationObserver;

impl EmailNotificationObserver {
    pub const NAME: &'static str = "email-notification";

    /// 通知正文
    pub fn message(shipment: &Shipment) -> String {
        let tracking = shipment
            .tracking_number()
            .map(|t| t.as_str())
            .unwrap_or("<unassigned>");
        format!(
            "EMAIL NOTIFICATION → Tracking {} is now {}!",
            tracking,
            shipment.status()
        )
    }
}

impl StatusObserver for EmailNotificationObserver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_status_changed(&self, shipment: &Shipment) -> anyhow::Result<()> {
        info!(
            target: "notification",
            tracking_number = shipment.tracking_number().map(|t| t.as_str()),
            status = %shipment.status(),
            "{}",
            Self::message(shipment)
        );
        Ok(())
    }
}
