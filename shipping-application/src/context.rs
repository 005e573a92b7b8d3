use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息，例如：
/// - 关联追踪 `correlation_id`：一次 HTTP 请求对应一个；
/// - 执行者 `actor`：发起操作的用户或系统。
///
/// 典型用法：
/// ```rust
/// use shipping_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .correlation_id("cor-123")
///     .actor("dashboard")
///     .build();
/// assert_eq!(ctx.correlation_id.as_deref(), Some("cor-123"));
/// ```
#[derive(Clone, Debug, Default, Builder)]
pub struct AppContext {
    /// 关联追踪标识（可选）
    #[builder(into)]
    pub correlation_id: Option<String>,
    /// 执行者（可选）
    #[builder(into)]
    pub actor: Option<String>,
}

impl AppContext {
    /// 日志字段用的关联标识，缺省为 `-`
    pub fn correlation(&self) -> &str {
        self.correlation_id.as_deref().unwrap_or("-")
    }
}
