use std::sync::LazyLock;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client shared by every outbound call.
///
/// Initialized lazily on first access so connections are pooled across
/// requests and projects. Per-request deadlines are set with
/// `RequestBuilder::timeout` by the callers; the values here are the ceiling.
///
/// # Example
/// ```rust,ignore
/// use pushgate::external::HTTP_CLIENT;
///
/// async fn fetch_data() -> Result<String, reqwest::Error> {
///     HTTP_CLIENT
///         .get("https://api.example.com/data")
///         .send()
///         .await?
///         .text()
///         .await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
});
