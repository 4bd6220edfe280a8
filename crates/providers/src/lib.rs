//! Outbound collaborators: where the catalog comes from and who answers chat turns.

pub mod catalog;
pub mod completion;

use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_max_idle_per_host(2)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Process-wide HTTP client; cloning shares the connection pool.
pub(crate) fn shared_http() -> Client {
    SHARED_HTTP.clone()
}
