//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use urlconf::config::SiteConfig;
use urlconf::{build_site, HttpServer, Shutdown};

/// A running site on an ephemeral port.
pub struct TestSite {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        let joined = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
        assert!(matches!(joined, Ok(Ok(Ok(())))), "server did not stop cleanly");
    }
}

/// Start the site described by `config` on 127.0.0.1 with an OS-assigned port.
pub async fn start_site(config: SiteConfig) -> TestSite {
    let site = build_site(&config.routes).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, site);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestSite {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
