//! In-process mock of the MarketMind backend.

#![allow(dead_code)]

use axum::Router;
use client::ApiClient;
use shared::config::client::ClientConfig;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct MockBackend {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Serves `router` on an ephemeral local port.
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let (shutdown, signal) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    signal.await.ok();
                })
                .await
                .expect("mock backend");
        });

        Self {
            addr,
            shutdown: Some(shutdown),
            task,
        }
    }

    pub fn config(&self) -> ClientConfig {
        config_for(self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("api client")
    }

    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = (&mut self.task).await;
    }
}

pub fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        api_base_url: format!("http://{addr}/api"),
        health_url: format!("http://{addr}/"),
        request_timeout_secs: 5,
        ..ClientConfig::with_defaults()
    }
}

/// A local address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}
