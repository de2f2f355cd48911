//! Integration tests for HTTP plugin listings served by remote hosts.

use pluginctl::discovery::adapters::HttpRemoteDiscovery;
use pluginctl::discovery::domain::HostList;
use pluginctl::discovery::ports::{PluginDiscovery, PluginDiscoveryError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one canned HTTP response per connection and records request lines.
struct ListingServer {
    address: String,
    requests: tokio::sync::mpsc::UnboundedReceiver<String>,
}

impl ListingServer {
    async fn start(status: &'static str, body: &'static str) -> Result<Self, eyre::Report> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?.to_string();
        let (sender, requests) = tokio::sync::mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buffer = vec![0_u8; 4096];
                let read = stream.read(&mut buffer).await.unwrap_or(0);
                let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
                let request_line = request.lines().next().unwrap_or_default().to_owned();
                if sender.send(request_line).is_err() {
                    break;
                }
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                if stream.write_all(response.as_bytes()).await.is_err() {
                    continue;
                }
                stream.shutdown().await.ok();
            }
        });
        Ok(Self { address, requests })
    }
}

fn discovery(raw_hosts: &[&str]) -> HttpRemoteDiscovery {
    let hosts = HostList::parse(raw_hosts).expect("hosts parse");
    HttpRemoteDiscovery::new(&hosts).expect("remote discovery builds")
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_plugins_from_every_host_in_order() {
    let first = ListingServer::start(
        "200 OK",
        r#"["storage", {"name": "metrics", "description": "Metrics"}]"#,
    )
    .await
    .expect("first server");
    let mut second = ListingServer::start(
        "200 OK",
        r#"[{"name": "scheduler", "endpoint": "grpc://10.1.1.1:9000"}]"#,
    )
    .await
    .expect("second server");

    let plugins = discovery(&[first.address.as_str(), second.address.as_str()])
        .list_plugins()
        .await
        .expect("listing succeeds");

    let names: Vec<&str> = plugins.iter().map(|plugin| plugin.name().as_str()).collect();
    assert_eq!(names, ["storage", "metrics", "scheduler"]);
    let storage = plugins.first().expect("storage plugin");
    assert_eq!(storage.endpoint(), format!("tcp://{}/storage", first.address));
    let scheduler = plugins.last().expect("scheduler plugin");
    assert_eq!(scheduler.endpoint(), "grpc://10.1.1.1:9000");
    assert_eq!(
        second.requests.recv().await.as_deref(),
        Some("GET /plugins HTTP/1.1")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn error_statuses_fail_enumeration() {
    let server = ListingServer::start("503 Service Unavailable", "[]")
        .await
        .expect("server");

    let result = discovery(&[server.address.as_str()]).list_plugins().await;

    assert!(matches!(
        result,
        Err(PluginDiscoveryError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_listings_fail_enumeration() {
    let server = ListingServer::start("200 OK", r#"{"plugins": "nope"}"#)
        .await
        .expect("server");

    let result = discovery(&[server.address.as_str()]).list_plugins().await;

    assert!(matches!(
        result,
        Err(PluginDiscoveryError::MalformedListing { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_hosts_fail_enumeration() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local address").to_string();
    drop(listener);

    let result = discovery(&[address.as_str()]).list_plugins().await;

    assert!(matches!(
        result,
        Err(PluginDiscoveryError::Unreachable { .. })
    ));
}
