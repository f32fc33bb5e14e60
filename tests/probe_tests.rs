// tests/probe_tests.rs
use http_probe::{run_probe, Probe, ProbeConfig, IS_STATUS_200};
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

fn target(server: &mockito::ServerGuard) -> Url {
    Url::parse(&server.url()).unwrap()
}

/// A local address with nothing listening on it.
fn closed_port_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap()
}

/// Accepts connections and never writes a byte back.
async fn silent_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// Answers 200 but closes the connection before the promised body is sent.
async fn truncated_body_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\nshort")
                .await;
            let _ = socket.shutdown().await;
        }
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn test_status_200_passes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let result = run_probe(&Client::new(), &target(&server)).await;

    assert_eq!(result.get(IS_STATUS_200), Some(true));
    assert_eq!(result.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_200_statuses_fail() {
    for status in [201, 204, 301, 404, 500, 503] {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(status)
            .create_async()
            .await;

        let result = run_probe(&Client::new(), &target(&server)).await;
        assert_eq!(result.get(IS_STATUS_200), Some(false), "status {}", status);
    }
}

#[tokio::test]
async fn test_refused_connection_yields_false() {
    let result = run_probe(&Client::new(), &closed_port_url()).await;
    assert_eq!(result.get(IS_STATUS_200), Some(false));
    assert!(!result.passed());
}

#[tokio::test]
async fn test_repeated_probes_agree() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body("")
        .expect(3)
        .create_async()
        .await;

    let client = Client::new();
    let url = target(&server);
    let first = run_probe(&client, &url).await;
    let second = run_probe(&client, &url).await;
    let third = run_probe(&client, &url).await;

    assert_eq!(first, second);
    assert_eq!(second, third);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_probe_runs_against_configured_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/health")
        .match_header("user-agent", "probe-test")
        .with_status(200)
        .with_body("OK")
        .create_async()
        .await;

    let config = ProbeConfig {
        target_url: target(&server).join("/health").unwrap(),
        timeout_secs: Some(5),
        user_agent: Some("probe-test".to_string()),
    };
    let report = Probe::new(config).unwrap().run().await;

    assert!(report.passed());
    assert_eq!(report.status, Some(200));
    assert_eq!(report.error, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_report_for_unreachable_target() {
    let config = ProbeConfig {
        target_url: closed_port_url(),
        timeout_secs: Some(2),
        user_agent: None,
    };
    let report = Probe::new(config).unwrap().run().await;

    assert!(!report.passed());
    assert_eq!(report.status, None);
    assert!(report.error.unwrap().starts_with("Connection error"));
}

#[tokio::test]
async fn test_report_serializes_checks_by_name() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let config = ProbeConfig {
        target_url: target(&server),
        ..ProbeConfig::default()
    };
    let report = Probe::new(config).unwrap().run().await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["checks"][IS_STATUS_200], serde_json::Value::Bool(false));
    assert_eq!(json["status"], serde_json::json!(500));
    assert!(json["run_id"].is_string());
}

#[tokio::test]
async fn test_timeout_yields_false() {
    let config = ProbeConfig {
        target_url: silent_server().await,
        timeout_secs: Some(1),
        user_agent: None,
    };
    let report = Probe::new(config).unwrap().run().await;

    assert_eq!(report.status, None);
    assert!(report.error.as_deref().unwrap().starts_with("Connection error"));
    assert_eq!(report.checks.get(IS_STATUS_200), Some(false));
    assert!(report.response_time_ms < 10_000);
}

#[tokio::test]
async fn test_truncated_body_discards_status() {
    let config = ProbeConfig {
        target_url: truncated_body_server().await,
        timeout_secs: Some(5),
        user_agent: None,
    };
    let report = Probe::new(config).unwrap().run().await;

    assert_eq!(report.status, None);
    assert!(report.error.as_deref().unwrap().starts_with("Connection error"));
    assert_eq!(report.checks.get(IS_STATUS_200), Some(false));
}
