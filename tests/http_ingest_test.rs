/*!
 * Integration tests for the report listener
 *
 * A real server is bound to an ephemeral port and driven over HTTP:
 * - Empty and malformed bodies are rejected with 400 before reaching the controller
 * - Valid reports are acknowledged and counted
 * - The status snapshot prunes stale vehicles before computing green time
 */

use sintra::{config::ControllerConfig, server, AppState};
use sintra_core_presence::ManualClock;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    clock: Arc<ManualClock>,
    state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<sintra::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let clock = Arc::new(ManualClock::new(0));
        let state = AppState::with_clock(&ControllerConfig::default(), clock.clone()).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
        let addr = listener.local_addr().expect("read local addr");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::serve(listener, state.clone(), async move {
            rx.await.ok();
        }));

        Self {
            addr,
            clock,
            state,
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn post_gps(&self, body: &str) -> (u16, String) {
        let response = reqwest::Client::new()
            .post(self.url("/gps"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("send report");
        let status = response.status().as_u16();
        (status, response.text().await.expect("read body"))
    }

    async fn status(&self) -> serde_json::Value {
        reqwest::get(self.url("/status"))
            .await
            .expect("request status")
            .json()
            .await
            .expect("parse json")
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
        self.handle.await.expect("join server").expect("server result");
    }
}

fn report(id: &str) -> String {
    serde_json::json!({ "id": id, "latitude": -19.9167, "longitude": -43.9345 }).to_string()
}

#[tokio::test]
async fn empty_body_is_bad_request() {
    let server = TestServer::start().await;

    let (status, body) = server.post_gps("").await;
    assert_eq!(status, 400);
    assert_eq!(body, "Bad Request");
    assert_eq!(server.state.controller.lock().await.live_count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn malformed_payloads_are_rejected() {
    let server = TestServer::start().await;

    for body in [
        "{not json",
        r#"{"id":"car-1","latitude":1.0}"#,
        r#"{"id":"car-1","latitude":"x","longitude":1.0}"#,
        r#"{"id":"","latitude":1.0,"longitude":1.0}"#,
    ] {
        let (status, text) = server.post_gps(body).await;
        assert_eq!(status, 400, "body {:?}", body);
        assert_eq!(text, "Invalid JSON");
    }
    assert_eq!(server.state.controller.lock().await.live_count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn valid_report_is_acknowledged_and_tracked() {
    let server = TestServer::start().await;

    let (status, body) = server.post_gps(&report("bus-42")).await;
    assert_eq!(status, 200);
    assert_eq!(body, "Location received");

    {
        let controller = server.state.controller.lock().await;
        let record = controller.registry().get("bus-42").expect("record present");
        assert_eq!(record.latitude, -19.9167);
        assert_eq!(record.longitude, -43.9345);
        assert_eq!(record.last_seen, 0);
    }

    server.stop().await;
}

#[tokio::test]
async fn status_reflects_presence_and_staleness() {
    let server = TestServer::start().await;

    for id in ["A", "B", "C", "D", "E", "F"] {
        let (status, _) = server.post_gps(&report(id)).await;
        assert_eq!(status, 200);
    }

    server.clock.set(1_000);
    let status = server.status().await;
    assert_eq!(status["live_count"], 6);
    assert_eq!(status["capacity"], 20);
    assert_eq!(status["green_secs"], 10);

    server.clock.set(35_000);
    let status = server.status().await;
    assert_eq!(status["live_count"], 0);
    assert_eq!(status["green_secs"], 0);

    server.stop().await;
}

#[tokio::test]
async fn full_registry_still_acknowledges_reports() {
    let server = TestServer::start().await;

    for i in 0..21 {
        let (status, _) = server.post_gps(&report(&format!("car-{}", i))).await;
        assert_eq!(status, 200);
    }

    let status = server.status().await;
    assert_eq!(status["live_count"], 20);
    assert_eq!(status["green_secs"], 20);
    assert!(server
        .state
        .controller
        .lock()
        .await
        .registry()
        .get("car-20")
        .is_none());

    server.stop().await;
}
