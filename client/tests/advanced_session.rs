use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use nhl_api::advanced::{AdvancedStatsSession, EdgeProfile};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

type ServerSocket = WebSocketStream<tokio::net::TcpStream>;

/// Next JSON text frame from the client, skipping control frames
async fn next_json(ws: &mut ServerSocket) -> Option<Value> {
    while let Some(Ok(msg)) = ws.next().await {
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).ok();
        }
    }
    None
}

async fn read_n(ws: &mut ServerSocket, n: usize) -> Vec<Value> {
    let mut received = Vec::new();
    for _ in 0..n {
        if let Some(value) = next_json(ws).await {
            received.push(value);
        }
    }
    received
}

async fn send_json(ws: &mut ServerSocket, value: Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

/// Accept one connection, record its upgrade headers and hand it to `script`
async fn serve_once<F, Fut>(
    headers: Arc<Mutex<Vec<(String, String)>>>,
    script: F,
) -> (String, JoinHandle<Vec<Value>>)
where
    F: FnOnce(ServerSocket) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Vec<Value>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let mut seen = headers.lock().unwrap();
            for (name, value) in req.headers() {
                seen.push((name.to_string(), value.to_str().unwrap_or_default().to_string()));
            }
            seen.push(("path".to_string(), req.uri().path().to_string()));
            Ok(resp)
        };
        let ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();
        script(ws).await
    });

    (format!("ws://{}", addr), handle)
}

fn header(headers: &[(String, String)], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.clone())
}

#[tokio::test]
async fn skater_session_replays_after_first_message() {
    let headers = Arc::new(Mutex::new(Vec::new()));
    let (url, server) = serve_once(headers.clone(), |mut ws| async move {
        let mut received = read_n(&mut ws, 1).await;
        send_json(&mut ws, json!({ "type": "label", "value": "Auston Matthews" })).await;

        received.extend(read_n(&mut ws, 8).await);
        send_json(&mut ws, json!({ "section": "overview", "data": {} })).await;
        ws.send(Message::Text("not json".into())).await.unwrap();
        send_json(&mut ws, json!({ "section": "zonetime", "data": {} })).await;
        ws.close(None).await.unwrap();
        received
    })
    .await;

    let session = AdvancedStatsSession::new(EdgeProfile::skater("8478402"))
        .with_base_url(url)
        .with_cookie_header("session=abc")
        .with_receive_timeout(Duration::from_secs(5));
    let messages = session.run().await.unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["type"], "label");
    assert_eq!(messages[1]["section"], "overview");
    assert_eq!(messages[2]["section"], "zonetime");

    let received = server.await.unwrap();
    assert_eq!(received.len(), 9);
    assert_eq!(received[0]["event"]["action"], "getLabel");
    assert_eq!(received[1]["event"]["data"]["renderFunction"], "renderPlayerCard");
    assert_eq!(received[8]["event"]["data"]["params"]["sectionName"], "zonetime");

    let headers = headers.lock().unwrap();
    assert_eq!(header(&headers, "origin").as_deref(), Some("https://edge.nhl.com"));
    assert_eq!(header(&headers, "cookie").as_deref(), Some("session=abc"));
    assert!(header(&headers, "user-agent").unwrap().contains("Chrome/125"));
    assert_eq!(header(&headers, "path").as_deref(), Some("/en/skater/8478402"));
}

#[tokio::test]
async fn goalie_session_replays_immediately_and_ends_on_timeout() {
    let headers = Arc::new(Mutex::new(Vec::new()));
    let (url, server) = serve_once(headers, |mut ws| async move {
        // handshake plus four sections before the server says anything
        let received = read_n(&mut ws, 5).await;
        send_json(&mut ws, json!({ "section": "goverview" })).await;
        // stay silent until the client gives up
        while let Some(Ok(_)) = ws.next().await {}
        received
    })
    .await;

    let session = AdvancedStatsSession::new(EdgeProfile::goalie("8479361"))
        .with_base_url(url)
        .with_receive_timeout(Duration::from_millis(500));
    let messages = tokio::time::timeout(Duration::from_secs(10), session.run())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(messages, vec![json!({ "section": "goverview" })]);

    let received = server.await.unwrap();
    assert_eq!(received.len(), 5);
    assert_eq!(received[0]["event"]["data"]["params"]["season"], "20242025");
    assert_eq!(received[4]["event"]["data"]["target"], "#avggames-section-content");
}

#[tokio::test]
async fn connection_refused_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = AdvancedStatsSession::new(EdgeProfile::team("10"))
        .with_base_url(format!("ws://{}", addr));
    let err = session.run().await.unwrap_err();
    assert_eq!(err.error_code(), nhl_api::NhlApiErrorCode::WebSocket);
}
