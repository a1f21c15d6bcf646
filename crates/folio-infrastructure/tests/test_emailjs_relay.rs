use folio_core::contact::{ContactSubmission, EmailParams, MailRelay};
use folio_infrastructure::EmailJsRelay;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves one HTTP request with `status_line` and returns the raw request.
async fn one_shot_server(status_line: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(body_len) = complete_length(&request) {
                if request.len() >= body_len {
                    break;
                }
            }
        }
        let body = "OK";
        let response = format!(
            "{}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });
    (format!("http://{}/api/v1.0/email/send", addr), handle)
}

/// Total request length once headers are in, if known.
fn complete_length(request: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(request);
    let header_end = text.find("\r\n\r\n")? + 4;
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    Some(header_end + content_length)
}

fn params() -> EmailParams {
    let submission = ContactSubmission::new("Ana", "ana@example.com", "Hello", "Nice portfolio");
    EmailParams::new(&submission, "Sidharth", "owner@example.com")
}

#[tokio::test]
async fn relay_posts_emailjs_payload() {
    let (endpoint, server) = one_shot_server("HTTP/1.1 200 OK").await;
    let relay = EmailJsRelay::new(endpoint, "service_x", "template_y", "public_z");

    relay.send(&params()).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/v1.0/email/send"));
    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["service_id"], "service_x");
    assert_eq!(json["template_id"], "template_y");
    assert_eq!(json["user_id"], "public_z");
    assert_eq!(json["template_params"]["from_email"], "ana@example.com");
    assert_eq!(json["template_params"]["reply_to"], "ana@example.com");
    assert_eq!(json["template_params"]["to_name"], "Sidharth");
}

#[tokio::test]
async fn non_200_is_a_relay_error() {
    let (endpoint, server) = one_shot_server("HTTP/1.1 400 Bad Request").await;
    let relay = EmailJsRelay::new(endpoint, "s", "t", "p");

    let err = relay.send(&params()).await.unwrap_err();
    assert!(err.to_string().contains("400"));
    server.await.unwrap();
}

#[tokio::test]
async fn unconfigured_relay_is_rejected() {
    let config = folio_core::config::ContactConfig::default();
    assert!(EmailJsRelay::from_config(&config).is_err());
}
