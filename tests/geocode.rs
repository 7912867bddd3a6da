// GeocodeClient against a local one-shot HTTP server.
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use postal_lookup::geocode::{lookup_postal_code, GeocodeError, Geocoder};
use postal_lookup::{GeocodeClient, GeocoderConfig, PostalCodeOutcome};

const API_KEY: &str = "SECRETKEY123";

const MONTREAL_BODY: &str = r#"{
    "results": [{
        "address_components": [
            {"long_name": "500", "short_name": "500", "types": ["street_number"]},
            {"long_name": "H2W 1X9", "short_name": "H2W 1X9", "types": ["postal_code"]}
        ]
    }],
    "status": "OK"
}"#;

/// Answers a single request with `status_line` and `body`, returning the request head.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&head).into_owned()
    });

    (format!("http://{}/geocode", addr), handle)
}

fn client_for(endpoint: &str) -> GeocodeClient {
    GeocodeClient::new(&GeocoderConfig {
        api_key: API_KEY.to_string(),
        endpoint: endpoint.to_string(),
        timeout_secs: Some(10),
    })
    .unwrap()
}

#[tokio::test]
async fn ok_body_yields_postal_code() {
    let (endpoint, server) = serve_once("200 OK", MONTREAL_BODY).await;
    let client = client_for(&endpoint);

    let outcome = lookup_postal_code(&client, "schwartz+montreal").await;
    assert_eq!(outcome, PostalCodeOutcome::Found("H2W 1X9".into()));

    let head = server.await.unwrap();
    assert!(
        head.starts_with("GET /geocode?address=+schwartz+montreal&key=SECRETKEY123 HTTP/1.1"),
        "request head: {}",
        head
    );
}

#[tokio::test]
async fn service_status_is_reported() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
    )
    .await;
    let client = client_for(&endpoint);

    let outcome = lookup_postal_code(&client, "h2w").await;
    assert_eq!(outcome, PostalCodeOutcome::ServiceError("REQUEST_DENIED".into()));
    assert_eq!(outcome.sentinel(), "-2");
    server.await.unwrap();
}

#[tokio::test]
async fn http_error_status_is_a_transport_failure() {
    let (endpoint, server) = serve_once("503 Service Unavailable", "").await;
    let client = client_for(&endpoint);

    let err = client.geocode("h2w").await.unwrap_err();
    assert!(matches!(
        err,
        GeocodeError::HttpStatus(status) if status.as_u16() == 503
    ));
    assert_eq!(
        PostalCodeOutcome::from_fetch(Err(err)),
        PostalCodeOutcome::TransportError
    );
    server.await.unwrap();
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (endpoint, server) = serve_once("200 OK", "<html>quota page</html>").await;
    let client = client_for(&endpoint);

    let outcome = lookup_postal_code(&client, "h2w").await;
    assert_eq!(outcome, PostalCodeOutcome::MalformedResponse);
    server.await.unwrap();
}

#[tokio::test]
async fn connection_error_does_not_expose_api_key() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/geocode", addr));
    let err = client.geocode("schwartz+montreal").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Transport(_)));
    let shown = format!("Lookup failed for '{}': {}", "schwartz+montreal", err);
    assert!(!shown.contains(API_KEY), "key leaked: {}", shown);
    assert!(!format!("{:?}", err).contains(API_KEY));
    assert_eq!(
        PostalCodeOutcome::from_fetch(Err(err)),
        PostalCodeOutcome::TransportError
    );
}
