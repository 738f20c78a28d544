//! Integration tests for the retry client and the user fetch pipeline.
//!
//! Pagination and terminal-status behavior run against mockito; the
//! retry sequencing tests need one response per connection, so they use a
//! small scripted TCP server instead.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Instant;

use dupedesk_client::{fetch_all_users, ClientError, RestClient, RetryPolicy};
use mockito::Matcher;
use reqwest::StatusCode;

/// Serve one scripted HTTP response per incoming connection, then stop.
fn serve_script(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}", addr)
}

fn http_response(status_line: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!("HTTP/1.1 {}\r\n", status_line);
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    response
}

#[test]
fn test_pagination_follows_cursor_to_the_end() {
    let mut server = mockito::Server::new();

    let page2_url = format!("{}/api/v2/users.json?page=2", server.url());
    let page1 = server
        .mock("GET", "/api/v2/users.json")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(format!(
            r#"{{"users":[{{"id":1,"name":"Ann"}},{{"id":2,"name":"Ann"}}],"next_page":"{}","count":3}}"#,
            page2_url
        ))
        .create();
    let page2 = server
        .mock("GET", "/api/v2/users.json")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"users":[{"id":3,"name":"Bo"}],"next_page":null,"count":3}"#)
        .create();

    let client = RestClient::new(server.url(), "credentials").unwrap();
    let users = fetch_all_users(&client).unwrap();

    // Accumulated length equals the sum of page lengths, arrival order kept
    assert_eq!(users.len(), 3);
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    page1.assert();
    page2.assert();
}

#[test]
fn test_requests_carry_basic_auth_header() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("GET", "/api/v2/users.json")
        .match_header("authorization", "Basic c2VjcmV0")
        .with_status(200)
        .with_body(r#"{"users":[],"next_page":null}"#)
        .create();

    let client = RestClient::new(server.url(), "c2VjcmV0").unwrap();
    fetch_all_users(&client).unwrap();

    mock.assert();
}

#[test]
fn test_unauthorized_fails_immediately() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v2/users.json")
        .with_status(401)
        .create();

    let client = RestClient::new(server.url(), "bad").unwrap();
    let err = fetch_all_users(&client).unwrap_err();

    assert!(matches!(err, ClientError::Credentials { .. }));
    let message = err.to_string();
    assert!(message.contains(&server.url()));
    assert!(message.contains("email address and API token"));
}

#[test]
fn test_forbidden_fails_immediately() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v2/users.json")
        .with_status(403)
        .create();

    let client = RestClient::new(server.url(), "limited").unwrap();
    let err = fetch_all_users(&client).unwrap_err();

    assert!(matches!(err, ClientError::Permissions { .. }));
    assert!(err.to_string().contains("necessary permissions"));
}

#[test]
fn test_unexpected_status_is_terminal() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v2/users.json")
        .with_status(500)
        .create();

    let client = RestClient::new(server.url(), "credentials").unwrap();
    let err = client
        .get("api/v2/users.json", StatusCode::OK, "getting users")
        .unwrap_err();

    match err {
        ClientError::Request {
            status, resource, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(resource, "api/v2/users.json");
        }
        other => panic!("expected Request error, got {:?}", other),
    }
}

#[test]
fn test_unparseable_page_ends_pipeline_as_done() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v2/users.json")
        .with_status(200)
        .with_body("this is not json")
        .create();

    let client = RestClient::new(server.url(), "credentials").unwrap();
    let users = fetch_all_users(&client).unwrap();
    assert!(users.is_empty());
}

#[test]
fn test_rate_limit_waits_out_retry_after_then_retries() {
    let base_url = serve_script(vec![
        http_response("429 Too Many Requests", &[("Retry-After", "2")], ""),
        http_response(
            "200 OK",
            &[("Content-Type", "application/json")],
            r#"{"users":[{"id":1,"name":"Ann"}],"next_page":null}"#,
        ),
    ]);

    let client = RestClient::new(base_url, "credentials").unwrap();
    let start = Instant::now();
    let users = fetch_all_users(&client).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(users.len(), 1);
    // Retry-After: 2 means at least 2 s (plus the 250 ms pad) before retry
    assert!(elapsed.as_millis() >= 2000, "elapsed: {:?}", elapsed);
    assert!(elapsed.as_millis() < 30_000, "elapsed: {:?}", elapsed);
}

#[test]
fn test_bounded_policy_gives_up_on_persistent_rate_limiting() {
    let rate_limited = http_response("429 Too Many Requests", &[("Retry-After", "0")], "");
    let base_url = serve_script(vec![
        rate_limited.clone(),
        rate_limited.clone(),
        rate_limited,
    ]);

    let client =
        RestClient::with_policy(base_url, "credentials", RetryPolicy::with_max_attempts(3))
            .unwrap();
    let err = client
        .get("api/v2/users.json", StatusCode::OK, "getting users")
        .unwrap_err();

    match err {
        ClientError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
}

#[test]
fn test_connection_failure_is_retried_until_policy_gives_up() {
    // Grab a free port, then close the listener so connections are refused
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RestClient::with_policy(
        format!("http://{}", addr),
        "credentials",
        RetryPolicy::with_max_attempts(2),
    )
    .unwrap();
    let err = client
        .get("api/v2/users.json", StatusCode::OK, "getting users")
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::RetriesExhausted { attempts: 2, .. }
    ));
}
