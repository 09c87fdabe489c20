pub mod common;

use reqwest::{Method, StatusCode};

#[tokio::test]
async fn greets_in_plain_text() {
    let reply = common::Client::spawn()
        .await
        .request(Method::GET, "/")
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, users_service::http::GREETING);
    assert!(reply
        .content_type
        .is_some_and(|ct| ct.starts_with("text/plain")));
}
