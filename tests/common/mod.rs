use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use users_service::{api, db, http};

/// Client bound to a fresh server holding the bundled seed.
pub struct Client {
    inner: reqwest::Client,
    base_url: String,
}

pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl Reply {
    pub fn success<T: DeserializeOwned>(&self) -> api::Success<T> {
        serde_json::from_str(&self.body).expect("not a success envelope")
    }

    pub fn failure(&self) -> api::Failure {
        serde_json::from_str(&self.body).expect("not a failure envelope")
    }

    pub fn violations(&self) -> Vec<api::Violation> {
        match self.failure().message {
            api::Message::Violations(v) => v,
            api::Message::Text(t) => panic!("expected violations, got {t:?}"),
        }
    }
}

impl Client {
    pub async fn spawn() -> Self {
        let db_client = db::Client::from_seed(db::BUNDLED_SEED)
            .expect("bundled seed is malformed");
        let app = http::router(Arc::new(http::AppState { db_client }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("no local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server failed");
        });

        Self {
            inner: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    pub async fn request(&self, method: Method, path: &str) -> Reply {
        self.send(self.inner.request(method, self.url(path))).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Reply {
        self.send(self.inner.post(self.url(path)).json(body)).await
    }

    pub async fn post_raw(
        &self,
        path: &str,
        content_type: &str,
        body: &'static str,
    ) -> Reply {
        self.send(
            self.inner
                .post(self.url(path))
                .header("Content-Type", content_type)
                .body(body),
        )
        .await
    }

    pub async fn users(&self) -> Vec<api::User> {
        let reply = self.request(Method::GET, "/users").await;
        assert_eq!(reply.status, StatusCode::OK);
        let envelope = reply.success::<Vec<api::User>>();
        assert!(envelope.success);
        envelope.data
    }

    pub async fn user(&self, id: impl std::fmt::Display) -> Reply {
        self.request(Method::GET, &format!("/users/{id}")).await
    }

    pub async fn add_user(&self, body: &Value) -> Reply {
        self.post_json("/users", body).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Reply {
        let resp = req.send().await.expect("failed to send a request");
        let status = resp.status();
        let content_type = resp
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.text().await.expect("failed to get a response");
        Reply {
            status,
            content_type,
            body,
        }
    }
}

pub fn valid_user(username: &str) -> Value {
    serde_json::json!({
        "name": "Daniela Reyes",
        "username": username,
        "email": "daniela.reyes@unah.hn",
        "phone": 95554321,
        "role": "Estudiante",
    })
}
