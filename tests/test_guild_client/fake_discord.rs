use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, Method, StatusCode},
    routing::any,
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

pub const TOKEN: &str = "test-token";
pub const GUILD_ID: u64 = 197038439483310086;
pub const GUILD_JSON: &str = include_str!("../../src/model/testdata/guild.json");

/// What the fake saw of one request.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Seen {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be json")
    }
}

/// Stands in for `discord.com/api/v10` on a local port.
#[derive(Debug, Clone)]
pub struct FakeDiscord {
    pub seen: Arc<Mutex<Vec<Seen>>>,
    pub guild: Arc<Mutex<Value>>,
    /// answer every PATCH with 403
    pub read_only: Arc<Mutex<bool>>,
    /// answer everything with this status
    pub outage: Arc<Mutex<Option<StatusCode>>>,
}

impl Default for FakeDiscord {
    fn default() -> Self {
        Self {
            seen: Default::default(),
            guild: Arc::new(Mutex::new(
                serde_json::from_str(GUILD_JSON).expect("fixture should be json"),
            )),
            read_only: Default::default(),
            outage: Default::default(),
        }
    }
}

impl FakeDiscord {
    pub async fn spawn(&self) -> SocketAddr {
        let app = Router::new()
            .route("/api/v10/guilds/{guild_id}", any(handle))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!("fake discord error: {:?}", err);
            }
        });
        addr
    }

    pub async fn requests(&self) -> Vec<Seen> {
        self.seen.lock().await.clone()
    }

    pub async fn last_request(&self) -> Seen {
        self.seen
            .lock()
            .await
            .last()
            .cloned()
            .expect("no request reached the fake")
    }

    pub async fn set_guild_field(&self, key: &str, value: Value) {
        let mut guild = self.guild.lock().await;
        guild[key] = value;
    }
}

fn fail(status: StatusCode, code: u32, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "code": code, "message": message })))
}

async fn handle(
    State(fake): State<FakeDiscord>,
    Path(guild_id): Path<String>,
    request: Request,
) -> (StatusCode, Json<Value>) {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default()
        .to_vec();
    fake.seen.lock().await.push(Seen {
        method: parts.method.clone(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        headers: parts.headers.clone(),
        body: body.clone(),
    });

    if let Some(status) = *fake.outage.lock().await {
        return fail(status, 0, "outage");
    }
    let authorized = parts
        .headers
        .get("authorization")
        .is_some_and(|v| v == format!("Bot {TOKEN}").as_str());
    if !authorized {
        return fail(StatusCode::UNAUTHORIZED, 0, "401: Unauthorized");
    }
    if guild_id != GUILD_ID.to_string() {
        return fail(StatusCode::NOT_FOUND, 10004, "Unknown Guild");
    }

    let mut guild = fake.guild.lock().await;
    match parts.method {
        Method::GET => {
            let mut snapshot = guild.clone();
            if parts.uri.query() == Some("with_counts=true") {
                snapshot["approximate_member_count"] = json!(1200);
                snapshot["approximate_presence_count"] = json!(340);
            }
            (StatusCode::OK, Json(snapshot))
        }
        Method::PATCH => {
            if *fake.read_only.lock().await {
                return fail(StatusCode::FORBIDDEN, 50013, "Missing Permissions");
            }
            let Ok(Value::Object(changes)) = serde_json::from_slice::<Value>(&body) else {
                return fail(StatusCode::BAD_REQUEST, 50109, "The request body contains invalid JSON.");
            };
            if let Value::Object(fields) = &mut *guild {
                fields.extend(changes);
            }
            (StatusCode::OK, Json(guild.clone()))
        }
        _ => fail(StatusCode::METHOD_NOT_ALLOWED, 0, "405: Method Not Allowed"),
    }
}
