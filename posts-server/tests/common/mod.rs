//! In-process stand-in for a PostgREST `posts` table.

use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

pub const API_KEY: &str = "test-key";

type Table = web::Data<Mutex<Vec<Value>>>;
type Filter = web::Query<HashMap<String, String>>;

pub struct MockPostgrest {
    pub base_url: String,
    handle: ServerHandle,
}

impl MockPostgrest {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let table: Table = web::Data::new(Mutex::new(Vec::new()));

        let server = HttpServer::new(move || {
            App::new().app_data(table.clone()).service(
                web::resource("/rest/v1/posts")
                    .route(web::get().to(select))
                    .route(web::post().to(insert))
                    .route(web::patch().to(update))
                    .route(web::delete().to(delete)),
            )
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();

        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/rest/v1"),
            handle,
        }
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Base URL nobody listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/rest/v1")
}

fn check_key(req: &HttpRequest) -> Result<(), HttpResponse> {
    let apikey = req.headers().get("apikey").and_then(|v| v.to_str().ok());
    let bearer = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    let expected_bearer = format!("Bearer {API_KEY}");

    if apikey == Some(API_KEY) && bearer == Some(expected_bearer.as_str()) {
        Ok(())
    } else {
        Err(HttpResponse::Unauthorized().json(json!({ "message": "Invalid API key" })))
    }
}

fn id_filter(query: &Filter) -> Option<String> {
    query
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .map(str::to_string)
}

fn row_matches(row: &Value, id: &Option<String>) -> bool {
    match id {
        Some(id) => row["id"] == id.as_str(),
        None => true,
    }
}

async fn select(req: HttpRequest, table: Table, query: Filter) -> HttpResponse {
    if let Err(resp) = check_key(&req) {
        return resp;
    }
    let id = id_filter(&query);
    let rows = table.lock().unwrap();
    let selected: Vec<&Value> = rows.iter().filter(|row| row_matches(row, &id)).collect();
    HttpResponse::Ok().json(selected)
}

async fn insert(req: HttpRequest, table: Table, row: web::Json<Value>) -> HttpResponse {
    if let Err(resp) = check_key(&req) {
        return resp;
    }
    let row = row.into_inner();
    table.lock().unwrap().push(row.clone());
    HttpResponse::Created().json(vec![row])
}

async fn update(
    req: HttpRequest,
    table: Table,
    query: Filter,
    patch: web::Json<Value>,
) -> HttpResponse {
    if let Err(resp) = check_key(&req) {
        return resp;
    }
    let id = id_filter(&query);
    let mut rows = table.lock().unwrap();
    let mut updated = Vec::new();

    for row in rows.iter_mut().filter(|row| row_matches(row, &id)) {
        if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        updated.push(row.clone());
    }

    HttpResponse::Ok().json(updated)
}

// Unlike a real PostgREST, which answers 204 either way, a delete matching
// nothing is reported as 404 here.
async fn delete(req: HttpRequest, table: Table, query: Filter) -> HttpResponse {
    if let Err(resp) = check_key(&req) {
        return resp;
    }
    let id = id_filter(&query);
    let mut rows = table.lock().unwrap();
    let before = rows.len();
    rows.retain(|row| !row_matches(row, &id));

    if rows.len() == before {
        HttpResponse::NotFound().json(json!({ "message": "no rows deleted" }))
    } else {
        HttpResponse::NoContent().finish()
    }
}
