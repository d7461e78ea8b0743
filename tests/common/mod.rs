#![allow(dead_code)]

use actix_web::{web, App, HttpResponse, HttpServer};
use inertia_actix::{file_template_resolver, Inertia, InertiaConfig, InertiaVersion, SsrClient};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

pub const VERSION: &str = "v1.0.0";

pub fn super_trim(text: String) -> String {
    text.trim()
        .replace("\r\n", "")
        .replace('\n', "")
        .replace("    ", "")
}

pub fn inertia(ssr_client: Option<SsrClient>) -> Inertia {
    let mut builder = InertiaConfig::builder()
        .set_version(InertiaVersion::Literal(VERSION))
        .set_templates_dir("tests/common")
        .set_layout("root_layout.html")
        .set_template_resolver(&file_template_resolver)
        .set_template_resolver_data(&());

    if let Some(client) = ssr_client {
        builder = builder.set_ssr_client(client).enable_ssr();
    }

    Inertia::new(builder.build().unwrap())
}

/// Mocks the node SSR server: it echoes the posted page component and url.
async fn ssr_render(page: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "head": ["<title inertia>SSR</title>", "<meta name=\"ssr\" content=\"true\">"],
        "body": format!(
            "<div id=\"app\">{} at {}</div>",
            page["component"].as_str().unwrap_or_default(),
            page["url"].as_str().unwrap_or_default()
        ),
    }))
}

async fn ssr_crash() -> HttpResponse {
    HttpResponse::InternalServerError().body("render crashed")
}

async fn ssr_malformed() -> HttpResponse {
    HttpResponse::Ok().json(json!({"nope": 1}))
}

/// `/render` answers properly, `/failing/render` with a 500 and `/malformed/render`
/// with a json body that isn't an SSR page.
pub fn spawn_ssr_server() -> SocketAddr {
    let server = HttpServer::new(|| {
        App::new()
            .route("/render", web::post().to(ssr_render))
            .route("/failing/render", web::post().to(ssr_crash))
            .route("/malformed/render", web::post().to(ssr_malformed))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    addr
}

pub fn ssr_client(addr: SocketAddr) -> SsrClient {
    SsrClient::new(format!("http://{}", addr), Duration::from_secs(2))
}

pub fn failing_ssr_client(addr: SocketAddr) -> SsrClient {
    SsrClient::new(format!("http://{}/failing", addr), Duration::from_secs(2))
}

pub fn malformed_ssr_client(addr: SocketAddr) -> SsrClient {
    SsrClient::new(format!("http://{}/malformed", addr), Duration::from_secs(2))
}

pub fn unreachable_ssr_client() -> SsrClient {
    SsrClient::new("http://127.0.0.1:1", Duration::from_millis(500))
}
