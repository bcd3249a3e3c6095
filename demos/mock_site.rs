//! A tiny site to relay against by hand:
//!
//! ```text
//! cargo run --example mock_site
//! cargo run --bin relay-cli -- http://127.0.0.1:8081/hello
//! ```

use axum::{http::header, response::Redirect, routing::get, Router};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route(
            "/hello",
            get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "Hello, world!") }),
        )
        .route("/binary", get(|| async { vec![0xffu8, 0xfe, 0x00] }))
        .route("/moved", get(|| async { Redirect::temporary("/hello") }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock site is listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
