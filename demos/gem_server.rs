//! Serves the native gem routing table with in-memory stand-in handlers.
//!
//! ```text
//! RUST_LOG=debug cargo run --example gem_server -- auth.json
//! ```
//!
//! Without an argument the repository is open to everyone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use microroute_rs::gem::{GemAuth, GemHandlers, native_router};
use microroute_rs::{
    AuthSettings, HttpRequest, HttpResponse, HttpServer, ServerConfig, ServerError, StatusCode, handler_fn,
};

type Store = Arc<Mutex<HashMap<String, Vec<u8>>>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let auth = match std::env::args().nth(1) {
        Some(path) => GemAuth::from_settings(&AuthSettings::from_json_file(path)?),
        None => GemAuth::anonymous(),
    };

    let store: Store = Arc::default();

    let submit_store = store.clone();
    let submit = handler_fn(move |req: HttpRequest| {
        let store = submit_store.clone();
        async move {
            let key = format!("/gems/upload-{}.gem", req.body.len());
            store
                .lock()
                .map_err(|e| ServerError::InternalError(e.to_string()))?
                .insert(key.clone(), req.body);
            Ok::<_, ServerError>(HttpResponse::new(StatusCode::Created)
                .with_content_type("text/plain")
                .with_body_string(format!("Stored {key}")))
        }
    });

    let download_store = store.clone();
    let download = handler_fn(move |req: HttpRequest| {
        let store = download_store.clone();
        async move {
            let stored = store
                .lock()
                .map_err(|e| ServerError::InternalError(e.to_string()))?
                .get(req.path_only())
                .cloned();
            Ok::<_, ServerError>(match stored {
                Some(bytes) => HttpResponse::new(StatusCode::Ok)
                    .with_content_type("application/octet-stream")
                    .with_body_bytes(bytes),
                None => HttpResponse::new(StatusCode::NotFound),
            })
        }
    });

    let handlers = GemHandlers {
        submit,
        dependencies: handler_fn(|_req| async {
            HttpResponse::new(StatusCode::Ok).with_json(&Vec::<String>::new())
        }),
        api_key: handler_fn(|_req| async { Ok(HttpResponse::new(StatusCode::NotImplemented)) }),
        info: handler_fn(|req: HttpRequest| async move {
            HttpResponse::new(StatusCode::Ok).with_json(&serde_json::json!({ "path": req.path_only() }))
        }),
        download,
    };

    let router = native_router(handlers, &auth)?;
    let server = HttpServer::new(ServerConfig::default(), router);
    server.start().await?;

    Ok(())
}
