#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod effects;
#[cfg(any(target_arch = "wasm32", test))]
mod feedback;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(any(target_arch = "wasm32", test))]
mod globe;
#[cfg(not(target_arch = "wasm32"))]
mod server;
#[cfg(any(target_arch = "wasm32", test))]
mod site;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    if let Err(error) = server::run().await {
        eprintln!("{}", serde_json::json!({ "level": "error", "event": "server_failed", "message": error.to_string() }));
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
