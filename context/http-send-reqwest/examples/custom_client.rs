use anyhow::Result;
use beebotte_core::{Context, OsEnv};
use beebotte_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Create a custom reqwest client with specific configuration
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .user_agent("beebotte-example/1.0")
        .build()?;

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv);

    // Public reads don't need a signature.
    let url = "http://api.beebotte.com:80/vi/public/data/read/beebotte/demo/temp?limit=3&source=raw";
    println!("GET {url}");

    let req = http::Request::builder()
        .method("GET")
        .uri(url)
        .header("content-type", "application/json")
        .body(Bytes::new())?;

    match ctx.http_send_as_string(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("{}", resp.body());
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
        }
    }

    Ok(())
}
