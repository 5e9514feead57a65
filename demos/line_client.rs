//! Line client example
//!
//! Sends each line of stdin to a server and prints the newline-terminated
//! reply, riding out server restarts.
//!
//! Run with: cargo run --example line_client -- tcp 127.0.0.1:7000
//!
//! Set `RUST_LOG=resilient_stream=debug` to watch reconnects.

use anyhow::Context;
use resilient_stream::{Client, ClientConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let network = args.next().unwrap_or_else(|| "tcp".to_string());
    let address = args.next().unwrap_or_else(|| "127.0.0.1:7000".to_string());

    let config = ClientConfig::default()
        .with_max_retries(5)
        .with_retry_interval_ms(250)
        .with_read_timeout_ms(10_000)
        .with_logging(true);
    let mut client = Client::connect_with_config(&network, &address, config)
        .await
        .with_context(|| format!("connecting to {} {}", network, address))?;

    println!("Connected to {}", client.endpoint());

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        client
            .write(format!("{}\n", line).as_bytes())
            .await
            .context("sending line")?;
        let reply = client.read_string(b'\n').await.context("reading reply")?;
        println!("< {}", reply.trim_end());
    }

    client.close().await?;
    Ok(())
}
