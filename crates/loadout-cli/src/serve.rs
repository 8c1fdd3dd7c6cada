use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use loadout_core::Dispatcher;

/// Read JSON-RPC requests from stdin until EOF, one per line
pub async fn run(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    info!("Serving JSON-RPC on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut stdout = tokio::io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some(reply) = dispatcher.handle_line(trimmed).await else {
            continue;
        };

        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
