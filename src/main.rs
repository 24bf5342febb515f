use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    posinfo_cli::cli::run().await
}
