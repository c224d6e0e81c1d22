#[tokio::main]
async fn main() -> anyhow::Result<()> {
    toolrec_server::start().await
}
