#[tokio::main]
async fn main() -> anyhow::Result<()> {
    repo_overlay::app::run().await
}
