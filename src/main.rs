#[tokio::main]
async fn main() -> anyhow::Result<()> {
    devplan_lib::run().await
}
