use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    atequip::run().await
}
