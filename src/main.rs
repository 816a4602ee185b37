#[tokio::main]
async fn main() {
    decora_backend::run().await;
}
