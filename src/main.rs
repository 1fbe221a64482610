#[tokio::main]
async fn main() {
    if let Err(e) = emailguard_lib::run().await {
        tracing::error!("EmailGuard failed: {}", e);
        eprintln!("EmailGuard failed: {}", e);
        std::process::exit(1);
    }
}
