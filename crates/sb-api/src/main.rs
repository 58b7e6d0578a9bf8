#[tokio::main]
async fn main() {
    if let Err(err) = sb_api::run().await {
        eprintln!("sb-api failed to start: {err}");
        std::process::exit(1);
    }
}
