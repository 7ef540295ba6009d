use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = vocab_client::run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
