#[tokio::main]
async fn main() -> std::io::Result<()> {
    play_plane::run_with_config().await
}
