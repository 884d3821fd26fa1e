use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    modloader_installer::run().await
}
