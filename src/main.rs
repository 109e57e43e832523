use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match hospital_registry::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("hospital-registry: {e}");
            ExitCode::FAILURE
        }
    }
}
