use timecard::commands::Cli;
use timecard::libs::error::TrackerError;
use timecard::libs::messages::{macros::is_debug_mode, Message};
use timecard::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timecard=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(error) = Cli::menu().await {
        match error.downcast_ref::<TrackerError>() {
            Some(TrackerError::Store(store)) => msg_error!(Message::StoreFailed(store.to_string())),
            _ => msg_error!(error),
        }
        std::process::exit(1);
    }
}
