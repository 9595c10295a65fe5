use std::process;

use clap::Parser;
use quizdesk::cli::Quizdesk;

#[tokio::main]
async fn main() {
    let app = Quizdesk::parse();
    quizdesk_log::init(app.log_level);
    tracing::trace!(command_structure = ?app);

    match app.run().await {
        Ok(output) => {
            // a closed pipe (`quizdesk recent | head`) is not worth reporting
            if let Err(error) = output.print() {
                tracing::debug!(?error, "could not write output");
            }
        }
        Err(error) => {
            tracing::debug!(?error);
            let _ = error.print();
            process::exit(1)
        }
    }
}
