mod cli;
mod infra;
mod routes;
mod server;

use pot_insurance::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
