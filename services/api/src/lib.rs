mod cli;
mod infra;
mod report;
mod routes;
mod server;
mod service;

use birthday_compat::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
