mod cli;
mod demo;
mod infra;
mod quote;

use cleaning_quote::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
