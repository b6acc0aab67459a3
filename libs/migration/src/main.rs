//! Schema CLI for the users table.
//!
//! Reads `DATABASE_URL`; e.g. `cargo run -p migration -- status` or `-- down`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
