use migration::Migrator;
use sea_orm_migration::cli;

/// SeaORM migration CLI for the coffee schema (`up`, `down`, `status`, `fresh`, ...).
///
/// Reads `DATABASE_URL`, also from a `.env` file in the working directory.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
