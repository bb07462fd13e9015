pub mod cli;
pub mod logging;
pub mod parser;
pub mod schema;
pub mod writer;

pub use cli::Cli;
pub use writer::{generate_seed_sql, render_seed_sql, SeedOptions, SeedSummary};
