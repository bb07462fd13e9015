use anyhow::Result;
use item_seed::{cli::Cli, logging::init_logging, writer::generate_seed_sql};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose)?;

    let start = Instant::now();
    let summary = generate_seed_sql(&cli.input, &cli.output, &cli.seed_options())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let elapsed = start.elapsed();
    println!(
        "Generated seed file: {:?} in {:.1}s",
        summary.output,
        elapsed.as_secs_f64()
    );
    println!("   - {} item types", summary.counts.item_types);
    println!("   - {} attributes", summary.counts.attributes);
    println!("   - {} items", summary.counts.items);
    if summary.counts.skipped_rows > 0 {
        println!(
            "   - {} rows skipped (missing item type or name)",
            summary.counts.skipped_rows
        );
    }

    Ok(())
}
