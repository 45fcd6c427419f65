use anyhow::Context;
use simulation::config::SimulationConfig;
use simulation::export::export_json;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            SimulationConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => SimulationConfig::default(),
    };

    tracing::info!(seed = config.seed, pool = %config.pool, "Starting quadratic funding simulation");
    let export = simulation::run(&config)?;
    println!("{}", export_json(&export));

    if !export.all_scenarios_passed() {
        anyhow::bail!("one or more scenarios failed");
    }
    Ok(())
}
