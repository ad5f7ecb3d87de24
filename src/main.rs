use std::error::Error;

use fidelity::{ContentSet, FidelityConfig, PairwiseReportBuilder};
use tracing_subscriber::EnvFilter;

const SAMPLE_CONTENTS: &str = include_str!("sample_contents.json");

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if std::env::var_os("FIDELITY_LOG_JSON").is_some() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let contents: ContentSet = serde_json::from_str(SAMPLE_CONTENTS)?;
    let builder = PairwiseReportBuilder::new(FidelityConfig::default().with_parallel(true))?;
    let run = builder.build(&contents)?;

    println!("{}", run.report.to_json_pretty()?);
    Ok(())
}
