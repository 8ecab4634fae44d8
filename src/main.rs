use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dcms_chart_client::models::RecordType;
use dcms_chart_client::{Config, OdontogramEngine, RestChartApi};

/// Diagnostic probe: fetch one patient's chart and print it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut args = std::env::args().skip(1);
    let patient_id = args
        .next()
        .context("usage: chart-probe <patient_id> [INITIAL|EVOLUTION]")?;
    let record_type = match args.next().as_deref() {
        None | Some("EVOLUTION") => RecordType::Evolution,
        Some("INITIAL") => RecordType::Initial,
        Some(other) => anyhow::bail!("unknown record type: {other}"),
    };

    let cfg = Config::from_env()?;
    let api = Arc::new(RestChartApi::new(&cfg)?);
    let mut engine = OdontogramEngine::new(api);

    engine.set_record_type(&patient_id, record_type).await?;
    engine.load_periodontogram(&patient_id).await?;

    let mut tooth_numbers: Vec<u8> = engine.whole_teeth().keys().copied().collect();
    tooth_numbers.sort_unstable();

    println!("chart for patient {patient_id} ({record_type:?} scope)");
    for n in tooth_numbers {
        let tooth = &engine.whole_teeth()[&n];
        println!("  tooth {n:2}: {:?}", tooth.status);
        if let Some(surfaces) = engine.surfaces().get(&n) {
            for (surface, state) in surfaces {
                println!("    {surface:?}: {:?}", state.status);
            }
        }
        for state in engine.tooth_states(n) {
            println!(
                "    [{}] {} {:?}",
                state.abbreviation, state.condition, state.status
            );
        }
    }
    for bridge in engine.bridges() {
        println!(
            "  bridge {}-{} ({})",
            bridge.start_tooth, bridge.end_tooth, bridge.color
        );
    }
    println!("{} periodontal measurements", engine.measurements().len());

    Ok(())
}
