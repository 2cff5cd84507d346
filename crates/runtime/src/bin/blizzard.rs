//! Headless blizzard exposure run, printing a JSON report to stdout.

use anyhow::Result;

use sim_runtime::{Runtime, RuntimeConfig, Scenario};

#[tokio::main]
async fn main() -> Result<()> {
    sim_runtime::telemetry::init();

    let runtime = Runtime::spawn(RuntimeConfig::default(), sim_content::catalogs());
    let handle = runtime.handle();

    let report = Scenario::blizzard().run(&handle).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    drop(handle);
    runtime.shutdown().await;
    Ok(())
}
