use antigrav::{ScenarioConfig, Scenario};
use antigrav::run;
use antigrav::{bench_build, bench_tick, bench_tick_curve};

use clap::Parser;
use anyhow::Result;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Print tick/build timings instead of opening the viewer
    #[arg(long)]
    bench: bool,

    /// With --bench: print the per-N CSV curve
    #[arg(long)]
    curve: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::load(&config_path)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        if args.curve {
            bench_tick_curve();
        } else {
            bench_build();
            bench_tick();
        }
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    run(scenario);

    Ok(())
}
