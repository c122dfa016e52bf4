mod components;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use hive_core::event::Alliance;
use hive_core::kernel::constants::{APP_NAME, APP_VERSION};
use hive_core::{Alert, ComponentRegistry, DispatchReport, Executor, GameEvent, RegistryBuilder, RegistryConfig, UnitRef};
use log::{error, info};
use tracing_subscriber::EnvFilter;

use crate::components::{Commander, Faulty, Scout, StepCounter};

/// Hive: concurrent component host for game bots
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Registry configuration file (JSON, TOML or YAML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of game steps to replay
    #[arg(long, default_value_t = 3)]
    steps: u32,

    /// Per-component dispatch deadline, overriding the configuration
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Also register a component that fails every step
    #[arg(long)]
    faulty: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let mut config = match &args.config {
        Some(path) => match RegistryConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => RegistryConfig::default(),
    };
    if let Some(ms) = args.timeout_ms {
        config = config.with_dispatch_timeout(Duration::from_millis(ms));
    }

    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Logging unavailable: {}", e);
    }

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.worker_threads {
        runtime.worker_threads(workers);
    }
    let runtime = match runtime.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} v{}: concurrent component host", APP_NAME, APP_VERSION);
    println!("Initializing registry...");
    let registry = match RegistryBuilder::new()
        .config(config)
        .executor(Executor::from_handle(runtime.handle().clone()))
        .build()
    {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to initialize registry: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(&registry, &args));

    println!("Shutting down registry...");
    ExitCode::SUCCESS
}

/// Install a stderr subscriber and route `log` records from hive-core into it
fn init_logging(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(registry: &ComponentRegistry, args: &CliArgs) {
    let counter = Arc::new(StepCounter::default());
    registry.add_component(counter.clone()).await;
    registry.add_component(Arc::new(Commander)).await;
    if args.faulty {
        registry.add_component(Arc::new(Faulty)).await;
    }
    info!("{} component(s) registered", registry.component_count().await);

    for event in timeline(args.steps) {
        let report = registry.dispatch_event(event).await;
        summarize(&report);
    }

    let scouts = registry.find_components::<Scout>().await;
    let tracked: usize = scouts.iter().map(|scout| scout.known_enemies()).sum();
    println!("Steps observed: {}", counter.steps());
    println!("Enemy units tracked: {}", tracked);

    registry.clear_component_set().await;
}

/// A short scripted match
fn timeline(steps: u32) -> Vec<GameEvent> {
    let zergling = |tag| UnitRef::new(tag, 105, Alliance::Enemy);
    let mut events = vec![GameEvent::GameFullStart, GameEvent::GameStart];
    for step in 0..steps {
        events.push(GameEvent::Step);
        if step == 0 {
            events.push(GameEvent::UnitEnterVision(zergling(101)));
            events.push(GameEvent::UnitEnterVision(zergling(102)));
            events.push(GameEvent::UnitCreated(UnitRef::new(7, 84, Alliance::Own)));
        }
    }
    events.push(GameEvent::UnitDestroyed(zergling(101)));
    events.push(GameEvent::Alert(Alert::UnitUnderAttack));
    events.push(GameEvent::GameEnd);
    events
}

fn summarize(report: &DispatchReport) {
    println!(
        "[{}] dispatched={} completed={} failed={} timed_out={}",
        report.event(),
        report.dispatched(),
        report.completed(),
        report.failed(),
        report.timed_out()
    );
    for record in report.records().iter().filter(|r| !r.outcome.is_completed()) {
        error!("{} {} on {}: {:?}", record.component, record.outcome.label(), report.event(), record.outcome);
    }
}
