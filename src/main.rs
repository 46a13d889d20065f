use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use tsch_scheduler::domain::settings::SimSettings;
use tsch_scheduler::domain::simulation::Simulation;
use tsch_scheduler::loader::parser::load_scenario;
use tsch_scheduler::logger;

/// Simulates a TSCH mesh whose schedule is computed by a centralized link scheduler.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scenario file (JSON) with settings and motes.
    #[arg(short, long)]
    scenario: String,

    /// Number of channel offsets, overrides the scenario.
    #[arg(long)]
    channels: Option<i64>,

    /// Timeslots per slotframe, overrides the scenario.
    #[arg(long)]
    slotframe_length: Option<i64>,

    /// Number of slotframe cycles to simulate, overrides the scenario.
    #[arg(long)]
    cycles: Option<i64>,

    /// Seed for the channel randomization.
    #[arg(long)]
    seed: Option<u64>,

    /// Per-cycle statistics output (CSV), stdout if omitted.
    #[arg(long)]
    stats_file: Option<String>,

    /// Final schedule dump (CSV).
    #[arg(long)]
    schedule_file: Option<String>,

    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        logger::init_with_level(LevelFilter::Debug);
    } else {
        logger::init();
    }

    let (mut settings, network) = load_scenario(&args.scenario).with_context(|| format!("Failed to load scenario '{}'", args.scenario))?;

    if args.channels.is_some() || args.slotframe_length.is_some() || args.cycles.is_some() {
        let overridden = SimSettings::new(
            args.channels.unwrap_or(settings.num_channels as i64),
            args.slotframe_length.unwrap_or(settings.slotframe_length as i64),
            settings.update_period as i64,
            args.cycles.unwrap_or(settings.num_cycles as i64),
        )
        .context("Invalid command line parameters")?;

        settings.num_channels = overridden.num_channels;
        settings.slotframe_length = overridden.slotframe_length;
        settings.num_cycles = overridden.num_cycles;
    }

    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    if args.stats_file.is_some() {
        settings.stats_file = args.stats_file;
    }
    if args.schedule_file.is_some() {
        settings.schedule_file = args.schedule_file;
    }

    let mut simulation = Simulation::new(settings, network).context("Failed to set up the simulation")?;
    let report = simulation.run()?;

    match &report.last_summary {
        Some(summary) => {
            log::info!(
                "Simulation finished after {} cycles and {} scheduler runs: {} links, {} cells, {} unmet, {} schedule collisions.",
                report.cycles,
                report.scheduler_runs,
                summary.links.len(),
                summary.cells_placed,
                summary.unmet_demand,
                report.schedule_collisions
            );

            if !summary.is_feasible() {
                log::warn!("The last schedule could not satisfy all demand, increase channels or slotframe length.");
            }
            if !summary.isolated_motes.is_empty() {
                log::warn!("Isolated motes without a route: {:?}", summary.isolated_motes);
            }
        }
        None => log::warn!("The simulation ended before the scheduler ran."),
    }

    if report.schedule_collisions > 0 {
        anyhow::bail!("{} schedule collisions in the final schedule", report.schedule_collisions);
    }

    Ok(())
}
