use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use scopecast_core::{
    engine_from_config, Catalog, ConfigLoader, DataVolume, EstimateState, ProjectContext,
    ScopeOrchestrator, TeamSize, Timeline,
};

#[derive(Parser, Debug)]
#[clap(
    name = "Scopecast",
    author,
    version = "0.1.0",
    about = "Project scope estimation engine"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        long,
        short,
        default_value = "scopecast.yaml",
        help = "Path to the YAML configuration file; built-in defaults apply if absent"
    )]
    config: String,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in service catalog
    Catalog {
        #[clap(long, help = "Print the catalog as JSON")]
        json: bool,
    },
    /// Produce a one-shot estimate for a selection of services
    Estimate {
        #[clap(
            long,
            value_delimiter = ',',
            required = true,
            help = "Comma-separated service ids (see the catalog command)"
        )]
        select: Vec<String>,

        #[clap(long, default_value_t = 5, help = "Complexity slider, 1-10")]
        complexity: u8,

        #[clap(long, default_value = "normal", help = "urgent | normal | flexible")]
        timeline: String,

        #[clap(long, default_value = "medium", help = "n/a | low | medium | high")]
        data_volume: String,

        #[clap(long, default_value = "small", help = "small | medium | large")]
        team_size: String,

        #[clap(long, default_value_t = 0)]
        api_integrations: u32,

        #[clap(long, help = "The project integrates with an existing system")]
        system_integration: bool,

        #[clap(long, default_value = "", help = "Free-text project description")]
        describe: String,

        #[clap(long, help = "Print the estimate as JSON")]
        json: bool,

        #[clap(long, help = "Also print the lead-capture payload as JSON")]
        lead: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.parse().unwrap_or(LevelFilter::Info))
        .init();

    match cli.command {
        Commands::Catalog { json } => print_catalog(json),
        Commands::Estimate {
            select,
            complexity,
            timeline,
            data_volume,
            team_size,
            api_integrations,
            system_integration,
            describe,
            json,
            lead,
        } => {
            let context = ProjectContext {
                complexity,
                timeline: parse_timeline(&timeline)?,
                data_volume: parse_data_volume(&data_volume)?,
                team_size: parse_team_size(&team_size)?,
                system_integration,
                api_integrations,
                description: describe,
            };
            run_estimate(&cli.config, select, context, json, lead).await
        }
    }
}

fn print_catalog(json: bool) -> Result<()> {
    let catalog = Catalog::standard();
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.categories())?);
        return Ok(());
    }
    for category in catalog.categories() {
        println!("{}", category.name);
        for service in &category.items {
            println!("  {:<16} {}", service.id, service.title);
        }
        println!();
    }
    Ok(())
}

async fn run_estimate(
    config_path: &str,
    select: Vec<String>,
    context: ProjectContext,
    json: bool,
    lead: bool,
) -> Result<()> {
    let catalog = Catalog::standard();
    for id in &select {
        if catalog.find(id).is_none() {
            bail!(
                "Unknown service id '{}'. Run the catalog command to list valid ids.",
                id
            );
        }
    }

    let config = ConfigLoader::from_file_or_default(config_path).await?;
    let engine = engine_from_config(&config.engine)?;
    let orchestrator = ScopeOrchestrator::new(engine, catalog);

    orchestrator.update_context(context).await;
    for id in &select {
        orchestrator.add_service(id).await;
    }

    let mut updates = orchestrator.subscribe();
    let state = loop {
        let state = updates.borrow_and_update().clone();
        match state {
            EstimateState::Pending => updates.changed().await?,
            other => break other,
        }
    };

    match state {
        EstimateState::Settled(estimate) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                println!("Timeline:   {}", estimate.timeline_range);
                println!("Investment: {}", estimate.investment_range);
                println!("Effort:     {}/10", estimate.effort_rating);
                println!("Insight:    {}", estimate.insight);
            }
            if lead {
                if let Some(payload) = orchestrator.lead_payload().await {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
            }
            Ok(())
        }
        EstimateState::Failed(message) => bail!("{}", message),
        EstimateState::Idle => bail!("No services selected"),
        EstimateState::Pending => unreachable!("loop only exits on a non-pending state"),
    }
}

fn parse_timeline(value: &str) -> Result<Timeline> {
    match value.to_lowercase().as_str() {
        "urgent" => Ok(Timeline::Urgent),
        "normal" => Ok(Timeline::Normal),
        "flexible" => Ok(Timeline::Flexible),
        other => bail!("Unknown timeline '{}': expected urgent, normal, or flexible", other),
    }
}

fn parse_data_volume(value: &str) -> Result<DataVolume> {
    match value.to_lowercase().as_str() {
        "n/a" | "na" => Ok(DataVolume::NotApplicable),
        "low" => Ok(DataVolume::Low),
        "medium" => Ok(DataVolume::Medium),
        "high" => Ok(DataVolume::High),
        other => bail!("Unknown data volume '{}': expected n/a, low, medium, or high", other),
    }
}

fn parse_team_size(value: &str) -> Result<TeamSize> {
    match value.to_lowercase().as_str() {
        "small" => Ok(TeamSize::Small),
        "medium" => Ok(TeamSize::Medium),
        "large" => Ok(TeamSize::Large),
        other => bail!("Unknown team size '{}': expected small, medium, or large", other),
    }
}
