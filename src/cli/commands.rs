use crate::api::OpenAqClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::{AqiInsight, City, Source};
use crate::reference::ReferenceData;
use crate::server;
use crate::service::AqiService;
use clap::{Args, Parser, Subcommand};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Air quality insights for a city, served over HTTP or printed to the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory holding cities.json and fallback_data.json (default: bundled data)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// List the supported cities
    Cities,

    /// Look up the current air quality for one city
    Current(CurrentArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (default: AQI_BIND_ADDR or 0.0.0.0:8000)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args, Debug)]
pub struct CurrentArgs {
    /// City name, e.g. Delhi
    pub city: String,

    /// Print the insight as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// CLI application
pub struct App {
    config: Config,
    service: Arc<AqiService<OpenAqClient>>,
}

impl App {
    /// Builds the service from configuration, loading reference data once.
    pub fn new(config: Config) -> Result<Self> {
        let reference = match &config.data_dir {
            Some(dir) => ReferenceData::load_dir(dir)?,
            None => ReferenceData::bundled()?,
        };
        let client = OpenAqClient::from_config(&config.provider)?;
        info!(
            "OpenAQ client ready ({} mode, key {})",
            client.mode(),
            if config.provider.api_key.is_some() { "configured" } else { "missing" }
        );

        let service = AqiService::new(client, Arc::new(reference))
            .with_search_radius(config.provider.search_radius_m);

        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }

    /// Run the CLI application
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Serve(args) => {
                let addr = args.bind.unwrap_or(self.config.bind_addr);
                server::serve(Arc::clone(&self.service), addr).await?;
            },
            Commands::Cities => {
                println!("{}", cities_table(self.service.cities()));
            },
            Commands::Current(args) => {
                let insight = self.service.current(&args.city).await;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&insight)?);
                } else {
                    print_insight(&insight);
                }
            },
        }

        Ok(())
    }
}

fn cities_table(cities: &[City]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["City", "Country", "Latitude", "Longitude"]);
    for c in cities {
        table.add_row(vec![
            Cell::new(&c.city),
            Cell::new(&c.country),
            Cell::new(format!("{:.4}", c.latitude)),
            Cell::new(format!("{:.4}", c.longitude)),
        ]);
    }
    table
}

fn pollutant_table(insight: &AqiInsight) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Pollutant", "Value", "Unit", "AQI"]);
    for p in &insight.pollutants {
        table.add_row(vec![
            Cell::new(&p.name),
            Cell::new(p.value.map(|v| format!("{:.2}", v)).unwrap_or_default()),
            Cell::new(p.unit.as_deref().unwrap_or("")),
            Cell::new(p.aqi.map(|a| a.to_string()).unwrap_or_default()),
        ]);
    }
    table
}

fn colored_category(category: &str) -> ColoredString {
    match category {
        "Good" => category.green().bold(),
        "Moderate" => category.yellow().bold(),
        "Unhealthy" => category.red().bold(),
        "Very Unhealthy" => category.magenta().bold(),
        "Hazardous" => category.bright_red().bold().reversed(),
        _ => category.dimmed(),
    }
}

fn print_insight(insight: &AqiInsight) {
    println!(
        "{}, {}  ({})",
        insight.city.cyan().bold(),
        insight.country,
        insight.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    match insight.aqi {
        Some(aqi) => println!(
            "AQI {}  {}  dominant: {}",
            aqi.to_string().bold(),
            colored_category(&insight.category),
            insight.dominant_pollutant.as_deref().unwrap_or("-")
        ),
        None => println!("AQI {}  {}", "n/a".dimmed(), colored_category(&insight.category)),
    }
    println!("{}", insight.advice);

    if insight.source == Source::Fallback {
        println!("{}", "Showing fallback data; live readings were unavailable.".yellow());
    } else {
        println!("{}", pollutant_table(insight));
    }
}
