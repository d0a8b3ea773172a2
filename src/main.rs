// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use companies_house_viewer::form::is_valid_company_number;
use companies_house_viewer::{company_overview, format_date_str, officer_search, Config, RegistryClient};

#[derive(Parser)]
#[command(name = "ch-viewer", version, about = "Browse Companies House records from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a company's merged timeline
    Timeline {
        /// 8-character company number, e.g. 00000006
        company_number: String,
    },
    /// Search officers by name, ordered by birth date
    Officers {
        name: String,

        /// Results to request (defaults to ITEMS_PER_PAGE)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Browse a company in the terminal UI (default: COMPANY_ID)
    Browse { company_number: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env_allow_dev_secret().context("failed to load configuration")?;
    let client = RegistryClient::from_config(&config);

    match cli.command {
        Some(Command::Timeline { company_number }) => run_timeline(&client, &company_number).await,
        Some(Command::Officers { name, limit }) => {
            run_officers(&client, &name, limit.unwrap_or(config.items_per_page)).await
        }
        Some(Command::Browse { company_number }) => {
            let company_number = company_number.or_else(|| config.default_company.clone());
            run_browse(&client, company_number).await
        }
        None => run_browse(&client, config.default_company.clone()).await,
    }
}

fn check_company_number(company_number: &str) -> Result<()> {
    if !is_valid_company_number(company_number) {
        bail!("company number must be exactly 8 characters, got {:?}", company_number);
    }
    Ok(())
}

async fn run_timeline(client: &RegistryClient, company_number: &str) -> Result<()> {
    check_company_number(company_number)?;

    let overview = company_overview(client, company_number)
        .await
        .with_context(|| format!("failed to look up company {}", company_number))?;

    println!("{} ({})", overview.company.display_name(), company_number);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for event in &overview.timeline {
        let when = match &event.date {
            Some(date) => format_date_str(date),
            None => "Date unknown".to_string(),
        };
        println!("{:>12}  {}", when, event.description);
    }
    println!("\n{} events, {} officers", overview.timeline.len(), overview.officers.len());

    Ok(())
}

async fn run_officers(client: &RegistryClient, name: &str, limit: u32) -> Result<()> {
    let officers = officer_search(client, name, limit)
        .await
        .with_context(|| format!("officer search for {:?} failed", name))?;

    if officers.is_empty() {
        println!("No officers found for {:?}", name);
        return Ok(());
    }

    for officer in &officers {
        let born = officer
            .dob_sort_key
            .and_then(|key| key.display())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "{:<40} born {:<10} {}",
            officer.display_name(),
            born,
            officer.address_snippet.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

#[cfg(feature = "tui")]
async fn run_browse(client: &RegistryClient, company_number: Option<String>) -> Result<()> {
    let Some(company_number) = company_number else {
        bail!("no company given; pass a company number or set COMPANY_ID");
    };
    check_company_number(&company_number)?;

    eprintln!("Loading {}...", company_number);
    let overview = company_overview(client, &company_number)
        .await
        .with_context(|| format!("failed to look up company {}", company_number))?;

    let mut app = ui::App::new(overview);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_browse(_client: &RegistryClient, _company_number: Option<String>) -> Result<()> {
    bail!("TUI mode not available; rebuild with `--features tui` or use `ch-viewer timeline`")
}
