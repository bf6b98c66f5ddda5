use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

use rastro::history::{HistoryEntry, HistoryStorage};
use rastro::server::{start_server, ServerState};
use rastro::tracking::{self, format_phone_number, TrackingData, DEFAULT_COUNTRY_CODE};

#[derive(Parser)]
#[command(name = "rastro", about = "Educational phone-number tracking simulator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on (0 picks a free port)
        #[arg(long, default_value_t = 3210)]
        port: u16,
    },

    /// Run one simulated lookup in the terminal
    Track {
        /// Phone number to look up
        phone: String,
        /// Country code used for validation and formatting
        #[arg(long, default_value = DEFAULT_COUNTRY_CODE)]
        country_code: String,
        /// Print the raw result envelope as JSON
        #[arg(long)]
        json: bool,
        /// Record the lookup in a history directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show or clear recorded lookups
    History {
        /// History directory used by `track --data-dir`
        #[arg(long)]
        data_dir: PathBuf,
        /// Remove all recorded lookups
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => serve(&host, port).await,
        Command::Track { phone, country_code, json, data_dir } => {
            track(&phone, &country_code, json, data_dir).await
        }
        Command::History { data_dir, clear } => history(data_dir, clear),
    }
}

async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let mut server = start_server(&format!("{host}:{port}"), ServerState::default()).await?;
    println!("Listening on {}", server.base_url());
    println!("Press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    server.stop();
    Ok(())
}

async fn track(
    phone: &str,
    country_code: &str,
    json: bool,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let response = tracking::track(
        phone,
        Some(country_code),
        |progress| {
            println!(
                "[{}/{}] {:>3}% {}",
                progress.step, progress.total_steps, progress.percentage, progress.message
            );
        },
        None,
    )
    .await;

    if let Some(data_dir) = data_dir {
        let storage = HistoryStorage::new(data_dir)?;
        storage.record(HistoryEntry::from_response(phone, &response))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match (&response.data, &response.error) {
        (Some(data), _) => {
            print_profile(data, country_code);
            println!("\nConcluído em {}ms", response.processing_time);
            Ok(())
        }
        (None, Some(error)) => bail!("{error}"),
        (None, None) => bail!("empty result envelope"),
    }
}

fn print_profile(data: &TrackingData, country_code: &str) {
    let location = &data.approximate_location;
    let account = &data.account_info;
    let activity = &data.activity_pattern;

    println!();
    println!("Número:       {}", format_phone_number(&data.phone_number, country_code));
    println!("Status:       {}", if data.is_online { "online" } else { "offline" });
    if !data.is_online {
        println!("Visto por último: {}", data.last_seen.format("%d/%m/%Y %H:%M UTC"));
    }
    println!(
        "Localização:  {} - {}, {} ({:.4}, {:.4})",
        location.city, location.state, location.country,
        location.coordinates.lat, location.coordinates.lng
    );
    println!(
        "Conta:        desde {}{}",
        account.registration_date.format("%d/%m/%Y"),
        if account.is_business_account { ", comercial" } else { "" }
    );
    println!(
        "Atividade:    pico às {}h, média {}",
        activity.most_active_hour, activity.average_online_time
    );
    for day in &activity.weekly_activity {
        println!("  {:<8} {}h", day.day, day.hours);
    }
}

fn history(data_dir: PathBuf, clear: bool) -> anyhow::Result<()> {
    let storage = HistoryStorage::new(data_dir)?;

    if clear {
        storage.clear()?;
        println!("Histórico limpo");
        return Ok(());
    }

    let entries = storage.list()?;
    if entries.is_empty() {
        println!("Nenhuma busca registrada");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  {:<16} {}",
            entry.search_date.format("%d/%m/%Y %H:%M"),
            entry.phone_number,
            if entry.success { "ok" } else { "falhou" }
        );
    }
    Ok(())
}
