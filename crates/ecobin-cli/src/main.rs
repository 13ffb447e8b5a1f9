use anyhow::anyhow;
use clap::{Parser, Subcommand, ValueEnum};
use ecobin_cli::{CONFIRMATION, HttpTransport, ReportOutcome, ReportTransport, StatusReporter};
use ecobin_core::domain::{BinId, BinStatus, timestamp};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the status API
    #[arg(long, env = "ECOBIN_API", default_value = "http://localhost:8080")]
    api: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether a bin is OK or FULL
    Report { bin_id: String, status: StatusArg },

    /// Print the current record of a bin
    Show { bin_id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Ok,
    Full,
}

impl From<StatusArg> for BinStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Ok => BinStatus::Ok,
            StatusArg::Full => BinStatus::Full,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let transport = HttpTransport::new(&args.api)?;

    match args.command {
        Command::Report { bin_id, status } => {
            let reporter = StatusReporter::new(transport, BinId::parse(bin_id)?);

            let outcome = reporter
                .report(status.into(), |bin| {
                    debug!(bin_id = %bin.id, status = %bin.status, "Received updated bin");
                })
                .await;

            match outcome {
                ReportOutcome::Updated(bin) => {
                    println!("{CONFIRMATION}");
                    println!(
                        "{} is now {} (updated {})",
                        bin.name,
                        bin.status,
                        timestamp::format(&bin.last_updated)
                    );
                }
                ReportOutcome::Failed(message) => return Err(anyhow!(message)),
                ReportOutcome::Busy => return Err(anyhow!("A report is already in progress")),
            }
        }
        Command::Show { bin_id } => {
            let bin = transport.get_bin(&BinId::parse(bin_id)?).await?;
            println!("{}", serde_json::to_string_pretty(&bin)?);
        }
    }

    Ok(())
}
