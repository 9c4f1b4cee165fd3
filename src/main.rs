use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use roi::api::{InputArgs, evaluate, run_http_server};
use roi::config::{DEFAULT_CONFIG_FILE, InitOutcome, init_config, load_config};
use roi::report::{
    default_report_dir, export_report, file_url, render_summary_html, render_text_summary,
};

#[derive(Parser, Debug)]
#[command(
    name = "roi",
    about = "ROI calculator for AI adoption initiatives (benefits, costs, projections, HTML report)"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CONFIG_FILE,
        help = "Path to the TOML configuration file"
    )]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the input form and JSON API over HTTP.
    Serve {
        #[arg(long, help = "Port to listen on; overrides the config file")]
        port: Option<u16>,
        #[arg(long, help = "Directory exported reports are written to")]
        report_dir: Option<PathBuf>,
    },
    /// Compute the ROI metrics once and print them.
    Calc {
        #[command(flatten)]
        inputs: InputArgs,
        #[arg(long, help = "Also export the HTML summary report")]
        report: bool,
        #[arg(long, help = "Directory for the exported report")]
        report_dir: Option<PathBuf>,
    },
    /// Write the default configuration file if it does not exist yet.
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::InitConfig => {
            match init_config(&cli.config)? {
                InitOutcome::Created => println!("Created {}", cli.config.display()),
                InitOutcome::AlreadyPresent => {
                    println!("{} already exists; left unchanged", cli.config.display())
                }
            }
            Ok(())
        }
        Command::Serve { port, report_dir } => {
            let mut config = load_config(&cli.config)
                .with_context(|| format!("loading {}", cli.config.display()))?;
            if let Some(port) = port {
                config.server.port = port;
            }
            config
                .projection
                .validate()
                .context("invalid [projection] settings")?;
            let report_dir = report_dir.unwrap_or_else(default_report_dir);
            run_http_server(config, report_dir)
                .await
                .context("HTTP server error")
        }
        Command::Calc {
            inputs,
            report,
            report_dir,
        } => {
            let config = load_config(&cli.config)
                .with_context(|| format!("loading {}", cli.config.display()))?;
            config
                .projection
                .validate()
                .context("invalid [projection] settings")?;
            let evaluation = match evaluate(&inputs, &config.projection) {
                Ok(evaluation) => evaluation,
                Err(msg) => bail!("{msg}"),
            };
            print!("{}", render_text_summary(&evaluation.metrics));

            if report || report_dir.is_some() {
                let html = render_summary_html(
                    &evaluation.metrics,
                    &evaluation.additional,
                    &evaluation.charts,
                    Local::now().naive_local(),
                );
                let dir = report_dir.unwrap_or_else(default_report_dir);
                let path = export_report(&html, &dir)
                    .with_context(|| format!("writing report to {}", dir.display()))?;
                println!("Report: {}", file_url(&path));
            }
            Ok(())
        }
    }
}
