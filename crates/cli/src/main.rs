use anyhow::Context;
use clap::{Parser, Subcommand};
use reel_kernel::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "reel-cli", version, about = "Run and inspect the Reel movie service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the movie catalogue over HTTP
    Serve {
        /// Interface to bind, overriding configuration
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overriding configuration
        #[arg(long)]
        port: Option<u16>,
        /// Start with an empty catalogue
        #[arg(long)]
        no_seed: bool,
    },
    /// Print the effective settings as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Reel settings")?;

    match cli.command {
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
        Command::Serve {
            host,
            port,
            no_seed,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if no_seed {
                settings.movies.seed_demo_data = false;
            }

            reel_telemetry::init(&settings.telemetry)?;

            let runtime = tokio::runtime::Runtime::new()
                .with_context(|| "failed to start tokio runtime")?;
            runtime.block_on(reel_app::serve(settings))
        }
    }
}
