use clap::Parser;
use log::{error, info};
use server::category_store::CategoryStore;
use server::network::{AppState, Server};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "5050")]
    port: u16,

    /// Directory holding one `<category>.csv` file per category
    #[arg(short, long, default_value = "categories")]
    categories: PathBuf,

    /// Seed for the random source, for reproducible rounds
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let categories = if args.categories.is_absolute() {
        args.categories
    } else {
        std::env::current_dir()?.join(args.categories)
    };

    let store = CategoryStore::new(categories);
    info!("Found {} categories", store.list_categories().len());
    if let Some(seed) = args.seed {
        info!("Using fixed random seed {}", seed);
    }

    let state = AppState::with_seed(store, args.seed);
    let address = format!("{}:{}", args.host, args.port);
    let server = Server::new(&address, state).await?;

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!("Server stopped: {}", e);
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
