use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mozillians::api::{QuerySchema, GROUPS, SKILLS, USERS};
use mozillians::config::{load_config, ClientConfig};
use mozillians::observability::logging::init_logging;
use mozillians::{MozilliansClient, Page};

#[derive(Parser)]
#[command(name = "mozillians-cli")]
#[command(about = "Query the Mozillians directory API", long_about = None)]
struct Cli {
    /// API key, sent as the X-API-KEY header.
    #[arg(short, long, env = "MOZILLIANS_API_KEY", hide_env_values = true)]
    key: String,

    /// TOML file with client settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the service hostname.
    #[arg(long)]
    hostname: Option<String>,

    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users
    Users(ListArgs),
    /// List groups
    Groups(ListArgs),
    /// List skills
    Skills(ListArgs),
    /// Fetch full details for a record URL
    Details {
        url: String,
    },
}

#[derive(clap::Args)]
struct ListArgs {
    /// Query option as key=value (repeatable).
    #[arg(short = 'o', long = "option")]
    options: Vec<String>,

    /// Follow `next` links for up to this many pages.
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(hostname) = cli.hostname {
        config.hostname = hostname;
    }

    let client = MozilliansClient::new(cli.key, config)?;

    match cli.command {
        Commands::Users(args) => list(&client, &USERS, args).await?,
        Commands::Groups(args) => list(&client, &GROUPS, args).await?,
        Commands::Skills(args) => list(&client, &SKILLS, args).await?,
        Commands::Details { url } => {
            let details = client.fetch_reference(&url).await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
    }

    Ok(())
}

async fn list(client: &MozilliansClient, schema: &QuerySchema, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = schema.parse_assignments(&args.options)?;
    let mut page = client.query(schema, &options).await?;

    for fetched in 1..=args.pages.max(1) {
        print_page(&page)?;
        if fetched == args.pages.max(1) {
            break;
        }
        let Some(next) = page.next_page() else {
            break;
        };
        let next = next.fetch().await?;
        page = next;
    }

    Ok(())
}

fn print_page(page: &Page) -> Result<(), Box<dyn std::error::Error>> {
    for record in page.results() {
        println!("{}", serde_json::to_string_pretty(record.data())?);
    }
    if let Some(count) = page.count() {
        eprintln!("{} results total", count);
    }
    Ok(())
}
