use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use url::Url;

use traefik_mapper::config::options_from_lookup;
use traefik_mapper::upstream::UpstreamClient;
use traefik_mapper::{transform, RoutingDocument};

#[derive(Parser)]
#[command(name = "mapper-cli")]
#[command(about = "Apply the mapper pipeline to a routing document once", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "url"])))]
struct Cli {
    /// Read the routing document from a JSON file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Fetch the routing document from a control plane URL
    #[arg(short, long)]
    url: Option<Url>,

    /// Upstream timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Same TRAEFIK_MAPPER_* variables as the service
    let options = options_from_lookup(|name| std::env::var(name).ok());

    let document: RoutingDocument = match (cli.input, cli.url) {
        (Some(path), _) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        (None, Some(url)) => {
            UpstreamClient::new(url, Duration::from_secs(cli.timeout_secs))?
                .fetch()
                .await?
        }
        (None, None) => return Err("either --input or --url is required".into()),
    };

    let mapped = transform(&document, &options);

    let output = if cli.pretty {
        serde_json::to_string_pretty(&mapped)?
    } else {
        serde_json::to_string(&mapped)?
    };
    println!("{}", output);

    Ok(())
}
