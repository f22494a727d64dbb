//! urlconf
//!
//! Serves the site's route table over HTTP, or inspects it from the command line.
//!
//! | Command                         | Description                                |
//! |---------------------------------|--------------------------------------------|
//! | `urlconf serve`                 | Run the HTTP server (default)              |
//! | `urlconf resolve <path>`        | Show where a path is dispatched            |
//! | `urlconf routes`                | List every route, in match order           |
//! | `urlconf reverse <name> [k=v]`  | Build the path for a named route           |

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use urlconf::config::{load_config, SiteConfig};
use urlconf::http::{route_path, SiteRoutes};
use urlconf::observability::init_logging;
use urlconf::routing::RouteKind;
use urlconf::{build_site, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "urlconf", version)]
#[command(about = "Prefix-dispatch route table for the admin and polls applications", long_about = None)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
    /// Show where a path is dispatched
    Resolve {
        /// Request path, with or without the leading '/'
        path: String,
    },
    /// List every route in match order
    Routes,
    /// Build the path for a named route, e.g. `polls:vote question_id=3`
    Reverse {
        name: String,
        /// Parameters as KEY=VALUE
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Resolve { path } => {
            let site = build_site(&config.routes)?;
            print!("{}", describe_resolution(&site, &path)?);
            Ok(())
        }
        Commands::Routes => {
            let site = build_site(&config.routes)?;
            print!("{}", render_routes(&site));
            Ok(())
        }
        Commands::Reverse { name, params } => {
            let site = build_site(&config.routes)?;
            let params = parse_params(&params)?;
            println!("/{}", site.reverse(&name, &params)?);
            Ok(())
        }
    }
}

/// `KEY=VALUE` arguments into a parameter map.
fn parse_params(pairs: &[String]) -> Result<BTreeMap<String, String>, String> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", pair))?;
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

/// Where `path` is dispatched, one `label: value` line per fact.
fn describe_resolution(site: &SiteRoutes, path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let path = route_path(path).ok_or_else(|| format!("path '{}' is not valid UTF-8", path))?;
    let res = site.resolve(&path)?;

    let mut out = String::new();
    writeln!(out, "endpoint:  {}", res.endpoint.name())?;
    writeln!(out, "route:     {}", res.route)?;
    if let Some(name) = &res.name {
        writeln!(out, "name:      {}", name)?;
    }
    for hop in &res.hops {
        writeln!(out, "include:   {} -> {}", hop.prefix, hop.forwarded)?;
    }
    if !res.remainder.is_empty() {
        writeln!(out, "remainder: {}", res.remainder)?;
    }
    for (key, value) in &res.params {
        writeln!(out, "param:     {} = {}", key, value)?;
    }
    Ok(out)
}

fn render_routes(site: &SiteRoutes) -> String {
    site.routes()
        .into_iter()
        .map(|row| {
            let kind = match row.kind {
                RouteKind::Mount => "mount",
                RouteKind::Exact => "exact",
            };
            format!("{:<6} {:<36} {}\n", kind, row.pattern, row.name.unwrap_or_default())
        })
        .collect()
}

async fn serve(config: SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&config.observability)?;

    tracing::info!("urlconf v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let site = build_site(&config.routes)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, site);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
