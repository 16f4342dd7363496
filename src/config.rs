use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::{default_sources, SourceDescriptor, SourceKind};

/// Card search and deck export server
#[derive(Parser, Debug, Clone)]
#[command(name = "deckhand")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Directory holding cardlist_filtered.csv, custom_cards.csv and cardlist_p_only.csv
    #[arg(long, env = "DECK_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long, env = "DECK_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Explicit card list as KIND=PATH (official, custom or parallel); repeatable.
    /// Replaces the data directory defaults when given.
    #[arg(long = "source", value_name = "KIND=PATH", value_parser = parse_source)]
    pub sources: Vec<SourceDescriptor>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The card lists to load on every request.
    pub fn resolved_sources(&self) -> Vec<SourceDescriptor> {
        if self.sources.is_empty() {
            default_sources(&self.data_dir)
        } else {
            self.sources.clone()
        }
    }
}

fn parse_source(arg: &str) -> Result<SourceDescriptor, String> {
    let (kind, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=PATH, got '{arg}'"))?;
    if path.trim().is_empty() {
        return Err(format!("missing path in '{arg}'"));
    }
    let kind: SourceKind = kind.trim().parse()?;
    Ok(SourceDescriptor::new(kind, path.trim()))
}
