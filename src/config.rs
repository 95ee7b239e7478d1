use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Command line, with environment fallbacks so a `.env` file can configure
/// a deployment.
#[derive(Debug, clap::Parser)]
#[clap(about = "Weekly schedule planner: JSON API plus a server-rendered page")]
pub struct Args {
    /// SQLite file holding days and tasks (created if missing)
    #[clap(long, env = "WEEKPLAN_DB", default_value = "weekplan.db")]
    pub db: PathBuf,

    /// Address to listen on
    #[clap(long, env = "WEEKPLAN_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[clap(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
}

impl Args {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
