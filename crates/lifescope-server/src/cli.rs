use clap::Parser;
use std::path::PathBuf;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config/lifescope.toml";

#[derive(Parser, Debug)]
#[command(
    name = "lifescope-server",
    version,
    about = "LifeScope health risk assessment API"
)]
pub(crate) struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub(crate) config: PathBuf,
    #[arg(long)]
    pub(crate) listen_addr: Option<String>,
    #[arg(long)]
    pub(crate) data_dir: Option<String>,
    #[arg(long)]
    pub(crate) log_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
}
