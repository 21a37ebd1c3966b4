use clap::Parser;
use clio::Input;

#[derive(Debug, Parser)]
#[command(name = "portal-server", about = "SVIT student portal web service")]
pub struct Opt {
    /// Config file path
    #[arg(short, long, value_parser, default_value = "config.toml")]
    pub config: Input,
}
