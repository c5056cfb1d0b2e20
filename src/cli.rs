use clap::Parser;

#[derive(Parser)]
#[command(name = "kube-snapshot")]
#[command(version)]
#[command(about = "Print pod phases, running pod logs and events for the whole cluster")]
pub struct Cli {
    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
