use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rollcall-backend")]
#[command(about = "Rollcall Attendance Backend", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory for daily rotated log files; logs go to stdout when unset
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = backend_bootstrap::init_tracing(args.log_dir.as_deref());

    if let Some(config) = args.config {
        std::env::set_var("ROLLCALL_CONFIG", config);
    }

    backend_bootstrap::run_standalone().await
}
