use clap::Parser;

mod action;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Logging directives, using the tracing env filter syntax.
    #[clap(
        long,
        env = "LOG",
        default_value = "cartouche=debug,cartouche_engine=debug,tower_http=debug"
    )]
    log: String,
    /// Disables the colors in the logs.
    #[clap(long, env = "LOG_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    action: action::Action,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = cartouche::init_logs(&args.log, !args.no_color) {
        eprintln!("unable to initialize logs: {err}");
    }

    if let Err(err) = args.action.execute().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
