use clap::Parser;
use equation_solver::{
    config::{Args, Config},
    logging, server,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose)?;

    let config = Config::from_args(&args);
    info!(
        addr = %config.addr,
        solve_timeout = ?config.solve_timeout,
        "Starting the equation solver"
    );

    if let Err(e) = server::serve(config).await {
        error!(error = %e, "Server failed");
        return Err(e);
    }

    Ok(())
}
