use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use webber::{Error, Executor, Result, Transport, TransportConfig};

mod cli;

async fn run(args: cli::CliArgs) -> Result<()> {
    let transport = Transport::new(TransportConfig::with_timeout(args.timeout()))?;
    let executor = Executor::new(transport);
    match executor.fetch(args.into_request()?).await {
        Ok(res) => {
            println!("{}", res.text());
            Ok(())
        }
        Err(Error::UnsuccessfulStatus(res)) => {
            // Still worth showing what the server said
            println!("{}", res.text());
            Err(Error::UnsuccessfulStatus(res))
        }
        Err(err) => Err(err),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::args();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
