use anyhow::Result;
use clap::Parser;
use meteo::protocol::DEFAULT_PORT;
use meteo::{CityRegistry, SimulatedSource, WeatherServer};

#[derive(Parser)]
#[command(author, version)]
struct Args {
    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Starting server on port {}", args.port);

    let mut server = WeatherServer::bind(
        ("0.0.0.0", args.port),
        CityRegistry::italian(),
        SimulatedSource::new(),
    )?;
    server.run()?;

    Ok(())
}
