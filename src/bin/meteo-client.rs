use anyhow::{Result, bail};
use clap::Parser;
use meteo::Outcome;
use meteo::protocol::DEFAULT_PORT;

#[derive(Parser)]
#[command(author, version)]
struct Args {
    /// Server address.
    #[arg(short, long, default_value = "127.0.0.1")]
    server: String,
    /// Server port.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Request to send, a metric code followed by a city: "t bari".
    #[arg(short, long)]
    request: String,
}

/// Split `-r "t bari"` into the metric code byte and the city name.
///
/// Only the first byte of the first token matters, and it is sent even when
/// it is not a valid code; the server decides validity.
fn parse_request(raw: &str) -> Result<(u8, &str)> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("empty request, expected \"<type> <city>\"");
    }
    let mut parts = raw.splitn(2, char::is_whitespace);
    let code = parts.next().unwrap_or_default().as_bytes()[0];
    let city = parts.next().unwrap_or_default().trim();
    Ok((code, city))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (code, city) = parse_request(&args.request)?;
    let outcome = meteo::request((args.server.as_str(), args.port), code, city)?;

    match outcome {
        Outcome::Reading { metric, value } => {
            println!("{city}: {} = {value:.1} {}", metric.label(), metric.unit());
        }
        Outcome::CityNotFound => println!("City not available"),
        Outcome::InvalidRequest => println!("Invalid request"),
    }
    Ok(())
}
