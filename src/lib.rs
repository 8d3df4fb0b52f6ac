pub mod protocol;

pub mod registry;

pub mod measurement;

pub mod client;

pub mod server;

pub mod error;

pub use crate::client::{Outcome, request};
pub use crate::error::{MeteoError, Result};
pub use crate::measurement::{MeasurementSource, SimulatedSource};
pub use crate::registry::CityRegistry;
pub use crate::server::WeatherServer;
