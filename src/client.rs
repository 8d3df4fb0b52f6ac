//! One-shot weather client.
//!
//! The protocol is strictly one request per connection: [`request`] opens a
//! connection, sends a single fixed-size request, reads a single fixed-size
//! response and closes. Nothing retries; any transport failure is terminal
//! for the call.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use log::debug;

use crate::error::{MeteoError, Result};
use crate::protocol::{Metric, RESPONSE_SIZE, Status, WeatherRequest, WeatherResponse};

/// Semantic result of a delivered exchange.
///
/// Non-success statuses are normal responses, not errors: the server heard
/// us and answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The server produced a measurement.
    Reading {
        /// The metric the server measured, echoed from the request.
        metric: Metric,
        /// The measured value, in the metric's unit.
        value: f32,
    },
    /// The requested city is not supported by the server.
    CityNotFound,
    /// The server rejected the metric code.
    InvalidRequest,
}

/// Perform one request against `addr`.
///
/// `metric_code` is sent as-is, even when it is not a valid code; judging it
/// is the server's job. `city` is truncated to the wire field capacity.
pub fn request(addr: impl ToSocketAddrs, metric_code: u8, city: &str) -> Result<Outcome> {
    let mut stream = TcpStream::connect(addr)?;
    let req = WeatherRequest::new(metric_code, city);
    debug!("sending request: {req:?}");

    stream
        .write_all(&req.encode())
        .map_err(MeteoError::SendError)?;

    let mut buf = [0u8; RESPONSE_SIZE];
    stream
        .read_exact(&mut buf)
        .map_err(MeteoError::ReceiveError)?;
    let res = WeatherResponse::decode(&buf)?;
    debug!("received response: {res:?}");

    match res.status {
        Status::Success => {
            let metric =
                Metric::from_code(res.metric_code).ok_or(MeteoError::UnknownMetric(res.metric_code))?;
            Ok(Outcome::Reading {
                metric,
                value: res.value,
            })
        }
        Status::CityNotFound => Ok(Outcome::CityNotFound),
        Status::InvalidRequest => Ok(Outcome::InvalidRequest),
    }
}
