//! Client-server communication protocol definitions.
//!
//! This module defines the fixed-size binary messages exchanged between the
//! weather client and server over TCP connections. There is no length prefix
//! and no delimiter: both ends agree on the layout at build time, and a
//! message boundary is exactly [`REQUEST_SIZE`] or [`RESPONSE_SIZE`] bytes.
//! Multi-byte fields are little-endian.

use crate::error::{MeteoError, Result};

/// Fixed capacity of the city field on the wire, terminator included.
pub const CITY_CAPACITY: usize = 32;

/// Wire size of a request: 1 metric code byte plus the city block.
pub const REQUEST_SIZE: usize = 1 + CITY_CAPACITY;

/// Wire size of a response: 4-byte status, 1 metric code byte, 4-byte value.
pub const RESPONSE_SIZE: usize = 4 + 1 + 4;

/// Default port both binaries use when `-p` is not given.
pub const DEFAULT_PORT: u16 = 4000;

/// Sentinel metric code carried by every non-success response.
pub const METRIC_NONE: u8 = 0;

/// Weather quantity a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Air temperature, °C.
    Temperature,
    /// Relative humidity, %.
    Humidity,
    /// Wind speed, km/h.
    Wind,
    /// Atmospheric pressure, hPa.
    Pressure,
}

impl Metric {
    /// Parse a one-byte metric code. Anything outside `{t,h,w,p}` is invalid.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b't' => Some(Metric::Temperature),
            b'h' => Some(Metric::Humidity),
            b'w' => Some(Metric::Wind),
            b'p' => Some(Metric::Pressure),
            _ => None,
        }
    }

    /// The one-byte wire code for this metric.
    pub fn code(self) -> u8 {
        match self {
            Metric::Temperature => b't',
            Metric::Humidity => b'h',
            Metric::Wind => b'w',
            Metric::Pressure => b'p',
        }
    }

    /// Human-readable name, for client output.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Wind => "Wind",
            Metric::Pressure => "Pressure",
        }
    }

    /// Measurement unit, for client output.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Wind => "km/h",
            Metric::Pressure => "hPa",
        }
    }
}

/// Outcome code of a request. The integer values are wire-stable and must
/// not change: independently built peers rely on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The measurement was produced.
    Success = 0,
    /// The requested city is not in the registry.
    CityNotFound = 1,
    /// The metric code was not one of `{t,h,w,p}`.
    InvalidRequest = 2,
}

impl Status {
    fn from_wire(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Status::Success),
            1 => Ok(Status::CityNotFound),
            2 => Ok(Status::InvalidRequest),
            other => Err(MeteoError::InvalidStatus(other)),
        }
    }
}

/// Client request message.
///
/// Layout: `[metric code: 1][city: CITY_CAPACITY]`, the city block being the
/// name's bytes followed by zero padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    /// Raw one-byte metric code. Kept raw rather than as a [`Metric`] so a
    /// client can put an arbitrary byte on the wire and let the server judge.
    pub metric_code: u8,
    /// Requested city name, at most `CITY_CAPACITY - 1` bytes.
    pub city: String,
}

impl WeatherRequest {
    /// Build a request, silently truncating `city` to fit the wire field
    /// with room for a terminator. Truncation backs off to a character
    /// boundary so the stored name stays valid UTF-8.
    pub fn new(metric_code: u8, city: &str) -> Self {
        let mut end = city.len().min(CITY_CAPACITY - 1);
        while !city.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            metric_code,
            city: city[..end].to_string(),
        }
    }

    /// Serialize into the fixed request frame.
    pub fn encode(&self) -> [u8; REQUEST_SIZE] {
        let mut buf = [0u8; REQUEST_SIZE];
        buf[0] = self.metric_code;
        let city = self.city.as_bytes();
        let n = city.len().min(CITY_CAPACITY - 1);
        buf[1..1 + n].copy_from_slice(&city[..n]);
        buf
    }

    /// Deserialize from a buffer holding at least one full request frame.
    ///
    /// The city is read up to the first zero byte of the block; bytes that
    /// are not valid UTF-8 are replaced rather than rejected, since city
    /// matching happens against the registry anyway.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < REQUEST_SIZE {
            return Err(MeteoError::IncompleteMessage {
                expected: REQUEST_SIZE,
                got: bytes.len(),
            });
        }
        let block = &bytes[1..REQUEST_SIZE];
        let end = block.iter().position(|&b| b == 0).unwrap_or(block.len());
        Ok(Self {
            metric_code: bytes[0],
            city: String::from_utf8_lossy(&block[..end]).into_owned(),
        })
    }
}

/// Server response message.
///
/// Layout: `[status: i32 LE][metric code: 1][value: f32 LE]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherResponse {
    /// Outcome of the request.
    pub status: Status,
    /// Echo of the requested metric code on success, [`METRIC_NONE`] on any
    /// other status.
    pub metric_code: u8,
    /// The measurement, meaningful only when `status` is `Success`; `0.0`
    /// otherwise.
    pub value: f32,
}

impl WeatherResponse {
    /// Serialize into the fixed response frame.
    pub fn encode(&self) -> [u8; RESPONSE_SIZE] {
        let mut buf = [0u8; RESPONSE_SIZE];
        buf[0..4].copy_from_slice(&(self.status as i32).to_le_bytes());
        buf[4] = self.metric_code;
        buf[5..9].copy_from_slice(&self.value.to_le_bytes());
        buf
    }

    /// Deserialize from a buffer holding at least one full response frame.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RESPONSE_SIZE {
            return Err(MeteoError::IncompleteMessage {
                expected: RESPONSE_SIZE,
                got: bytes.len(),
            });
        }
        let status = Status::from_wire(i32::from_le_bytes(bytes[0..4].try_into().unwrap()))?;
        Ok(Self {
            status,
            metric_code: bytes[4],
            value: f32::from_le_bytes(bytes[5..9].try_into().unwrap()),
        })
    }
}
