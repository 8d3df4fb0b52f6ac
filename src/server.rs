//! Iterative weather server.
//!
//! The server accepts, fully services and closes one connection before
//! accepting the next. Reads and writes block with no timeout; a slow or
//! silent client stalls the server. That is a documented limitation of the
//! protocol, not something this module works around.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use log::{debug, error, info, warn};

use crate::error::Result;
use crate::measurement::MeasurementSource;
use crate::protocol::{METRIC_NONE, Metric, REQUEST_SIZE, Status, WeatherRequest, WeatherResponse};
use crate::registry::CityRegistry;

/// The weather server: a listening socket plus its injected collaborators.
pub struct WeatherServer<S: MeasurementSource> {
    listener: TcpListener,
    registry: CityRegistry,
    source: S,
}

impl<S: MeasurementSource> WeatherServer<S> {
    /// Bind the listening socket. A bind failure here is the only socket
    /// error that is fatal to the process.
    pub fn bind(addr: impl ToSocketAddrs, registry: CityRegistry, source: S) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            registry,
            source,
        })
    }

    /// The address the server is listening on. Lets callers bind port 0 and
    /// discover the assigned port.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept and serve connections forever.
    ///
    /// An `accept` failure is logged and the loop continues; a failed
    /// connection never takes the server down. Normal operation does not
    /// return.
    pub fn run(&mut self) -> Result<()> {
        info!("listening on {}", self.local_addr()?);
        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(conn) => conn,
                Err(e) => {
                    error!("accept failed: {e}");
                    continue;
                }
            };
            if let Err(e) = self.handle(stream, peer) {
                warn!("connection from {peer}: {e}");
            }
        }
    }

    /// Serve one connection: read one request, answer it, close.
    ///
    /// The socket closes when `stream` drops, on every path.
    fn handle(&mut self, mut stream: TcpStream, peer: SocketAddr) -> Result<()> {
        let mut buf = [0u8; REQUEST_SIZE];
        if let Err(e) = stream.read_exact(&mut buf) {
            // The peer hung up before a full request arrived. Abandon
            // silently: no response is owed on a short read.
            debug!("abandoning {peer}: {e}");
            return Ok(());
        }

        let request = WeatherRequest::decode(&buf)?;
        info!(
            "request '{} {}' from {peer}",
            request.metric_code as char, request.city
        );

        let response = answer(&request, &self.registry, &mut self.source);
        stream.write_all(&response.encode())?;
        debug!("sent response: {response:?}");
        Ok(())
    }
}

/// Decide the response for a single request.
///
/// Metric validity is checked strictly before city membership: an invalid
/// metric with an unknown city reports `InvalidRequest`, never
/// `CityNotFound`. Every non-success response clears the metric echo to
/// [`METRIC_NONE`] and carries a `0.0` value.
pub fn answer(
    request: &WeatherRequest,
    registry: &CityRegistry,
    source: &mut impl MeasurementSource,
) -> WeatherResponse {
    let Some(metric) = Metric::from_code(request.metric_code) else {
        return WeatherResponse {
            status: Status::InvalidRequest,
            metric_code: METRIC_NONE,
            value: 0.0,
        };
    };

    if !registry.is_supported(&request.city) {
        return WeatherResponse {
            status: Status::CityNotFound,
            metric_code: METRIC_NONE,
            value: 0.0,
        };
    }

    WeatherResponse {
        status: Status::Success,
        metric_code: metric.code(),
        value: source.measure(metric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(f32);

    impl MeasurementSource for FixedSource {
        fn temperature(&mut self) -> f32 {
            self.0
        }
        fn humidity(&mut self) -> f32 {
            self.0
        }
        fn wind(&mut self) -> f32 {
            self.0
        }
        fn pressure(&mut self) -> f32 {
            self.0
        }
    }

    fn ask(metric_code: u8, city: &str) -> WeatherResponse {
        answer(
            &WeatherRequest::new(metric_code, city),
            &CityRegistry::italian(),
            &mut FixedSource(21.5),
        )
    }

    #[test]
    fn success_echoes_metric_and_value() {
        let res = ask(b't', "bari");
        assert_eq!(res.status, Status::Success);
        assert_eq!(res.metric_code, b't');
        assert_eq!(res.value, 21.5);
    }

    #[test]
    fn unknown_city_clears_metric() {
        let res = ask(b't', "marte");
        assert_eq!(res.status, Status::CityNotFound);
        assert_eq!(res.metric_code, METRIC_NONE);
        assert_eq!(res.value, 0.0);
    }

    #[test]
    fn invalid_metric_is_rejected() {
        let res = ask(b'z', "bari");
        assert_eq!(res.status, Status::InvalidRequest);
        assert_eq!(res.metric_code, METRIC_NONE);
        assert_eq!(res.value, 0.0);
    }

    #[test]
    fn metric_validity_is_checked_before_city() {
        // Both the metric and the city are bad; the metric verdict wins.
        let res = ask(b'z', "marte");
        assert_eq!(res.status, Status::InvalidRequest);
    }

    #[test]
    fn city_match_is_case_insensitive() {
        let res = ask(b'h', "ROMA");
        assert_eq!(res.status, Status::Success);
        assert_eq!(res.metric_code, b'h');
    }

    #[test]
    fn custom_registry_is_honored() {
        let registry = CityRegistry::new(["atlantide"]);
        let res = answer(
            &WeatherRequest::new(b'w', "Atlantide"),
            &registry,
            &mut FixedSource(3.0),
        );
        assert_eq!(res.status, Status::Success);
        let res = answer(
            &WeatherRequest::new(b'w', "roma"),
            &registry,
            &mut FixedSource(3.0),
        );
        assert_eq!(res.status, Status::CityNotFound);
    }
}
