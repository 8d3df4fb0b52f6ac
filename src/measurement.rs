//! A module for measurement sources.
//!
//! The server does not read real sensors; it asks an injected
//! [`MeasurementSource`] for a value per metric. Production uses the
//! random [`SimulatedSource`]; tests plug in deterministic stubs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::protocol::Metric;

/// A source of weather readings, one no-argument operation per metric.
///
/// Methods take `&mut self` so stateful generators fit without interior
/// mutability; the server handles one connection at a time, so exclusive
/// access is free.
pub trait MeasurementSource {
    /// Air temperature in °C.
    fn temperature(&mut self) -> f32;

    /// Relative humidity in %.
    fn humidity(&mut self) -> f32;

    /// Wind speed in km/h.
    fn wind(&mut self) -> f32;

    /// Atmospheric pressure in hPa.
    fn pressure(&mut self) -> f32;

    /// Dispatch to the operation selected by `metric`.
    fn measure(&mut self, metric: Metric) -> f32 {
        match metric {
            Metric::Temperature => self.temperature(),
            Metric::Humidity => self.humidity(),
            Metric::Wind => self.wind(),
            Metric::Pressure => self.pressure(),
        }
    }
}

/// Pseudo-random readings within fixed per-metric ranges.
pub struct SimulatedSource {
    rng: StdRng,
}

impl SimulatedSource {
    /// Create a source seeded once from the OS. Values are not reproducible
    /// across runs, and don't need to be.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSource for SimulatedSource {
    fn temperature(&mut self) -> f32 {
        self.rng.gen_range(-10.0..40.0)
    }

    fn humidity(&mut self) -> f32 {
        self.rng.gen_range(20.0..100.0)
    }

    fn wind(&mut self) -> f32 {
        self.rng.gen_range(0.0..100.0)
    }

    fn pressure(&mut self) -> f32 {
        self.rng.gen_range(950.0..1050.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_values_stay_in_range() {
        let mut source = SimulatedSource::new();
        for _ in 0..1000 {
            let t = source.temperature();
            assert!((-10.0..40.0).contains(&t), "temperature {t}");
            let h = source.humidity();
            assert!((20.0..100.0).contains(&h), "humidity {h}");
            let w = source.wind();
            assert!((0.0..100.0).contains(&w), "wind {w}");
            let p = source.pressure();
            assert!((950.0..1050.0).contains(&p), "pressure {p}");
        }
    }

    #[test]
    fn measure_dispatches_by_metric() {
        struct Labeled;
        impl MeasurementSource for Labeled {
            fn temperature(&mut self) -> f32 {
                1.0
            }
            fn humidity(&mut self) -> f32 {
                2.0
            }
            fn wind(&mut self) -> f32 {
                3.0
            }
            fn pressure(&mut self) -> f32 {
                4.0
            }
        }

        let mut source = Labeled;
        assert_eq!(source.measure(Metric::Temperature), 1.0);
        assert_eq!(source.measure(Metric::Humidity), 2.0);
        assert_eq!(source.measure(Metric::Wind), 3.0);
        assert_eq!(source.measure(Metric::Pressure), 4.0);
    }
}
