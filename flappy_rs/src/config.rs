//! Configuration of the simulation.

use std::time::Duration;

use semver::Version;

/// Type which represents duration between two ticks.
pub type DeltaTime = Duration;

/// Configuration of the simulation.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    delta: DeltaTime,
    ticks: u32,
    flap_interval: u32,
}

impl Config {
    /// Creates configuration of 60 ticks per second simulation which lasts for 10 seconds.
    pub fn new(name: String, version: Version) -> Self {
        Self {
            name,
            version,
            delta: Duration::from_micros(16_667),
            ticks: 600,
            flap_interval: 25,
        }
    }

    pub fn with_delta(mut self, delta: DeltaTime) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    /// Player flaps once per given count of ticks. Zero disables flapping.
    pub fn with_flap_interval(mut self, flap_interval: u32) -> Self {
        self.flap_interval = flap_interval;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn delta(&self) -> DeltaTime {
        self.delta
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn flap_interval(&self) -> u32 {
        self.flap_interval
    }

    /// Count of ticks in one second of simulated time.
    pub fn ticks_per_second(&self) -> u32 {
        let ticks = (1.0 / self.delta.as_secs_f64()).round();
        (ticks as u32).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("Hello World".to_string(), Version::new(0, 0, 0))
    }
}
