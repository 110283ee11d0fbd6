use clap::Parser;

use crate::config::Config;

/// User-specified command line parameters
#[derive(Debug, Parser)]
#[clap(name = "Flappy simulation", about)]
pub struct Args {
    /// Count of ticks to simulate.
    pub ticks: Option<u32>,

    /// Player flaps once per this count of ticks. Zero disables flapping.
    pub flap_interval: Option<u32>,

    /// Count of ticks in one second of simulated time.
    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    pub rate: Option<u32>,
}

impl Args {
    /// Overrides values of the configuration with values passed by the user.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(ticks) = self.ticks {
            config = config.with_ticks(ticks);
        }
        if let Some(interval) = self.flap_interval {
            config = config.with_flap_interval(interval);
        }
        if let Some(rate) = self.rate {
            config = config.with_delta(std::time::Duration::from_secs(1) / rate);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["flappy_rs"]).unwrap();
        let config = args.apply(Config::default());
        assert_eq!(config.ticks(), 600);
        assert_eq!(config.flap_interval(), 25);
        assert_eq!(config.ticks_per_second(), 60);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from(["flappy_rs", "120", "0", "30"]).unwrap();
        let config = args.apply(Config::default());
        assert_eq!(config.ticks(), 120);
        assert_eq!(config.flap_interval(), 0);
        assert_eq!(config.ticks_per_second(), 30);
    }

    #[test]
    fn test_invalid() {
        let error = Args::try_parse_from(["flappy_rs", "abc"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(error.to_string().contains("TICKS"));

        let error = Args::try_parse_from(["flappy_rs", "10", "1", "0"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
