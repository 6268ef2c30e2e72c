use std::convert::TryFrom;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::model::clock::Pacing;
use crate::model::driver::{MAX_SPEED, MIN_SPEED};

#[derive(Debug, Parser)]
#[command(about = "Interactive model of the solar system")]
pub struct Args {
    /// Initial speed multiplier
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,
    /// Start with the animation paused
    #[arg(long)]
    pub paused: bool,
    /// Start with the orbit rings hidden
    #[arg(long)]
    pub hide_orbits: bool,
    /// Longest frame time, in seconds, the simulation will advance by at once
    #[arg(long, default_value_t = 1.0)]
    pub max_frame_delta: f64,
    /// Scale spins and camera smoothing by elapsed time instead of per frame
    #[arg(long)]
    pub frame_rate_independent: bool,
    /// Number of rocks in the asteroid belt
    #[arg(long = "asteroids", default_value_t = 300)]
    pub asteroid_count: usize,
    /// Seed for the asteroid belt layout
    #[arg(long, default_value_t = 0)]
    pub seed: u32,
    /// Directory containing planets/<name>.jpg textures
    #[arg(long)]
    pub assets: Option<PathBuf>,
    /// Body to follow at startup
    #[arg(long)]
    pub focus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("speed {0} is out of range")]
    SpeedOutOfRange(f64),
    #[error("max frame delta must be positive, got {0}")]
    NonPositiveFrameDelta(f64),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub speed: f64,
    pub paused: bool,
    pub show_orbits: bool,
    pub max_frame_delta: f64,
    pub pacing: Pacing,
    pub asteroid_count: usize,
    pub seed: u32,
    pub assets: Option<PathBuf>,
    pub focus: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            speed: 1.0,
            paused: false,
            show_orbits: true,
            max_frame_delta: 1.0,
            pacing: Pacing::PerFrame,
            asteroid_count: 300,
            seed: 0,
            assets: None,
            focus: None,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&args.speed) {
            return Err(ConfigError::SpeedOutOfRange(args.speed));
        }
        // written this way so NaN is rejected too
        if !(args.max_frame_delta > 0.0) {
            return Err(ConfigError::NonPositiveFrameDelta(args.max_frame_delta));
        }

        Ok(Config {
            speed: args.speed,
            paused: args.paused,
            show_orbits: !args.hide_orbits,
            max_frame_delta: args.max_frame_delta,
            pacing: if args.frame_rate_independent {
                Pacing::FrameRateIndependent
            } else {
                Pacing::PerFrame
            },
            asteroid_count: args.asteroid_count,
            seed: args.seed,
            assets: args.assets,
            focus: args.focus,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("orrery").chain(args.iter().copied()))
            .expect("arguments should parse");
        Config::try_from(args)
    }

    #[test]
    fn test_defaults_match() {
        let parsed = parse(&[]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.speed, default.speed);
        assert_eq!(parsed.paused, default.paused);
        assert_eq!(parsed.show_orbits, default.show_orbits);
        assert_eq!(parsed.max_frame_delta, default.max_frame_delta);
        assert_eq!(parsed.pacing, default.pacing);
        assert_eq!(parsed.asteroid_count, default.asteroid_count);
        assert_eq!(parsed.seed, default.seed);
        assert_eq!(parsed.assets, default.assets);
        assert_eq!(parsed.focus, default.focus);
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--speed",
            "2.5",
            "--paused",
            "--hide-orbits",
            "--frame-rate-independent",
            "--asteroids",
            "12",
            "--focus",
            "earth",
        ])
        .unwrap();
        assert_eq!(config.speed, 2.5);
        assert!(config.paused);
        assert!(!config.show_orbits);
        assert_eq!(config.pacing, Pacing::FrameRateIndependent);
        assert_eq!(config.asteroid_count, 12);
        assert_eq!(config.focus.as_deref(), Some("earth"));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            parse(&["--speed", "11"]).unwrap_err(),
            ConfigError::SpeedOutOfRange(11.0)
        );
        assert_eq!(
            parse(&["--max-frame-delta", "0"]).unwrap_err(),
            ConfigError::NonPositiveFrameDelta(0.0)
        );
    }
}
