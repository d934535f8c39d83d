//! Court configuration: the dimensions and speeds the simulation depends on but does not own.
//!
//! A [`CourtConfig`] is plain data. It must go through [`CourtConfig::validate`] to become a [`ValidCourtConfig`],
//! which is the only form the simulation accepts.

use std::ops::Deref;
use std::time::Duration;

pub const COURT_WIDTH: f64 = 800.0;
pub const COURT_HEIGHT: f64 = 400.0;

pub const PADDLE_WIDTH: f64 = 10.0;
pub const PADDLE_HEIGHT: f64 = 75.0;
pub const BALL_RADIUS: f64 = 10.0;

pub const AI_SPEED: f64 = 4.0;
pub const PADDLE_STEP: f64 = 7.0;

pub const SERVE_SPEED: f64 = 2.0;
pub const SERVE_MAX_DY: f64 = 2.0;
pub const PADDLE_BOUNCE_GAIN: f64 = 1.05;
pub const PADDLE_DEFLECTION: f64 = 5.0;
pub const POINTER_DEADZONE: f64 = 5.0;
pub const AI_NOISE_AMPLITUDE: f64 = 10.0;

pub const TICKS_PER_SECOND: u32 = 60;

/// Errors found while validating a [`CourtConfig`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A length or speed that must be strictly positive is zero, negative or not a number.
    #[error("`{name}` must be a finite positive number - got `{value}`")]
    NotPositive { name: &'static str, value: f64 },

    /// A quantity that may be zero is negative or not a number.
    #[error("`{name}` must be a finite non-negative number - got `{value}`")]
    Negative { name: &'static str, value: f64 },

    #[error("paddle height {paddle_height} does not fit in court height {court_height}")]
    PaddleTooTall {
        paddle_height: f64,
        court_height: f64,
    },

    #[error("two paddles of width {paddle_width} do not fit in court width {court_width}")]
    PaddlesTooWide {
        paddle_width: f64,
        court_width: f64,
    },

    #[error("ball of radius {ball_radius} does not fit in court height {court_height}")]
    BallTooLarge {
        ball_radius: f64,
        court_height: f64,
    },

    #[error("the tick rate must be at least 1 tick per second")]
    ZeroTickRate,

    #[error("the ball speed cap {cap} is below the serve speed {serve_speed}")]
    SpeedCapBelowServe { cap: f64, serve_speed: f64 },
}

/// Every tunable of a game. Units are court units (pixels of the classic canvas) and ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtConfig {
    pub court_width: f64,
    pub court_height: f64,
    pub paddle_width: f64,
    pub paddle_height: f64,
    pub ball_radius: f64,
    /// AI paddle movement per tick at difficulty 1.
    pub ai_speed: f64,
    /// Player paddle movement per tick.
    pub paddle_step: f64,
    /// Horizontal ball speed right after a serve.
    pub serve_speed: f64,
    /// Vertical serve speed is drawn uniformly from `[-serve_max_dy, serve_max_dy]`.
    pub serve_max_dy: f64,
    /// Factor applied to the horizontal speed on every paddle hit.
    pub paddle_bounce_gain: f64,
    /// Vertical speed given to a ball hitting the very end of a paddle.
    pub paddle_deflection: f64,
    /// Pointer control ignores gaps of this size or less.
    pub pointer_deadzone: f64,
    pub ai_noise_amplitude: f64,
    /// Optional ceiling on the horizontal ball speed. Rallies accelerate without bound when absent.
    pub max_ball_dx: Option<f64>,
    pub ticks_per_second: u32,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            court_width: COURT_WIDTH,
            court_height: COURT_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_radius: BALL_RADIUS,
            ai_speed: AI_SPEED,
            paddle_step: PADDLE_STEP,
            serve_speed: SERVE_SPEED,
            serve_max_dy: SERVE_MAX_DY,
            paddle_bounce_gain: PADDLE_BOUNCE_GAIN,
            paddle_deflection: PADDLE_DEFLECTION,
            pointer_deadzone: POINTER_DEADZONE,
            ai_noise_amplitude: AI_NOISE_AMPLITUDE,
            max_ball_dx: None,
            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl CourtConfig {
    /// Check every option, failing on the first malformed one.
    pub fn validate(self) -> Result<ValidCourtConfig, ConfigError> {
        for (name, value) in [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("ai_speed", self.ai_speed),
            ("paddle_step", self.paddle_step),
            ("serve_speed", self.serve_speed),
            ("paddle_bounce_gain", self.paddle_bounce_gain),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("serve_max_dy", self.serve_max_dy),
            ("paddle_deflection", self.paddle_deflection),
            ("pointer_deadzone", self.pointer_deadzone),
            ("ai_noise_amplitude", self.ai_noise_amplitude),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.paddle_height > self.court_height {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                court_height: self.court_height,
            });
        }
        if 2.0 * self.paddle_width >= self.court_width {
            return Err(ConfigError::PaddlesTooWide {
                paddle_width: self.paddle_width,
                court_width: self.court_width,
            });
        }
        if 2.0 * self.ball_radius > self.court_height {
            return Err(ConfigError::BallTooLarge {
                ball_radius: self.ball_radius,
                court_height: self.court_height,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if let Some(cap) = self.max_ball_dx {
            if !(cap.is_finite() && cap >= self.serve_speed) {
                return Err(ConfigError::SpeedCapBelowServe {
                    cap,
                    serve_speed: self.serve_speed,
                });
            }
        }
        Ok(ValidCourtConfig(self))
    }
}

/// A [`CourtConfig`] that passed validation. Derefs to the inner config for reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCourtConfig(CourtConfig);

impl Deref for ValidCourtConfig {
    type Target = CourtConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for ValidCourtConfig {
    fn default() -> Self {
        Self(CourtConfig::default())
    }
}

impl ValidCourtConfig {
    /// Time between two ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }

    /// Largest top-y a paddle may have.
    pub fn max_paddle_y(&self) -> f64 {
        self.court_height - self.paddle_height
    }

    /// Top-y of a paddle centered vertically on the court.
    pub fn centered_paddle_y(&self) -> f64 {
        self.max_paddle_y() / 2.0
    }

    /// Clamp a paddle top-y into the court.
    pub fn clamp_paddle_y(&self, y: f64) -> f64 {
        y.clamp(0.0, self.max_paddle_y())
    }

    pub fn into_inner(self) -> CourtConfig {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = CourtConfig::default().validate().unwrap();
        assert_eq!(config.court_width, 800.0);
        assert_eq!(config.max_paddle_y(), 325.0);
        assert_eq!(config.centered_paddle_y(), 162.5);
        assert_eq!(ValidCourtConfig::default(), config);
    }

    #[test]
    fn tick_period() {
        let config = CourtConfig {
            ticks_per_second: 100,
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(config.tick_period(), Duration::from_millis(10));
    }

    #[test]
    fn clamp_paddle() {
        let config = ValidCourtConfig::default();
        assert_eq!(config.clamp_paddle_y(-3.0), 0.0);
        assert_eq!(config.clamp_paddle_y(1000.0), 325.0);
        assert_eq!(config.clamp_paddle_y(12.0), 12.0);
    }

    #[test]
    fn malformed_configs() {
        let negative_width = CourtConfig {
            court_width: -1.0,
            ..Default::default()
        };
        assert_eq!(
            negative_width.validate(),
            Err(ConfigError::NotPositive {
                name: "court_width",
                value: -1.0
            })
        );

        let nan_step = CourtConfig {
            paddle_step: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_step.validate(),
            Err(ConfigError::NotPositive {
                name: "paddle_step",
                ..
            })
        ));

        let negative_deadzone = CourtConfig {
            pointer_deadzone: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_deadzone.validate(),
            Err(ConfigError::Negative {
                name: "pointer_deadzone",
                ..
            })
        ));

        let tall_paddle = CourtConfig {
            paddle_height: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            tall_paddle.validate(),
            Err(ConfigError::PaddleTooTall { .. })
        ));

        let wide_paddles = CourtConfig {
            paddle_width: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            wide_paddles.validate(),
            Err(ConfigError::PaddlesTooWide { .. })
        ));

        let big_ball = CourtConfig {
            ball_radius: 201.0,
            ..Default::default()
        };
        assert!(matches!(
            big_ball.validate(),
            Err(ConfigError::BallTooLarge { .. })
        ));

        let no_ticks = CourtConfig {
            ticks_per_second: 0,
            ..Default::default()
        };
        assert_eq!(no_ticks.validate(), Err(ConfigError::ZeroTickRate));

        let low_cap = CourtConfig {
            max_ball_dx: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            low_cap.validate(),
            Err(ConfigError::SpeedCapBelowServe { .. })
        ));
    }
}
