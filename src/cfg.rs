#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{
    constants::{RETRY_ATTEMPTS, RETRY_DELAY_SECONDS},
    error::Error,
    prelude::{Duration, Unit},
    source::RetryPolicy,
    track::validate_grid,
};

fn default_step_seconds() -> f64 {
    60.0
}

fn default_count() -> usize {
    4320
}

fn default_retry_attempts() -> usize {
    RETRY_ATTEMPTS
}

fn default_retry_delay_seconds() -> f64 {
    RETRY_DELAY_SECONDS
}

fn default_request_timeout_seconds() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    format!("orbit-track/{}", env!("CARGO_PKG_VERSION"))
}

fn default_catalog_url() -> String {
    "https://celestrak.org".to_string()
}

fn default_max_span_days() -> f64 {
    30.0
}

fn default_max_animation_frames() -> usize {
    500
}

fn default_play_frame_duration_ms() -> u32 {
    1000
}

/// Pipeline [Config]uration.
/// Every field has a default, so partial descriptions may be deserialized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Propagation step, in seconds
    #[cfg_attr(feature = "serde", serde(default = "default_step_seconds"))]
    pub step_seconds: f64,
    /// Number of propagation steps
    #[cfg_attr(feature = "serde", serde(default = "default_count"))]
    pub count: usize,
    /// Total number of remote retrieval attempts
    #[cfg_attr(feature = "serde", serde(default = "default_retry_attempts"))]
    pub retry_attempts: usize,
    /// Fixed delay between two retrieval attempts, in seconds
    #[cfg_attr(feature = "serde", serde(default = "default_retry_delay_seconds"))]
    pub retry_delay_seconds: f64,
    /// Remote request timeout, in seconds
    #[cfg_attr(feature = "serde", serde(default = "default_request_timeout_seconds"))]
    pub request_timeout_seconds: f64,
    /// User agent presented to the remote catalog
    #[cfg_attr(feature = "serde", serde(default = "default_user_agent"))]
    pub user_agent: String,
    /// Remote catalog base URL
    #[cfg_attr(feature = "serde", serde(default = "default_catalog_url"))]
    pub catalog_url: String,
    /// Maximal distance to the TLE epoch we accept to propagate to, in days.
    #[cfg_attr(feature = "serde", serde(default = "default_max_span_days"))]
    pub max_span_days: f64,
    /// Maximal number of animation slider steps
    #[cfg_attr(feature = "serde", serde(default = "default_max_animation_frames"))]
    pub max_animation_frames: usize,
    /// Playback duration of a single frame, in milliseconds
    #[cfg_attr(feature = "serde", serde(default = "default_play_frame_duration_ms"))]
    pub play_frame_duration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_seconds: default_step_seconds(),
            count: default_count(),
            retry_attempts: default_retry_attempts(),
            retry_delay_seconds: default_retry_delay_seconds(),
            request_timeout_seconds: default_request_timeout_seconds(),
            user_agent: default_user_agent(),
            catalog_url: default_catalog_url(),
            max_span_days: default_max_span_days(),
            max_animation_frames: default_max_animation_frames(),
            play_frame_duration_ms: default_play_frame_duration_ms(),
        }
    }
}

impl Config {
    /// Low Earth Orbit preset: 10s step over a single day.
    pub fn leo_preset() -> Self {
        Self {
            step_seconds: 10.0,
            count: 8640,
            ..Default::default()
        }
    }

    /// Copies and returns [Config] with updated step
    pub fn with_step_seconds(&self, step_seconds: f64) -> Self {
        let mut s = self.clone();
        s.step_seconds = step_seconds;
        s
    }

    /// Copies and returns [Config] with updated number of steps
    pub fn with_count(&self, count: usize) -> Self {
        let mut s = self.clone();
        s.count = count;
        s
    }

    /// [RetryPolicy] described by this [Config]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry_attempts,
            delay: self.retry_delay_seconds * Unit::Second,
        }
    }

    /// Remote request timeout as [Duration]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_seconds * Unit::Second
    }

    /// Model validity span as [Duration]
    pub fn max_span(&self) -> Duration {
        self.max_span_days * Unit::Day
    }

    /// Remote request timeout, as expected by the HTTP layer.
    pub(crate) fn std_request_timeout(&self) -> Result<std::time::Duration, Error> {
        let invalid = || {
            Error::InvalidParameter(format!(
                "invalid request timeout {}s",
                self.request_timeout_seconds
            ))
        };
        if !self.request_timeout_seconds.is_finite() || self.request_timeout_seconds <= 0.0 {
            return Err(invalid());
        }
        // rejects values the Duration representation saturates or truncates
        let seconds = self.request_timeout().to_seconds();
        if seconds <= 0.0 || (seconds - self.request_timeout_seconds).abs() > 1.0 {
            return Err(invalid());
        }
        std::time::Duration::try_from_secs_f64(seconds).map_err(|_| invalid())
    }

    /// Verifies this [Config]uration, prior any I/O or propagation.
    pub fn validate(&self) -> Result<(), Error> {
        validate_grid(self.step_seconds, self.count)?;

        if self.retry_attempts == 0 {
            return Err(Error::InvalidParameter(
                "retry policy requires at least one attempt".to_string(),
            ));
        }
        if !self.retry_delay_seconds.is_finite() || self.retry_delay_seconds < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "invalid retry delay {}s",
                self.retry_delay_seconds
            )));
        }
        self.std_request_timeout()?;

        if !self.max_span_days.is_finite() || self.max_span_days <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "invalid validity span {} days",
                self.max_span_days
            )));
        }
        Ok(())
    }
}
