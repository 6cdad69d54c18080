//! TLE retrieval: local files or remote catalog
use std::{fmt::Display, path::Path, str::FromStr};

use log::Level;

use crate::{
    cfg::Config,
    constants::{RETRY_ATTEMPTS, RETRY_DELAY_SECONDS},
    error::{Error, FetchError, FormatError},
    logger::{LogRecorder, Recorder},
    prelude::{Duration, Unit},
    tle::TleRecord,
};

mod http;
pub use http::HttpFetcher;

/// Anything able to retrieve a remote document.
/// Any failure is treated identically for retry purposes.
pub trait Fetch {
    /// Retrieve the document located at `url`.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Bounded retry with fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts
    pub attempts: usize,
    /// Delay between two consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: RETRY_ATTEMPTS,
            delay: RETRY_DELAY_SECONDS * Unit::Second,
        }
    }
}

/// Remote catalog request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// International (COSPAR) designator, like 1998-067A
    InternationalDesignator(String),
    /// NORAD catalog number, like 25544
    CatalogNumber(u32),
}

impl Display for CatalogQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InternationalDesignator(intdes) => write!(f, "{}", intdes),
            Self::CatalogNumber(catnr) => write!(f, "#{}", catnr),
        }
    }
}

fn is_international_designator(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 9 || bytes.len() > 11 {
        return false;
    }
    bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..8].iter().all(u8::is_ascii_digit)
        && bytes[8..].iter().all(u8::is_ascii_uppercase)
}

impl FromStr for CatalogQuery {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            let catnr = trimmed
                .parse::<u32>()
                .map_err(|e| Error::InvalidParameter(format!("catalog number: {}", e)))?;
            return Ok(Self::CatalogNumber(catnr));
        }
        let intdes = trimmed.to_ascii_uppercase();
        if is_international_designator(&intdes) {
            Ok(Self::InternationalDesignator(intdes))
        } else {
            Err(Error::InvalidParameter(format!(
                "\"{}\" is neither an international designator nor a catalog number",
                s
            )))
        }
    }
}

impl CatalogQuery {
    /// GP (TLE formatted) request URL, on said catalog server.
    pub fn url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        match self {
            Self::InternationalDesignator(intdes) => {
                format!("{}/NORAD/elements/gp.php?INTDES={}&FORMAT=TLE", base_url, intdes)
            },
            Self::CatalogNumber(catnr) => {
                format!("{}/NORAD/elements/gp.php?CATNR={}&FORMAT=TLE", base_url, catnr)
            },
        }
    }
}

/// [TleSource] resolves [TleRecord]s from a local file, or a remote catalog
/// reached through [Fetch]. Nothing is cached: each call re-resolves.
pub struct TleSource<F: Fetch> {
    fetcher: F,
    base_url: String,
    policy: RetryPolicy,
    recorder: Box<dyn Recorder>,
    sleeper: Box<dyn Fn(Duration)>,
}

fn thread_sleep(dt: Duration) {
    let seconds = dt.to_seconds().max(0.0);
    if let Ok(dt) = std::time::Duration::try_from_secs_f64(seconds) {
        std::thread::sleep(dt);
    }
}

impl TleSource<HttpFetcher> {
    /// Builds a [TleSource] reaching the catalog over HTTP, as described by [Config].
    pub fn http(cfg: &Config) -> Result<Self, Error> {
        Ok(Self::new(HttpFetcher::new(cfg)?, cfg))
    }
}

impl<F: Fetch> TleSource<F> {
    /// Builds a new [TleSource] from your [Fetch]er.
    pub fn new(fetcher: F, cfg: &Config) -> Self {
        Self {
            fetcher,
            base_url: cfg.catalog_url.clone(),
            policy: cfg.retry_policy(),
            recorder: Box::new(LogRecorder),
            sleeper: Box::new(thread_sleep),
        }
    }

    /// Copies and returns [TleSource] with updated [RetryPolicy]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Copies and returns [TleSource] reporting to this [Recorder]
    pub fn with_recorder(mut self, recorder: impl Recorder + 'static) -> Self {
        self.recorder = Box::new(recorder);
        self
    }

    /// Copies and returns [TleSource] pausing between attempts with this function
    pub fn with_sleeper(mut self, sleeper: impl Fn(Duration) + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// Resolves a [TleRecord].
    /// ## Inputs
    /// - designator: international designator or catalog number,
    ///   only used when no local file is provided.
    /// - local_file: TLE file (title line and both element lines).
    pub fn resolve(&self, designator: &str, local_file: Option<&Path>) -> Result<TleRecord, Error> {
        if let Some(path) = local_file {
            return self.read_file(path);
        }
        let query = CatalogQuery::from_str(designator)?;
        self.query(&query)
    }

    /// Reads a TLE file: exactly three non empty lines.
    pub fn read_file(&self, path: &Path) -> Result<TleRecord, Error> {
        self.recorder
            .record(&format!("reading TLE from {}", path.display()), Level::Info);

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();

        let record = match lines.as_slice() {
            [name, line1, line2] => TleRecord::parse(name, line1, line2)?,
            _ => {
                return Err(FormatError::LineCount {
                    expected: 3,
                    found: lines.len(),
                }
                .into())
            },
        };

        self.recorder
            .record(&format!("loaded TLE for {}", record.name()), Level::Info);
        Ok(record)
    }

    /// Queries the remote catalog.
    pub fn query(&self, query: &CatalogQuery) -> Result<TleRecord, Error> {
        self.recorder
            .record(&format!("fetching TLE for {}", query), Level::Info);

        let body = self.fetch_with_retry(&query.url(&self.base_url))?;
        let record = TleRecord::from_text(&body)?;

        self.recorder
            .record(&format!("found TLE for {}", record.name()), Level::Info);
        Ok(record)
    }

    /// [Recorder] this [TleSource] reports to
    pub(crate) fn recorder(&self) -> &dyn Recorder {
        self.recorder.as_ref()
    }

    /// Catalog server base URL
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieves `url`, retrying on any failure, as described by [RetryPolicy].
    pub(crate) fn fetch_with_retry(&self, url: &str) -> Result<String, Error> {
        let attempts = self.policy.attempts;
        if attempts == 0 {
            return Err(Error::InvalidParameter(
                "retry policy requires at least one attempt".to_string(),
            ));
        }

        let mut last = FetchError::Transport("no attempt".to_string());

        for attempt in 1..=attempts {
            if attempt > 1 {
                (self.sleeper)(self.policy.delay);
            }
            match self.fetcher.fetch(url) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    self.recorder.record(
                        &format!("{} (attempt {}/{}): {}", url, attempt, attempts, e),
                        Level::Warn,
                    );
                    last = e;
                },
            }
        }

        self.recorder.record(
            &format!("{}: giving up after {} attempts", url, attempts),
            Level::Error,
        );
        Err(Error::SourceUnavailable { attempts, last })
    }
}
