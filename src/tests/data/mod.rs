use std::{
    cell::RefCell,
    collections::VecDeque,
    path::PathBuf,
    rc::Rc,
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use log::Level;

use crate::prelude::{
    Duration, Epoch, Fetch, FetchError, InertialState, OrbitModel, PropagationError, Recorder,
    StateVector, TleRecord, Unit, Vector3,
};

mod orbit;
pub use orbit::CircularOrbit;

pub const ISS_NAME: &str = "ISS (ZARYA)";

pub const ISS_LINE1: &str =
    "1 25544U 98067A   25340.55621404  .00016717  00000+0  30129-3 0  9990";

pub const ISS_LINE2: &str =
    "2 25544  51.6396 235.9181 0006764 266.3025 210.1504 15.49479342528251";

/// ISS element set, as served by the catalog (3LE)
pub fn iss_text() -> String {
    format!("{}\n{}\n{}\n", ISS_NAME, ISS_LINE1, ISS_LINE2)
}

pub fn iss_tle() -> TleRecord {
    TleRecord::parse(ISS_NAME, ISS_LINE1, ISS_LINE2)
        .unwrap_or_else(|e| panic!("invalid ISS test TLE: {}", e))
}

pub fn epoch(desc: &str) -> Epoch {
    Epoch::from_str(desc).unwrap_or_else(|e| panic!("bad epoch description \"{}\": {}", desc, e))
}

/// Builds a [StateVector] located at (lat, lon), sampled `index` minutes after `t0`.
pub fn state_at(t0: Epoch, index: usize, lat: f64, lon: f64) -> StateVector {
    StateVector {
        time: t0 + (index as f64) * Unit::Minute,
        eci: Vector3::new(7000.0, 0.0, 0.0),
        eci_velocity: Vector3::new(0.0, 7.5, 0.0),
        ecef: Vector3::new(7000.0, 0.0, 0.0),
        lat,
        lon,
        alt: 600.0,
    }
}

/// Replaces the checksum digit of a 69 columns element line.
pub fn with_checksum(line: &str) -> String {
    let body = &line[..68];
    format!("{}{}", body, crate::tle::checksum(body))
}

/// Writes a temporary file, unique to this test process.
pub fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("orbit-track-{}-{}", std::process::id(), name));
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
    path
}

/// [Fetch]er serving pre-recorded responses, then failing with HTTP 503.
#[derive(Default)]
pub struct MockFetcher {
    responses: RefCell<VecDeque<Result<String, FetchError>>>,
    urls: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new(responses: Vec<Result<String, FetchError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            urls: Default::default(),
        }
    }

    /// Fails every attempt
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.urls.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl Fetch for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.urls.borrow_mut().push(url.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(FetchError::Status(503)))
    }
}

/// [Recorder] keeping every message
#[derive(Default, Clone)]
pub struct CaptureRecorder {
    records: Rc<RefCell<Vec<(Level, String)>>>,
}

impl CaptureRecorder {
    pub fn count(&self, level: Level) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|(lvl, _)| *lvl == level)
            .count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.borrow().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl Recorder for CaptureRecorder {
    fn record(&self, message: &str, level: Level) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

/// Sleeper that only keeps track of the requested pauses
#[derive(Default, Clone)]
pub struct CaptureSleeper {
    pauses: Rc<RefCell<Vec<Duration>>>,
}

impl CaptureSleeper {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }

    pub fn sleeper(&self) -> impl Fn(Duration) + 'static {
        let pauses = self.pauses.clone();
        move |dt| pauses.borrow_mut().push(dt)
    }
}

/// [OrbitModel] counting its invocations, failing at a single instant.
pub struct CountingModel<M: OrbitModel> {
    inner: M,
    calls: AtomicUsize,
    fails_at: Option<Epoch>,
}

impl<M: OrbitModel> CountingModel<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fails_at: None,
        }
    }

    pub fn failing_at(mut self, t: Epoch) -> Self {
        self.fails_at = Some(t);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<M: OrbitModel> OrbitModel for CountingModel<M> {
    fn state_at(&self, t: Epoch) -> Result<InertialState, PropagationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fails_at == Some(t) {
            return Err(PropagationError::Model {
                t,
                cause: "decayed".to_string(),
            });
        }
        self.inner.state_at(t)
    }
}
