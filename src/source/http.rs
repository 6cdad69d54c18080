use std::io::Read;

use ureq::{Agent, AgentBuilder};

use crate::{
    cfg::Config,
    error::{Error, FetchError},
    source::Fetch,
};

/// [Fetch] implementation over HTTP(s).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// Builds a new [HttpFetcher], using timeout and user agent from [Config].
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        let agent = AgentBuilder::new()
            .timeout(cfg.std_request_timeout()?)
            .user_agent(&cfg.user_agent)
            .build();
        Ok(Self { agent })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
        })?;

        // catalog dumps exceed the default body limit
        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(body)
    }
}
