// HTTP URL resolver: follows shortener redirects over the network.
//
// A HEAD request is tried first since most shorteners answer it with a plain
// redirect. Some only redirect on a full page load; when the HEAD lands on a
// shortener again we follow up with a GET. Failures are absorbed: the best URL
// reached so far is returned and the failure is logged.

use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Method;
use tracing::{debug, warn};

use super::resolver::UrlResolver;
use super::with_scheme;
use crate::config::{DEFAULT_MAX_REDIRECTS, DEFAULT_RESOLVE_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::Result;
use crate::lexicon::RuleSet;

#[derive(Debug, Clone)]
pub struct HttpResolverSettings {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for HttpResolverSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_RESOLVE_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Production resolver backed by a blocking reqwest client.
pub struct HttpUrlResolver {
    client: Client,
    shortener: Regex,
}

impl HttpUrlResolver {
    pub fn new(rules: &RuleSet, settings: &HttpResolverSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .redirect(Policy::limited(settings.max_redirects))
            .build()?;

        Ok(Self {
            client,
            shortener: rules.patterns().shortener.clone(),
        })
    }

    /// Issue one request and report where it landed.
    ///
    /// `Err` carries the best URL known after the failure: the URL the error
    /// refers to when reqwest tracked one, otherwise the request URL.
    fn attempt(&self, method: Method, url: &str) -> std::result::Result<String, String> {
        match self.client.request(method.clone(), url).send() {
            Ok(response) => Ok(response.url().to_string()),
            Err(e) => {
                let best = e
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| url.to_string());
                warn!(
                    url = url,
                    method = %method,
                    best = best.as_str(),
                    timeout = e.is_timeout(),
                    redirect = e.is_redirect(),
                    error = %e,
                    "URL resolution failed, keeping best URL"
                );
                Err(best)
            }
        }
    }
}

impl UrlResolver for HttpUrlResolver {
    fn resolve(&self, url: &str) -> String {
        let start = with_scheme(url);

        let landed = match self.attempt(Method::HEAD, &start) {
            Ok(landed) => landed,
            Err(best) => return best,
        };

        if !self.shortener.is_match(&landed) {
            debug!(url = url, resolved = landed.as_str(), "Resolved via HEAD");
            return landed;
        }

        match self.attempt(Method::GET, &landed) {
            Ok(resolved) => {
                debug!(url = url, resolved = resolved.as_str(), "Resolved via GET");
                resolved
            }
            Err(best) => best,
        }
    }
}
