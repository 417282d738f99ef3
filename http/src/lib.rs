#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
//! High-level, asynchronous API for fetching mailbox index documents
//! over HTTP, as text.
//!
//! The [`Client`] wraps a blocking [`ureq`] agent and runs every call
//! on the blocking pool of the selected async runtime, so that
//! several documents can be awaited concurrently.

mod error;

use tracing::{debug, trace};
pub use ureq;
use ureq::{
    config::Config,
    http::Uri,
    tls::{RootCerts, TlsConfig, TlsProvider},
    Agent,
};

#[doc(inline)]
pub use crate::error::{Error, Result};

#[cfg(any(
    all(feature = "tokio", feature = "async-std"),
    not(any(feature = "tokio", feature = "async-std"))
))]
compile_error!("Either feature `tokio` or `async-std` must be enabled for this crate.");

#[cfg(any(
    all(feature = "rustls", feature = "native-tls"),
    not(any(feature = "rustls", feature = "native-tls"))
))]
compile_error!("Either feature `rustls` or `native-tls` must be enabled for this crate.");

/// The HTTP client structure.
///
/// This structure wraps a HTTP agent, which is shared by all the
/// fetch functions. Cloning the client is cheap and clones share the
/// same connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    /// The HTTP agent used to perform calls.
    agent: Agent,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new HTTP client with sane defaults.
    pub fn new() -> Self {
        let tls = TlsConfig::builder()
            .root_certs(RootCerts::PlatformVerifier)
            .provider(
                #[cfg(feature = "native-tls")]
                TlsProvider::NativeTls,
                #[cfg(feature = "rustls")]
                TlsProvider::Rustls,
            );

        let config = Config::builder().tls_config(tls.build()).build();
        let agent = config.new_agent();

        Self { agent }
    }

    /// Fetches the document located at the given URI as text.
    ///
    /// Any non-successful HTTP status is reported as
    /// [`Error::FetchStatusError`].
    pub async fn fetch_text(&self, uri: &str) -> Result<String> {
        let uri: Uri = uri.parse()?;
        let agent = self.agent.clone();

        debug!("fetching {uri}");
        spawn_blocking(move || fetch_text_blocking(&agent, uri)).await?
    }
}

fn fetch_text_blocking(agent: &Agent, uri: Uri) -> Result<String> {
    let mut res = match agent.get(uri.to_string()).call() {
        Ok(res) => res,
        Err(ureq::Error::StatusCode(status)) => {
            return Err(Error::FetchStatusError(status, uri));
        }
        Err(err) => return Err(Error::FetchError(err, uri)),
    };

    let text = res
        .body_mut()
        .read_to_string()
        .map_err(|err| Error::ReadBodyError(err, uri.clone()))?;

    trace!("raw document from {uri}: {text}");
    Ok(text)
}

/// Spawns a blocking task using [`async_std`].
#[cfg(feature = "async-std")]
async fn spawn_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(async_std::task::spawn_blocking(f).await)
}

/// Spawns a blocking task using [`tokio`].
#[cfg(feature = "tokio")]
async fn spawn_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}

#[cfg(test)]
mod tests {
    use super::{Client, Error};

    #[test_log::test(tokio::test)]
    async fn invalid_uri() {
        let client = Client::new();
        let err = client.fetch_text("not a uri").await.unwrap_err();
        assert!(matches!(err, Error::UriError(_)));
        assert_eq!(err.status(), None);
    }

    #[test_log::test(tokio::test)]
    async fn unreachable_host() {
        let client = Client::new();
        let err = client
            .fetch_text("http://127.0.0.1:1/mail/index.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FetchError(..)));
    }
}
