//! Blocking HTTP requests via the curl crate (libcurl easy handle).
//!
//! Every function runs in the current thread; call from `spawn_blocking`
//! if used from async code.

mod error;

pub use error::FetchError;

use std::time::Duration;

const USER_AGENT: &str = concat!("linkcheck/", env!("CARGO_PKG_VERSION"));

/// Connect and total timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub total: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            total: Duration::from_secs(20),
        }
    }
}

/// Response of a GET: final status code and body decoded lossily as UTF-8.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u32,
    pub body: String,
}

impl Page {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

fn easy_for(url: &str, timeouts: Timeouts) -> Result<curl::easy::Easy, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(timeouts.connect)?;
    easy.timeout(timeouts.total)?;
    Ok(easy)
}

fn perform_collect(easy: &mut curl::easy::Easy) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    Ok(body)
}

/// Performs a GET, following redirects, and returns status plus body.
///
/// Non-2xx statuses are returned as a `Page`, not an error; only transport
/// failures (DNS, connect, timeout) are errors.
pub fn get_page(url: &str, timeouts: Timeouts) -> Result<Page, FetchError> {
    let mut easy = easy_for(url, timeouts)?;
    let body = perform_collect(&mut easy)?;
    let status = easy.response_code()?;
    Ok(Page {
        status,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// POSTs `payload` as JSON and parses the reply as JSON. Non-2xx is an error.
pub fn post_json(
    url: &str,
    payload: &serde_json::Value,
    timeouts: Timeouts,
) -> Result<serde_json::Value, FetchError> {
    let mut easy = easy_for(url, timeouts)?;
    let data = serde_json::to_vec(payload)?;
    easy.post(true)?;
    easy.post_fields_copy(&data)?;

    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/json")?;
    easy.http_headers(list)?;

    let body = perform_collect(&mut easy)?;
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(serde_json::from_slice(&body)?)
}
