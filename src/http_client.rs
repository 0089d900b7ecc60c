use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| build_client(request_timeout()))
}

pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    // reqwest's blocking client defaults to 30s; a missing timeout means wait forever.
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}

fn request_timeout() -> Option<Duration> {
    timeout_from(std::env::var("BEST_XI_TIMEOUT_SECS").ok().as_deref())
}

/// Zero, unset or unparsable means no timeout.
fn timeout_from(raw: Option<&str>) -> Option<Duration> {
    raw.and_then(|val| val.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
