use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use anyhow::Result;
use reqwest::blocking::Client;

use crate::api::{self, BestXiRequest, BestXiResponse};
use crate::http_client::http_client;
use crate::state::{Delta, ProviderCommand};

/// Where the match list and lineups come from.
pub trait LineupSource {
    fn matches(&self) -> Result<Vec<String>>;
    fn best_xi(&self, match_index: usize, request: &BestXiRequest) -> Result<BestXiResponse>;
}

pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: api::normalize_base_url(base_url),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(http_client()?.clone(), &api::api_base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl LineupSource for HttpSource {
    fn matches(&self) -> Result<Vec<String>> {
        api::fetch_matches_from(&self.client, &self.base_url)
    }

    fn best_xi(&self, match_index: usize, request: &BestXiRequest) -> Result<BestXiResponse> {
        api::fetch_best_xi_from(&self.client, &self.base_url, match_index, request)
    }
}

/// Serves commands one at a time until the command channel closes or the
/// UI stops listening.
pub fn spawn_provider<S>(
    source: S,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()>
where
    S: LineupSource + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            if tx.send(handle_command(&source, cmd)).is_err() {
                break;
            }
        }
    })
}

pub fn handle_command<S: LineupSource + ?Sized>(source: &S, cmd: ProviderCommand) -> Delta {
    match cmd {
        ProviderCommand::FetchMatches => match source.matches() {
            Ok(matches) => Delta::SetMatches(matches),
            Err(err) => Delta::MatchesFailed(format!("{err:#}")),
        },
        ProviderCommand::FetchBestXi {
            match_index,
            request,
        } => match source.best_xi(match_index, &request) {
            Ok(response) => Delta::SetBestXi(response),
            Err(err) => Delta::BestXiFailed(format!("{err:#}")),
        },
    }
}
