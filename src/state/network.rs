use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use mlb_api::client::{ApiError, RecordsSource, StandingsApi};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves network requests one at a time, so at most one fetch is in flight.
pub struct NetworkWorker {
    client: StandingsApi,
    source: RecordsSource,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        client: StandingsApi,
        source: RecordsSource,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self { client, source, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let spinner = self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadStandings => self.handle_load_standings().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(spinner, result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_standings(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading standings from {}", self.source);
        let table = self.client.load_standings(&self.source).await?;
        info!(
            "loaded {} teams ({} records skipped)",
            table.team_count(),
            table.rejected.len()
        );
        Ok(NetworkResponse::StandingsLoaded { table })
    }

    async fn start_loading_animation(&self) -> JoinHandle<()> {
        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            interval.tick().await;
            loop {
                interval.tick().await;
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                if responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        })
    }

    /// The spinner task is finished before the final state goes out, so no
    /// spinner frame can follow it.
    async fn stop_loading_animation(&self, spinner: JoinHandle<()>, is_ok: bool) {
        spinner.abort();
        let _ = spinner.await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    async fn final_response(source: RecordsSource) -> NetworkResponse {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = NetworkWorker::new(StandingsApi::new(), source, req_rx, resp_tx);
        let task = tokio::spawn(worker.run());

        req_tx.send(NetworkRequest::LoadStandings).await.unwrap();
        let response = loop {
            match resp_rx.recv().await.expect("worker should answer") {
                NetworkResponse::LoadingStateChanged { .. } => continue,
                other => break other,
            }
        };
        task.abort();
        response
    }

    #[tokio::test]
    async fn failed_load_produces_an_error_and_no_table() {
        let source = RecordsSource::File(PathBuf::from("/nonexistent/mlbstand/records.json"));
        match final_response(source).await {
            NetworkResponse::Error { message } => {
                assert!(message.contains("/nonexistent/mlbstand/records.json"), "{message}")
            }
            other => panic!("expected an error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_load_produces_the_table() {
        let path = std::env::temp_dir()
            .join(format!("mlbstand-worker-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"team":"Braves","league":"NL","division":"East","wins":90,"losses":72}]"#,
        )
        .unwrap();

        let response = final_response(RecordsSource::File(path.clone())).await;
        std::fs::remove_file(&path).ok();

        match response {
            NetworkResponse::StandingsLoaded { table } => assert_eq!(table.team_count(), 1),
            other => panic!("expected standings, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn final_loading_state_is_not_followed_by_spinner_frames() {
        let (_req_tx, req_rx) = mpsc::channel(1);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = NetworkWorker::new(
            StandingsApi::new(),
            RecordsSource::default(),
            req_rx,
            resp_tx,
        );

        let spinner = worker.start_loading_animation().await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        worker.stop_loading_animation(spinner, false).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let mut states = Vec::new();
        while let Ok(NetworkResponse::LoadingStateChanged { loading_state }) = resp_rx.try_recv() {
            states.push(loading_state);
        }

        assert!(states.len() > 2, "spinner should have ticked: {states:?}");
        let last = states.last().expect("at least one state");
        assert!(!last.is_loading);
        assert_eq!(last.spinner_char, ERROR_CHAR);
        assert!(states[..states.len() - 1].iter().all(|s| s.is_loading));
    }
}
