use crate::state::messages::{FetchKind, NetworkRequest, NetworkResponse};
use log::{debug, error};
use scoreline_api::{ApiError, League, ScoresApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Runs every fetch on its own task so a slow summary never holds up the
/// next scoreboard tick.
pub struct NetworkWorker {
    client: ScoresApi,
    league: League,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        client: ScoresApi,
        league: League,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            league,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let client = self.client.clone();
            let league = self.league;
            let responses = self.responses.clone();
            let in_flight = self.in_flight.clone();

            let pending = in_flight.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("{} request #{} started ({pending} in flight)", request.kind(), request.generation());

            tokio::spawn(async move {
                let response = handle_request(&client, &league, request).await;
                in_flight.fetch_sub(1, Ordering::Relaxed);
                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
        debug!("network worker shutting down");
    }
}

pub async fn handle_request(client: &ScoresApi, league: &League, request: NetworkRequest) -> NetworkResponse {
    let kind = request.kind();
    match request {
        NetworkRequest::ResolveDates { generation } => match client.fetch_calendar_dates(league).await {
            Ok(dates) => NetworkResponse::DatesResolved { dates, generation },
            Err(e) => failed(kind, generation, e),
        },
        NetworkRequest::FetchEvents { date, generation } => match client.fetch_events(league, &date).await {
            Ok(scoreboard) => NetworkResponse::EventsLoaded { scoreboard, generation },
            Err(e) => failed(kind, generation, e),
        },
        NetworkRequest::FetchDetail { event_id, generation } => {
            match client.fetch_event_detail(league, &event_id).await {
                Ok(detail) => NetworkResponse::DetailLoaded { detail, generation },
                Err(e) => failed(kind, generation, e),
            }
        }
        NetworkRequest::FetchScorecard { event_id, player_id, generation } => {
            match client.fetch_scorecard(league, &event_id, &player_id).await {
                Ok(scorecard) => NetworkResponse::ScorecardLoaded { scorecard, generation },
                Err(e) => failed(kind, generation, e),
            }
        }
    }
}

fn failed(kind: FetchKind, generation: u64, err: ApiError) -> NetworkResponse {
    NetworkResponse::Error {
        kind,
        generation,
        message: err.to_string(),
    }
}
