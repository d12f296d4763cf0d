//! The state machine that follows the selected date
//!
//! Selecting a date is the only way to trigger a fetch. Every fetch is tagged with the selection
//! it was started for, and its result is dropped if another date has been selected in the meantime.

use chrono::NaiveDate;
use tokio::sync::{mpsc, watch};

use crate::history::{FetchState, HistoryClient};
use crate::traits::FeedSource;

/// The selected date, and what is known about it
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub state: FetchState,
}

/// See [`DateController::subscribe`]
pub type SnapshotReceiver = watch::Receiver<Snapshot>;

/// A finished fetch, tagged with the selection it belongs to
#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    date: NaiveDate,
    state: FetchState,
}

/// What [`DateController::process_next`] did with a finished fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Processed {
    /// The fetch belonged to the current selection, and its state is now the current one
    Applied,
    /// The fetch was for a date that is not selected anymore
    Discarded,
}

/// Owns the selected date and its [`FetchState`]
pub struct DateController<S> {
    client: HistoryClient<S>,
    current: Snapshot,
    generation: u64,

    outcome_sender: mpsc::UnboundedSender<FetchOutcome>,
    outcome_receiver: mpsc::UnboundedReceiver<FetchOutcome>,
    snapshot_sender: watch::Sender<Snapshot>,
}

impl<S> DateController<S>
where
    S: FeedSource + Send + Sync + 'static,
{
    /// Create a controller, and start fetching `initial_date` right away.
    ///
    /// This must be called from within a tokio runtime.
    pub fn new(client: HistoryClient<S>, initial_date: NaiveDate) -> Self {
        let current = Snapshot { date: initial_date, state: FetchState::Loading };
        let (outcome_sender, outcome_receiver) = mpsc::unbounded_channel();
        let (snapshot_sender, _) = watch::channel(current.clone());

        let controller = Self {
            client,
            current,
            generation: 0,
            outcome_sender,
            outcome_receiver,
            snapshot_sender,
        };
        controller.start_fetch();
        controller
    }

    /// Create a controller that starts on the current local date
    pub fn starting_today(client: HistoryClient<S>) -> Self {
        Self::new(client, crate::today())
    }

    pub fn date(&self) -> NaiveDate { self.current.date }
    pub fn state(&self) -> &FetchState { &self.current.state }
    pub fn snapshot(&self) -> &Snapshot { &self.current }

    /// Get notified every time the selected date or its state change
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.snapshot_sender.subscribe()
    }

    /// Select a date (possibly the same one again), and start fetching it
    ///
    /// The state goes back to [`FetchState::Loading`] immediately. Whatever fetch was still running is superseded.
    pub fn select_date(&mut self, date: NaiveDate) {
        log::debug!("Date {} selected", date);
        self.generation += 1;
        self.publish(Snapshot { date, state: FetchState::Loading });
        self.start_fetch();
    }

    fn start_fetch(&self) {
        let generation = self.generation;
        let date = self.current.date;
        let client = self.client.clone();
        let sender = self.outcome_sender.clone();

        tokio::spawn(async move {
            let state = client.fetch_all(date).await;
            // The receiver only goes away with the controller, in which case nobody cares anymore
            let _ = sender.send(FetchOutcome { generation, date, state });
        });
    }

    /// Wait for the next fetch to finish, and apply its result unless it is stale
    pub async fn process_next(&mut self) -> Processed {
        // `self` owns a sender, so the channel never closes while we wait
        let outcome = match self.outcome_receiver.recv().await {
            Some(outcome) => outcome,
            None => return Processed::Discarded,
        };
        self.apply(outcome)
    }

    /// Wait until the current selection is no longer loading
    pub async fn settle(&mut self) -> &FetchState {
        while self.current.state.is_loading() {
            self.process_next().await;
        }
        &self.current.state
    }

    fn apply(&mut self, outcome: FetchOutcome) -> Processed {
        if outcome.generation != self.generation || outcome.date != self.current.date {
            log::warn!("Discarding a stale result for {} ({} is now selected)", outcome.date, self.current.date);
            return Processed::Discarded;
        }

        if let FetchState::Error(msg) = &outcome.state {
            log::error!("Fetch for {} failed: {}", outcome.date, msg);
        }
        self.publish(Snapshot { date: outcome.date, state: outcome.state });
        Processed::Applied
    }

    fn publish(&mut self, snapshot: Snapshot) {
        self.current = snapshot;
        self.snapshot_sender.send_replace(self.current.clone());
    }
}
