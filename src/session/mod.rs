//! Aggregation session: serializes concurrent refreshes so the published
//! view always reflects the most recently issued request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::budget::{AggregationRequest, AggregationResult, BudgetAggregator};

/// What the UI should currently show for the budget panel.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetView {
    Idle,
    Pending,
    Settled(AggregationResult),
}

impl BudgetView {
    pub fn is_pending(&self) -> bool {
        matches!(self, BudgetView::Pending)
    }
}

/// Owns the aggregator and the shared view. Each refresh takes a ticket;
/// only the holder of the latest ticket may publish, so a slow run that
/// settles after a newer one started is dropped silently.
pub struct AggregationSession {
    aggregator: BudgetAggregator,
    issued: AtomicU64,
    view: Mutex<BudgetView>,
}

impl AggregationSession {
    pub fn new(aggregator: BudgetAggregator) -> Self {
        Self {
            aggregator,
            issued: AtomicU64::new(0),
            view: Mutex::new(BudgetView::Idle),
        }
    }

    pub fn aggregator(&self) -> &BudgetAggregator {
        &self.aggregator
    }

    pub fn view(&self) -> BudgetView {
        self.view.lock().expect("session view mutex poisoned").clone()
    }

    /// Writes `view` only while `ticket` is still the latest issued. The
    /// ticket check happens under the view lock, so a stale run can never
    /// overwrite a newer run's publication.
    fn publish(&self, ticket: u64, view: BudgetView) -> bool {
        let mut current = self.view.lock().expect("session view mutex poisoned");
        if self.issued.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *current = view;
        true
    }

    /// Runs one aggregation. Returns the result when this refresh is still
    /// the latest at settle time, `None` when a newer refresh superseded it.
    pub async fn refresh(&self, request: &AggregationRequest) -> Option<AggregationResult> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(ticket, BudgetView::Pending);

        let result = self.aggregator.aggregate(request).await;

        if self.publish(ticket, BudgetView::Settled(result.clone())) {
            Some(result)
        } else {
            tracing::debug!(ticket, "discarding stale aggregation result");
            None
        }
    }
}
