//! Board — one managed collection plus its view state, behind a single writer.
//!
//! The collection and the selection are single-owner: nothing outside `Board`
//! mutates them. `Desk` wraps a board in an async mutex so every mutation on a
//! collection is serialized, and carries the cancellation token that pending
//! screening calls watch.

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::errors::AppError;
use crate::listing::aggregate::{board_stats, BoardStats, StatScope};
use crate::listing::flight::{FlightGuard, InFlight};
use crate::listing::predicate::Facets;
use crate::listing::view::{self, ListState, ViewPage};
use crate::models::{Lifecycle, Record};

/// What a board endpoint returns: the current page plus the view state around it.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot<R> {
    #[serde(flatten)]
    pub page: ViewPage<R>,
    pub query: String,
    pub facets: Facets,
    pub selected: Vec<String>,
    pub active_overlay: Option<String>,
    pub in_flight: Vec<String>,
}

#[derive(Debug)]
pub struct Board<R> {
    records: Vec<R>,
    view: ListState,
    in_flight: InFlight,
}

impl<R: Record> Board<R> {
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        Self {
            records,
            view: ListState::for_record::<R>(page_size),
            in_flight: InFlight::default(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn view_state(&self) -> &ListState {
        &self.view
    }

    pub fn view_state_mut(&mut self) -> &mut ListState {
        &mut self.view
    }

    /// Records matching the active query and facets, in collection order.
    pub fn filtered(&self) -> Vec<R> {
        view::filter(&self.records, &self.view.predicate::<R>())
    }

    pub fn current_page(&mut self) -> ViewPage<R> {
        self.view.view(&self.records)
    }

    pub fn snapshot(&mut self) -> BoardSnapshot<R> {
        let page = self.current_page();
        BoardSnapshot {
            page,
            query: self.view.query().to_string(),
            facets: self.view.facets().clone(),
            selected: self.view.selection().ids(),
            active_overlay: self.view.active_overlay().map(str::to_string),
            in_flight: self.in_flight.ids(),
        }
    }

    pub fn stats(&self, scope: StatScope) -> BoardStats {
        match scope {
            StatScope::Full => board_stats(&self.records, scope),
            StatScope::Filtered => board_stats(&self.filtered(), scope),
        }
    }

    /// Toggles the selection of one row. Unknown ids are rejected so the
    /// selection only ever holds ids that existed when they were picked.
    pub fn toggle_selected(&mut self, id: &str) -> Result<bool, AppError> {
        if self.get(id).is_none() {
            return Err(AppError::NotFound(format!("{} record {id} not found", R::BOARD)));
        }
        Ok(self.view.selection_mut().toggle_one(id))
    }

    pub fn toggle_all_visible(&mut self) {
        let visible = self.current_page().visible_ids();
        self.view.selection_mut().toggle_all_visible(&visible);
    }

    /// Replaces the status of `id` with a fresh record instance.
    ///
    /// Unknown ids are a no-op (`Ok(None)`); transitions the lifecycle forbids
    /// are rejected without touching the record, as are records being screened.
    pub fn set_status(&mut self, id: &str, status: R::Status) -> Result<Option<R>, AppError> {
        if self.in_flight.contains(id) {
            return Err(AppError::ScreeningInFlight(id.to_string()));
        }
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        let current = slot.status().clone();
        if !current.can_transition_to(&status) {
            return Err(AppError::InvalidTransition {
                id: id.to_string(),
                from: current.to_string(),
                to: status.to_string(),
            });
        }
        *slot = slot.with_status(status);
        info!(board = R::BOARD, id, from = %current, to = %slot.status(), "status changed");
        Ok(Some(slot.clone()))
    }

    /// Applies `status` to every id in `ids`, skipping unknown ids and
    /// forbidden transitions. Returns the updated records.
    pub fn set_status_many(&mut self, ids: &[String], status: &R::Status) -> Vec<R> {
        ids.iter()
            .filter_map(|id| self.set_status(id, status.clone()).ok().flatten())
            .collect()
    }

    /// Swaps in a new instance of an existing record. Returns false if `id` is gone.
    pub fn replace(&mut self, record: R) -> bool {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn insert(&mut self, record: R) {
        info!(board = R::BOARD, id = record.id(), "record added");
        self.records.push(record);
    }

    /// Removes a record and drops it from the selection and the in-flight set.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(index);
        self.view.selection_mut().remove(id);
        self.in_flight.clear(id);
        info!(board = R::BOARD, id, "record removed");
        Some(removed)
    }

    /// Marks `id` as in flight until the guard drops. `None` if it already was.
    pub fn begin_flight(&self, id: &str) -> Option<FlightGuard> {
        self.in_flight.begin(id)
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }
}

/// Single-writer handle around a board.
#[derive(Debug)]
pub struct Desk<R> {
    board: Mutex<Board<R>>,
    cancel: CancellationToken,
}

impl<R: Record> Desk<R> {
    pub fn new(records: Vec<R>, page_size: usize, cancel: CancellationToken) -> Self {
        Self {
            board: Mutex::new(Board::new(records, page_size)),
            cancel,
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Board<R>> {
        self.board.lock().await
    }

    /// Token cancelled when the service shuts down.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}
