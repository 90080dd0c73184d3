//! The `Record` trait — one row of a managed list.
//!
//! Each board owns a closed struct (`Application`, `Job`, `ExamResult`) rather than
//! a dynamic map. Search and facet lookups go through `field`, which also serves
//! derived values (an exam's `score_range`, an application's `job_title`).

use std::borrow::Cow;
use std::fmt::{Debug, Display};

use serde::{de::DeserializeOwned, Serialize};

/// Status values that follow a small state machine.
pub trait Lifecycle: Clone + PartialEq + Debug + Display {
    /// Whether `self -> next` is an allowed transition.
    /// Staying in the same state is always allowed.
    fn can_transition_to(&self, next: &Self) -> bool;

    fn is_terminal(&self) -> bool;
}

pub trait Record: Clone + Debug + Serialize + Send + Sync + 'static {
    type Status: Lifecycle + Serialize + DeserializeOwned + Send + Sync;

    /// Board name, used in logs and export file names.
    const BOARD: &'static str;

    /// Every name `field` answers to. Facet keys outside this list are ignored.
    const FIELDS: &'static [&'static str];

    /// Fields matched by the free-text query.
    const SEARCHABLE: &'static [&'static str];

    /// Field grouped by the board's stat cards.
    const GROUP_FIELD: &'static str = "status";

    fn id(&self) -> &str;

    /// Scalar value of a named field, `None` when unknown or unset.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;

    fn status(&self) -> &Self::Status;

    /// Returns a new instance with only the status replaced.
    fn with_status(&self, status: Self::Status) -> Self;
}
