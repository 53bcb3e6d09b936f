use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interaction::TrendlineState;

/// Handle returned by `subscribe_state`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverId(u64);

impl ObserverId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

pub(super) type StateObserver = Box<dyn FnMut(&TrendlineState)>;

#[derive(Default)]
pub(super) struct StateObservers {
    next_id: u64,
    entries: Vec<(ObserverId, StateObserver)>,
}

impl StateObservers {
    pub(super) fn subscribe(&mut self, observer: StateObserver) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(super) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(super) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Calls every observer, in subscription order, with the same snapshot.
    pub(super) fn notify(&mut self, state: &TrendlineState) {
        for (_, observer) in &mut self.entries {
            observer(state);
        }
    }
}

impl fmt::Debug for StateObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateObservers")
            .field("count", &self.entries.len())
            .finish()
    }
}
