//! Step-through navigation over one category of problems.
//!
//! A cursor belongs to one object. Selecting a category snapshots the stored
//! list; stepping walks the snapshot circularly. Selecting again (any
//! category) restarts from the unset position.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::ProblemCategory;
use crate::error::CursorError;
use crate::mesh::ProblemElement;
use crate::store::DefectStore;

/// Direction of a cursor step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepDirection {
    Next,
    Previous,
}

/// Where a cursor stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Idle,
    CategorySelected { category: ProblemCategory },
    Focused { category: ProblemCategory, index: usize },
}

/// Element under the cursor after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusedProblem {
    pub category: ProblemCategory,
    pub element: ProblemElement,
    /// One-based position in the category
    pub position: usize,
    pub total: usize,
}

/// Per-object problem cursor
#[derive(Debug, Clone)]
pub struct ProblemCursor {
    object_id: String,
    state: CursorState,
    elements: Vec<ProblemElement>,
}

impl ProblemCursor {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            state: CursorState::Idle,
            elements: Vec::new(),
        }
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn active_category(&self) -> Option<ProblemCategory> {
        match self.state {
            CursorState::Idle => None,
            CursorState::CategorySelected { category } | CursorState::Focused { category, .. } => {
                Some(category)
            }
        }
    }

    /// Size of the current snapshot
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Make `category` active and return its stored elements.
    ///
    /// An absent entry yields an empty list. The step index is cleared.
    pub fn select(
        &mut self,
        store: &dyn DefectStore,
        category: ProblemCategory,
    ) -> Vec<ProblemElement> {
        self.elements = store.get(&self.object_id, category);
        self.state = CursorState::CategorySelected { category };
        debug!(
            "Cursor on {} selected {} ({} elements)",
            self.object_id,
            category,
            self.elements.len()
        );
        self.elements.clone()
    }

    /// Move to the next or previous element, wrapping at either end.
    ///
    /// From the unset position, `Next` lands on the first element and
    /// `Previous` on the last. Errors leave the cursor untouched.
    pub fn step(&mut self, direction: StepDirection) -> Result<FocusedProblem, CursorError> {
        let (category, current) = match self.state {
            CursorState::Idle => return Err(CursorError::NoActiveCategory),
            CursorState::CategorySelected { category } => (category, None),
            CursorState::Focused { category, index } => (category, Some(index)),
        };

        let total = self.elements.len();
        if total == 0 {
            return Err(CursorError::EmptyCategory(category));
        }

        let index = match (current, direction) {
            (None, StepDirection::Next) => 0,
            (None, StepDirection::Previous) => total - 1,
            (Some(i), StepDirection::Next) => (i + 1) % total,
            (Some(i), StepDirection::Previous) => (i + total - 1) % total,
        };
        self.state = CursorState::Focused { category, index };

        Ok(FocusedProblem {
            category,
            element: self.elements[index],
            position: index + 1,
            total,
        })
    }

    /// Back to idle
    pub fn reset(&mut self) {
        self.state = CursorState::Idle;
        self.elements.clear();
    }
}
