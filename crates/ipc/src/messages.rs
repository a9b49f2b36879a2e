//! Main message enums exchanged between a problems panel and the checker.

use serde::{Deserialize, Serialize};

use crate::types::{ElementRef, ProblemKind, StepDirection};

/// Messages from the checker host to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CheckerToUi {
    /// A check finished; full report text and the categories that fired
    ReportUpdated {
        lines: Vec<String>,
        categories: Vec<ProblemKind>,
    },

    /// Every problem of one category was selected on an object
    ProblemsSelected {
        object_id: String,
        category: ProblemKind,
        count: usize,
    },

    /// The cursor moved to a single problem
    ProblemFocused {
        object_id: String,
        category: ProblemKind,
        element: ElementRef,
        /// One-based
        position: usize,
        total: usize,
    },

    /// Informational notice (nothing to check, skipped items, empty category)
    Info { message: String },
}

/// Messages from the UI to the checker host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToChecker {
    /// Run a check; an empty list means every object in the scene
    CheckWatertight { object_ids: Vec<String> },

    /// Toggle pushing problems into the selection after a check
    SetSelectProblems { enabled: bool },

    /// Select all problems of a category and arm the cursor
    SelectProblems {
        object_id: String,
        category: ProblemKind,
    },

    /// Step the cursor of an object
    StepProblem {
        object_id: String,
        direction: StepDirection,
    },

    /// Return an object's cursor to idle
    ResetCursor { object_id: String },
}
