//! Report assembly
//!
//! Turns per-object defect sets into indented report lines plus the union of
//! categories that fired during the run. Wording comes from a [`ReportText`].

mod text;

use serde::{Deserialize, Serialize};

pub use text::{EnglishText, ReportText};

use crate::category::{CategorySet, ProblemCategory};
use crate::classify::DefectSet;
use crate::constants::{DEFECT_INDENT, HINT_INDENT};

/// Finished report of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub lines: Vec<String>,
    pub categories: CategorySet,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn into_parts(self) -> (Vec<String>, CategorySet) {
        (self.lines, self.categories)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Accumulates report lines across the objects of one run
pub struct ReportBuilder<'t> {
    text: &'t dyn ReportText,
    lines: Vec<String>,
    categories: CategorySet,
}

impl<'t> ReportBuilder<'t> {
    pub fn new(text: &'t dyn ReportText) -> Self {
        Self {
            text,
            lines: Vec::new(),
            categories: CategorySet::new(),
        }
    }

    /// Append one analyzed object
    pub fn add(&mut self, object_name: &str, defects: &DefectSet) {
        self.lines
            .push(self.text.status(object_name, defects.is_watertight()));

        for category in ProblemCategory::ALL {
            if !defects.has(category) {
                continue;
            }
            self.categories.insert(category);
            self.lines.push(format!(
                "{}{}",
                DEFECT_INDENT,
                self.text.defect_line(category, defects)
            ));
            self.lines.extend(
                self.text
                    .remedies(category)
                    .into_iter()
                    .map(|hint| format!("{}{}", HINT_INDENT, hint)),
            );
        }
    }

    /// Leave a non-mesh item out of the report
    pub fn skip(&mut self, object_name: &str) {
        tracing::trace!("Report skips {}", object_name);
    }

    pub fn finish(self) -> Report {
        Report {
            lines: self.lines,
            categories: self.categories,
        }
    }

    /// Report for a single object
    pub fn single(text: &'t dyn ReportText, object_name: &str, defects: &DefectSet) -> Report {
        let mut builder = Self::new(text);
        builder.add(object_name, defects);
        builder.finish()
    }
}
