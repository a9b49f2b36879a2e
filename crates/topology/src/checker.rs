//! Batch driver for watertight checks.
//!
//! One run analyzes a batch of scene objects in order: adjacency is rebuilt
//! per mesh, defects are classified, the store is refreshed and, when
//! enabled, problem elements are pushed into the host selection. Nothing
//! survives between runs except what the store holds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adjacency::AdjacencyIndex;
use crate::category::{CategorySet, ProblemCategory};
use crate::classify::{DefectClassifier, DefectSet};
use crate::error::Notice;
use crate::mesh::Mesh;
use crate::report::{EnglishText, ReportBuilder, ReportText};
use crate::selection::{apply_selection, SelectionSink};
use crate::store::DefectStore;
use watertight_config::CheckerConfig;

/// What a scene item carries
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Mesh(Mesh),
    /// Anything without polygon topology (lights, cameras, curves)
    Other { kind: String },
}

/// One item of a check batch
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: String,
    pub name: String,
    pub kind: ObjectKind,
}

impl SceneObject {
    pub fn mesh(id: impl Into<String>, name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ObjectKind::Mesh(mesh),
        }
    }

    pub fn other(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ObjectKind::Other { kind: kind.into() },
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            ObjectKind::Other { .. } => None,
        }
    }
}

/// Result for one analyzed mesh object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReport {
    pub object_id: String,
    pub name: String,
    pub defects: DefectSet,
    pub watertight: bool,
}

/// Result of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub objects: Vec<ObjectReport>,
    pub lines: Vec<String>,
    pub categories: CategorySet,
    pub notices: Vec<Notice>,
}

impl AnalysisResult {
    /// True when every analyzed object is watertight
    pub fn all_watertight(&self) -> bool {
        self.objects.iter().all(|o| o.watertight)
    }

    pub fn object(&self, object_id: &str) -> Option<&ObjectReport> {
        self.objects.iter().find(|o| o.object_id == object_id)
    }
}

/// Runs watertight checks over batches of objects
pub struct WatertightChecker {
    config: CheckerConfig,
    text: Box<dyn ReportText>,
}

impl WatertightChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            config,
            text: Box::new(EnglishText),
        }
    }

    /// Use host wording for report lines
    pub fn with_text(mut self, text: Box<dyn ReportText>) -> Self {
        self.text = text;
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CheckerConfig {
        &mut self.config
    }

    pub fn text(&self) -> &dyn ReportText {
        self.text.as_ref()
    }

    /// Classify one mesh with a fresh adjacency index
    pub fn analyze(&self, mesh: &Mesh) -> DefectSet {
        let adjacency = AdjacencyIndex::build(mesh);
        DefectClassifier::new(mesh, &adjacency, &self.config).classify()
    }

    /// Check a batch of objects.
    ///
    /// Store entries are rewritten for every analyzed mesh and cleared for
    /// skipped items and for objects missing from the batch.
    pub fn run(
        &self,
        objects: &[SceneObject],
        store: &mut dyn DefectStore,
        mut sink: Option<&mut dyn SelectionSink>,
    ) -> AnalysisResult {
        let mut result = AnalysisResult::default();
        let mut builder = ReportBuilder::new(self.text.as_ref());
        let mut analyzed: HashSet<&str> = HashSet::new();

        if !self.config.any_check_enabled() {
            warn!("All topology checks are disabled; every mesh will report watertight");
        }

        for object in objects {
            let Some(mesh) = object.as_mesh() else {
                debug!("Skipping non-mesh object {}", object.name);
                builder.skip(&object.name);
                store.clear_object(&object.id);
                result.notices.push(Notice::Skipped {
                    name: object.name.clone(),
                });
                continue;
            };

            let defects = self.analyze(mesh);
            builder.add(&object.name, &defects);

            store.clear_object(&object.id);
            for category in ProblemCategory::ALL {
                store.put(&object.id, category, &defects.elements(category));
            }

            let watertight = defects.is_watertight();
            if self.config.select_problems && !watertight {
                if let Some(sink) = sink.as_deref_mut() {
                    let notice = apply_selection(sink, &object.id, mesh, &defects.all_elements());
                    result.notices.extend(notice);
                }
            }

            analyzed.insert(object.id.as_str());
            result.objects.push(ObjectReport {
                object_id: object.id.clone(),
                name: object.name.clone(),
                defects,
                watertight,
            });
        }

        for stale in store.object_ids() {
            if !analyzed.contains(stale.as_str()) {
                debug!("Clearing stored problems of {}", stale);
                store.clear_object(&stale);
            }
        }

        if result.objects.is_empty() {
            info!("{}", self.text.nothing_to_check());
            result.notices.insert(0, Notice::EmptyInput);
        }

        let report = builder.finish();
        result.lines = report.lines;
        result.categories = report.categories;

        info!(
            "Checked {} objects, {} watertight",
            result.objects.len(),
            result.objects.iter().filter(|o| o.watertight).count()
        );

        result
    }
}

impl Default for WatertightChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}
