//! Message dispatch between a problems panel and the checker
//!
//! A `Session` owns everything a host keeps between checks: the scene, the
//! defect store, one cursor per object and the editor selection. Incoming
//! [`UiToChecker`] messages are handled in order; replies are queued as
//! [`CheckerToUi`] and drained by the caller.

use std::collections::HashMap;

use topology::{
    apply_selection, retain_in_range, MemoryDefectStore, Notice, ProblemCursor, SceneObject,
    WatertightChecker,
};
use tracing::{debug, info, warn};
use watertight_config::CheckerConfig;
use watertight_ipc::{CheckerToUi, ProblemKind, SceneFile, StepDirection, UiToChecker};

use crate::convert;
use crate::selection::EditorSelection;

pub struct Session {
    scene: SceneFile,
    checker: WatertightChecker,
    store: MemoryDefectStore,
    cursors: HashMap<String, ProblemCursor>,
    selection: EditorSelection,
    outbound: Vec<CheckerToUi>,
}

impl Session {
    pub fn new(scene: SceneFile, config: CheckerConfig) -> Self {
        Self {
            scene,
            checker: WatertightChecker::new(config),
            store: MemoryDefectStore::new(),
            cursors: HashMap::new(),
            selection: EditorSelection::new(),
            outbound: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn selection(&self) -> &EditorSelection {
        &self.selection
    }

    /// Take all queued replies, leaving the queue empty
    pub fn drain(&mut self) -> Vec<CheckerToUi> {
        std::mem::take(&mut self.outbound)
    }

    pub fn handle(&mut self, message: UiToChecker) {
        debug!("Handling {:?}", message);
        match message {
            UiToChecker::CheckWatertight { object_ids } => self.check(&object_ids),
            UiToChecker::SetSelectProblems { enabled } => {
                self.checker.config_mut().select_problems = enabled;
                self.info(format!(
                    "Select problems after check: {}",
                    if enabled { "on" } else { "off" }
                ));
            }
            UiToChecker::SelectProblems {
                object_id,
                category,
            } => self.select_problems(&object_id, category),
            UiToChecker::StepProblem {
                object_id,
                direction,
            } => self.step(&object_id, direction),
            UiToChecker::ResetCursor { object_id } => {
                if let Some(cursor) = self.cursors.get_mut(&object_id) {
                    cursor.reset();
                }
            }
        }
    }

    fn check(&mut self, object_ids: &[String]) {
        let mut objects: Vec<SceneObject> = Vec::new();
        if object_ids.is_empty() {
            objects.extend(self.scene.objects.iter().map(convert::scene_object));
        } else {
            for id in object_ids {
                match self.scene.object(id) {
                    Some(data) => objects.push(convert::scene_object(data)),
                    None => {
                        warn!("Check requested for unknown object {}", id);
                        self.info(format!("Unknown object: {}", id));
                    }
                }
            }
        }

        let result = self
            .checker
            .run(&objects, &mut self.store, Some(&mut self.selection));

        // Stored lists changed underneath every snapshot
        for cursor in self.cursors.values_mut() {
            cursor.reset();
        }

        for notice in &result.notices {
            let message = match notice {
                Notice::EmptyInput => self.checker.text().nothing_to_check(),
                // Non-mesh items are left out silently
                Notice::Skipped { .. } => continue,
                other => other.to_string(),
            };
            self.outbound.push(CheckerToUi::Info { message });
        }

        info!("Report has {} lines", result.lines.len());
        self.outbound.push(CheckerToUi::ReportUpdated {
            lines: result.lines,
            categories: result
                .categories
                .iter()
                .map(convert::problem_kind)
                .collect(),
        });
    }

    fn select_problems(&mut self, object_id: &str, kind: ProblemKind) {
        let mesh = match self.current_mesh(object_id) {
            Ok(mesh) => mesh,
            Err(message) => return self.info(message),
        };

        let cursor = self
            .cursors
            .entry(object_id.to_string())
            .or_insert_with(|| ProblemCursor::new(object_id));
        let elements = cursor.select(&self.store, convert::category(kind));

        if let Some(notice) = apply_selection(&mut self.selection, object_id, &mesh, &elements) {
            self.outbound.push(CheckerToUi::Info {
                message: notice.to_string(),
            });
        }

        self.outbound.push(CheckerToUi::ProblemsSelected {
            object_id: object_id.to_string(),
            category: kind,
            count: self.selection.count(object_id),
        });
    }

    fn step(&mut self, object_id: &str, direction: StepDirection) {
        let mesh = match self.current_mesh(object_id) {
            Ok(mesh) => mesh,
            Err(message) => return self.info(message),
        };
        let Some(cursor) = self.cursors.get_mut(object_id) else {
            self.info(topology::CursorError::NoActiveCategory.to_string());
            return;
        };

        let focused = match cursor.step(convert::direction(direction)) {
            Ok(focused) => focused,
            Err(e) => {
                self.info(e.to_string());
                return;
            }
        };

        let retained = retain_in_range(&mesh, &[focused.element]);
        if retained.dropped > 0 {
            let notice = Notice::StaleIndex {
                object_id: object_id.to_string(),
                dropped: retained.dropped,
            };
            self.info(notice.to_string());
            return;
        }
        apply_selection(&mut self.selection, object_id, &mesh, &retained.elements);

        self.outbound.push(CheckerToUi::ProblemFocused {
            object_id: object_id.to_string(),
            category: convert::problem_kind(focused.category),
            element: convert::element_ref(focused.element),
            position: focused.position,
            total: focused.total,
        });
    }

    /// Mesh as the scene holds it now, rebuilt on each call
    fn current_mesh(&self, object_id: &str) -> Result<topology::Mesh, String> {
        let data = self
            .scene
            .object(object_id)
            .ok_or_else(|| format!("Unknown object: {}", object_id))?;
        if !data.is_mesh() {
            return Err(format!("{} is not a mesh", data.name));
        }
        convert::build_mesh(data).map_err(|e| format!("{}: invalid mesh data: {}", data.name, e))
    }

    fn info(&mut self, message: String) {
        self.outbound.push(CheckerToUi::Info { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watertight_ipc::{parse_scene, ElementRef};

    const SCENE: &str = r#"{"objects":[
        {"id":"tri","name":"Tri",
         "vertices":[[0,0,0],[1,0,0],[0,1,0]],"faces":[[0,1,2]]},
        {"id":"cube","name":"Cube",
         "vertices":[[-1,-1,-1],[1,-1,-1],[1,1,-1],[-1,1,-1],
                     [-1,-1,1],[1,-1,1],[1,1,1],[-1,1,1]],
         "faces":[[0,3,2,1],[4,5,6,7],[0,1,5,4],[2,3,7,6],[1,2,6,5],[3,0,4,7]]},
        {"id":"lamp","name":"Lamp","object_type":"LIGHT"}
    ]}"#;

    fn session() -> Session {
        Session::new(parse_scene(SCENE).unwrap(), CheckerConfig::default())
    }

    fn check_all(session: &mut Session) -> Vec<CheckerToUi> {
        session.handle(UiToChecker::CheckWatertight { object_ids: vec![] });
        session.drain()
    }

    #[test]
    fn test_check_reports_and_selects() {
        let mut session = session();
        let replies = check_all(&mut session);

        // The lamp is left out without a notice
        assert_eq!(replies.len(), 1);
        let CheckerToUi::ReportUpdated { lines, categories } = &replies[0] else {
            panic!("expected report, got {:?}", replies[0]);
        };
        assert!(!lines.iter().any(|l| l.contains("Lamp")));
        assert_eq!(lines[0], "Tri: NOT WATERTIGHT");
        assert!(lines.contains(&"Cube: WATERTIGHT".to_string()));
        assert_eq!(categories, &vec![ProblemKind::Boundary]);

        assert_eq!(session.selection().count("tri"), 3);
        assert_eq!(session.selection().count("cube"), 0);
    }

    #[test]
    fn test_select_then_step() {
        let mut session = session();
        check_all(&mut session);

        session.handle(UiToChecker::SelectProblems {
            object_id: "tri".into(),
            category: ProblemKind::Boundary,
        });
        session.handle(UiToChecker::StepProblem {
            object_id: "tri".into(),
            direction: StepDirection::Previous,
        });
        let replies = session.drain();

        assert_eq!(
            replies[0],
            CheckerToUi::ProblemsSelected {
                object_id: "tri".into(),
                category: ProblemKind::Boundary,
                count: 3
            }
        );
        assert_eq!(
            replies[1],
            CheckerToUi::ProblemFocused {
                object_id: "tri".into(),
                category: ProblemKind::Boundary,
                element: ElementRef::Edge(2),
                position: 3,
                total: 3
            }
        );
        assert_eq!(session.selection().count("tri"), 1);
    }

    #[test]
    fn test_step_without_selection_is_informational() {
        let mut session = session();
        check_all(&mut session);
        session.handle(UiToChecker::StepProblem {
            object_id: "cube".into(),
            direction: StepDirection::Next,
        });
        assert_eq!(
            session.drain(),
            vec![CheckerToUi::Info {
                message: "No problem category selected".into()
            }]
        );
    }

    #[test]
    fn test_empty_category_step() {
        let mut session = session();
        check_all(&mut session);
        session.handle(UiToChecker::SelectProblems {
            object_id: "cube".into(),
            category: ProblemKind::Loose,
        });
        session.handle(UiToChecker::StepProblem {
            object_id: "cube".into(),
            direction: StepDirection::Next,
        });
        let replies = session.drain();
        assert_eq!(
            replies.last(),
            Some(&CheckerToUi::Info {
                message: "No LOOSE problems to step through".into()
            })
        );
    }

    #[test]
    fn test_select_problems_toggle() {
        let mut session = session();
        session.handle(UiToChecker::SetSelectProblems { enabled: false });
        check_all(&mut session);
        assert_eq!(session.selection().count("tri"), 0);
    }

    #[test]
    fn test_unknown_object() {
        let mut session = session();
        session.handle(UiToChecker::CheckWatertight {
            object_ids: vec!["ghost".into()],
        });
        let replies = session.drain();
        assert_eq!(
            replies[0],
            CheckerToUi::Info {
                message: "Unknown object: ghost".into()
            }
        );
        assert_eq!(
            replies[1],
            CheckerToUi::Info {
                message: "Nothing to check: no mesh objects".into()
            }
        );
    }
}
