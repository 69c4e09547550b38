//! Building model documents for the sleeve opening planner.
//!
//! This crate defines the element model that the planner operates on: walls
//! with their faces, duct and pipe runs, opening templates, and the documents
//! that group them. A [`Project`] holds one document per open model, the way
//! a coordination session holds the architectural model next to the
//! mechanical one.
//!
//! The model is purely declarative — no spatial indexes, just elements.
//! Intersection queries are described by the [`query`] module and answered
//! elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt;

use sleeve_geom::{Panel, Point3, Segment};

pub mod query;

/// Unique identifier of an element within its document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to an element, possibly through a link instance.
///
/// A wall that lives in a linked document is addressed by the pair of the
/// link instance id and the element id inside the link. Two references are
/// equal exactly when both components match, so the pair doubles as the
/// identity key when collapsing duplicate crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Link instance the element is seen through, `None` for host elements.
    pub link: Option<ElementId>,
    /// The element itself.
    pub element: ElementId,
}

impl ElementRef {
    /// Reference to an element of the host document.
    pub fn direct(element: ElementId) -> Self {
        Self {
            link: None,
            element,
        }
    }

    /// Reference to an element seen through a link instance.
    pub fn linked(link: ElementId, element: ElementId) -> Self {
        Self {
            link: Some(link),
            element,
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.link {
            Some(link) => write!(f, "{}/{}", link, self.element),
            None => write!(f, "{}", self.element),
        }
    }
}

/// A building level (storey) with its elevation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Unique identifier.
    pub id: ElementId,
    /// Level name (e.g. "Level 1").
    pub name: String,
    /// Elevation above the project origin.
    pub elevation: f64,
}

/// A wall, represented by the faces a ray can cross.
///
/// A basic wall contributes its two side faces; a layered wall contributes
/// one face per material boundary, all parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Unique identifier.
    pub id: ElementId,
    /// Level the wall is based on.
    pub level: ElementId,
    /// Faces of the wall, as bounded rectangles.
    pub panels: Vec<Panel>,
}

/// An instance of a linked document placed into the host model.
///
/// Only the elements relevant to opening placement are carried — the walls,
/// already transformed into host coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkInstance {
    /// Unique identifier of the link instance in the host document.
    pub id: ElementId,
    /// Title of the linked document.
    pub title: String,
    /// Walls of the linked document, in host coordinates.
    pub walls: Vec<Wall>,
}

/// Discipline of a mechanical run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunKind {
    /// Ventilation duct.
    Duct,
    /// Plumbing or heating pipe.
    Pipe,
}

/// A straight duct or pipe run with a circular section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Unique identifier.
    pub id: ElementId,
    /// Discipline of the run.
    pub kind: RunKind,
    /// Centerline start point.
    pub start: Point3,
    /// Centerline end point.
    pub end: Point3,
    /// Outer diameter of the section.
    pub diameter: f64,
}

impl Run {
    /// Centerline of the run.
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// A loadable family of opening instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningTemplate {
    /// Unique identifier of the family symbol.
    pub id: ElementId,
    /// Family name the template is looked up by.
    pub family: String,
    /// Whether the symbol is activated for placement.
    pub is_active: bool,
    /// Names of the instance parameters the family exposes.
    pub parameters: Vec<String>,
}

/// A 3D view, the spatial scope of intersection queries.
///
/// Elements listed as hidden in the view are excluded from ray tests, the
/// same way a user hides scaffolding before running a clash check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View3d {
    /// Unique identifier.
    pub id: ElementId,
    /// View name.
    pub name: String,
    /// View templates cannot host queries.
    pub is_template: bool,
    /// Ids of elements (walls or whole link instances) hidden in this view.
    #[serde(default)]
    pub hidden: Vec<ElementId>,
}

/// A single open model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document title, used to tell the disciplines apart.
    pub title: String,
    /// Building levels.
    #[serde(default)]
    pub levels: Vec<Level>,
    /// Walls of this document.
    #[serde(default)]
    pub walls: Vec<Wall>,
    /// Linked documents placed into this one.
    #[serde(default)]
    pub links: Vec<LinkInstance>,
    /// Duct and pipe runs.
    #[serde(default)]
    pub runs: Vec<Run>,
    /// Opening families loaded in this document.
    #[serde(default)]
    pub templates: Vec<OpeningTemplate>,
    /// 3D views.
    #[serde(default)]
    pub views: Vec<View3d>,
}

impl Document {
    /// Create an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            levels: Vec::new(),
            walls: Vec::new(),
            links: Vec::new(),
            runs: Vec::new(),
            templates: Vec::new(),
            views: Vec::new(),
        }
    }

    /// Look up a level by id.
    pub fn level(&self, id: ElementId) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Resolve a wall reference, following a link instance if present.
    pub fn wall(&self, target: &ElementRef) -> Option<&Wall> {
        match target.link {
            None => self.walls.iter().find(|w| w.id == target.element),
            Some(link) => self
                .links
                .iter()
                .find(|l| l.id == link)?
                .walls
                .iter()
                .find(|w| w.id == target.element),
        }
    }

    /// Look up an opening template by family name.
    pub fn template_by_family(&self, family: &str) -> Option<&OpeningTemplate> {
        self.templates.iter().find(|t| t.family == family)
    }

    /// The first 3D view that is not a view template.
    pub fn default_view(&self) -> Option<&View3d> {
        self.views.iter().find(|v| !v.is_template)
    }
}

/// The set of documents open in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// All open documents, host first by convention.
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Project {
    /// Create a project with no documents.
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
        }
    }

    /// The first document whose title contains `marker`.
    pub fn document_titled(&self, marker: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.title.contains(marker))
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeve_geom::Vec3;

    fn sample_project() -> Project {
        let mut arch = Document::new("Office - MEP coordination");
        arch.levels.push(Level {
            id: ElementId(10),
            name: "Level 1".to_string(),
            elevation: 0.0,
        });
        arch.walls.push(Wall {
            id: ElementId(20),
            level: ElementId(10),
            panels: vec![Panel::vertical(
                Point3::new(0.0, 2.0, 0.0),
                Point3::new(8.0, 2.0, 0.0),
                3.0,
            )],
        });
        arch.links.push(LinkInstance {
            id: ElementId(30),
            title: "Office - Structure".to_string(),
            walls: vec![Wall {
                id: ElementId(31),
                level: ElementId(10),
                panels: vec![Panel::vertical(
                    Point3::new(0.0, 6.0, 0.0),
                    Point3::new(8.0, 6.0, 0.0),
                    3.0,
                )],
            }],
        });
        arch.runs.push(Run {
            id: ElementId(40),
            kind: RunKind::Duct,
            start: Point3::new(1.0, 0.0, 1.5),
            end: Point3::new(1.0, 8.0, 1.5),
            diameter: 0.2,
        });
        arch.templates.push(OpeningTemplate {
            id: ElementId(50),
            family: "Sleeve Opening".to_string(),
            is_active: false,
            parameters: vec!["Width".to_string(), "Height".to_string()],
        });
        arch.views.push(View3d {
            id: ElementId(60),
            name: "{3D}".to_string(),
            is_template: false,
            hidden: Vec::new(),
        });

        Project {
            documents: vec![arch],
        }
    }

    #[test]
    fn roundtrip_project() {
        let project = sample_project();
        let json = project.to_json().expect("serialize");
        let restored = Project::from_json(&json).expect("deserialize");
        assert_eq!(project, restored);
        assert_eq!(restored.documents.len(), 1);
        assert_eq!(restored.documents[0].walls.len(), 1);
        assert_eq!(restored.documents[0].links[0].walls.len(), 1);
    }

    #[test]
    fn sparse_json_defaults() {
        let project = Project::from_json(r#"{"documents":[{"title":"Empty"}]}"#)
            .expect("deserialize");
        let doc = &project.documents[0];
        assert_eq!(doc.title, "Empty");
        assert!(doc.walls.is_empty());
        assert!(doc.runs.is_empty());
        assert!(doc.views.is_empty());
    }

    #[test]
    fn document_lookups() {
        let project = sample_project();
        let doc = &project.documents[0];

        assert_eq!(doc.level(ElementId(10)).unwrap().name, "Level 1");
        assert!(doc.level(ElementId(99)).is_none());

        let direct = doc.wall(&ElementRef::direct(ElementId(20))).unwrap();
        assert_eq!(direct.id, ElementId(20));
        let linked = doc
            .wall(&ElementRef::linked(ElementId(30), ElementId(31)))
            .unwrap();
        assert_eq!(linked.id, ElementId(31));
        assert!(doc.wall(&ElementRef::direct(ElementId(31))).is_none());
        assert!(doc
            .wall(&ElementRef::linked(ElementId(99), ElementId(31)))
            .is_none());

        assert!(doc.template_by_family("Sleeve Opening").is_some());
        assert!(doc.template_by_family("Round Duct Opening").is_none());
        assert_eq!(doc.default_view().unwrap().id, ElementId(60));
    }

    #[test]
    fn default_view_skips_templates() {
        let mut doc = Document::new("Views");
        doc.views.push(View3d {
            id: ElementId(1),
            name: "Working template".to_string(),
            is_template: true,
            hidden: Vec::new(),
        });
        assert!(doc.default_view().is_none());
        doc.views.push(View3d {
            id: ElementId(2),
            name: "{3D}".to_string(),
            is_template: false,
            hidden: Vec::new(),
        });
        assert_eq!(doc.default_view().unwrap().id, ElementId(2));
    }

    #[test]
    fn document_titled_matches_marker() {
        let project = sample_project();
        assert!(project.document_titled("MEP").is_some());
        assert!(project.document_titled("Structure").is_none());
    }

    #[test]
    fn element_ref_identity() {
        let a = ElementRef::linked(ElementId(1), ElementId(5));
        let b = ElementRef::linked(ElementId(1), ElementId(5));
        let c = ElementRef::linked(ElementId(2), ElementId(5));
        let d = ElementRef::direct(ElementId(5));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(format!("{a}"), "#1/#5");
        assert_eq!(format!("{d}"), "#5");
    }

    #[test]
    fn run_segment() {
        let run = Run {
            id: ElementId(1),
            kind: RunKind::Pipe,
            start: Point3::new(0.0, 0.0, 0.0),
            end: Point3::new(0.0, 8.0, 0.0),
            diameter: 0.1,
        };
        let seg = run.segment();
        assert!((seg.length() - 8.0).abs() < 1e-12);
        let (dir, len) = seg.axis(1e-6).unwrap();
        assert!((dir.as_ref() - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        assert!((len - 8.0).abs() < 1e-12);
    }
}
