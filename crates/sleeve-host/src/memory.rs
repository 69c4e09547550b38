//! In-memory placement host.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use sleeve_model::{Document, ElementId, OpeningTemplate};
use sleeve_plan::PlacementInstruction;

use crate::error::{HostError, Result};
use crate::{Instance, PlacementHost, StructuralKind};

/// A placement host backed by plain memory.
///
/// Holds a snapshot of the mechanical document's opening templates plus
/// every instance placed so far. Transactions checkpoint the whole host
/// and restore it on failure, so a failed pass leaves state identical to
/// the starting one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHost {
    templates: HashMap<ElementId, OpeningTemplate>,
    instances: Vec<Instance>,
    next_id: u64,
}

impl MemoryHost {
    /// Host with the given templates loaded and nothing placed.
    pub fn new(templates: impl IntoIterator<Item = OpeningTemplate>) -> Self {
        let templates: HashMap<ElementId, OpeningTemplate> =
            templates.into_iter().map(|t| (t.id, t)).collect();
        let next_id = templates.keys().map(|id| id.0 + 1).max().unwrap_or(1);
        Self {
            templates,
            instances: Vec::new(),
            next_id,
        }
    }

    /// Host mirroring the templates of a document.
    pub fn from_document(doc: &Document) -> Self {
        Self::new(doc.templates.iter().cloned())
    }

    /// All placed instances, in placement order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Look up a template by id.
    pub fn template(&self, id: ElementId) -> Option<&OpeningTemplate> {
        self.templates.get(&id)
    }
}

impl PlacementHost for MemoryHost {
    fn activate_template(&mut self, template: ElementId) -> Result<()> {
        let entry = self
            .templates
            .get_mut(&template)
            .ok_or(HostError::TemplateNotFound(template))?;
        if !entry.is_active {
            debug!("activating template '{}'", entry.family);
            entry.is_active = true;
        }
        Ok(())
    }

    fn create_instance(
        &mut self,
        instruction: &PlacementInstruction,
        structural: StructuralKind,
    ) -> Result<ElementId> {
        let template = self
            .templates
            .get(&instruction.template)
            .ok_or(HostError::TemplateNotFound(instruction.template))?;
        if !template.is_active {
            return Err(HostError::InactiveTemplate {
                family: template.family.clone(),
            });
        }

        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.instances.push(Instance {
            id,
            template: instruction.template,
            wall: instruction.wall,
            level: instruction.level,
            location: instruction.location,
            structural,
            parameters: HashMap::new(),
        });
        Ok(id)
    }

    fn set_parameter(&mut self, instance: ElementId, name: &str, value: f64) -> Result<()> {
        let entry = self
            .instances
            .iter_mut()
            .find(|i| i.id == instance)
            .ok_or(HostError::InstanceNotFound(instance))?;
        let template = self
            .templates
            .get(&entry.template)
            .ok_or(HostError::TemplateNotFound(entry.template))?;
        if !template.parameters.iter().any(|p| p == name) {
            return Err(HostError::MissingParameter {
                family: template.family.clone(),
                name: name.to_string(),
            });
        }
        entry.parameters.insert(name.to_string(), value);
        Ok(())
    }

    fn transaction<T, E, F>(&mut self, name: &str, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
    {
        let checkpoint = self.clone();
        debug!("transaction '{name}' started");
        match f(self) {
            Ok(value) => {
                debug!("transaction '{name}' committed");
                Ok(value)
            }
            Err(err) => {
                *self = checkpoint;
                warn!("transaction '{name}' rolled back");
                Err(err)
            }
        }
    }
}
