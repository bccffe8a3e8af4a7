//! Entity templates for the pool.
//!
//! Templates are authored in JSON. Every field except `name` has a default,
//! and the `killer` block takes the same keys as
//! [`KillerSettings`](crate::components::pooledkiller::KillerSettings):
//!
//! ```json
//! [
//!   {
//!     "name": "debris",
//!     "scale": 0.5,
//!     "children": ["spark"],
//!     "killer": { "trigger": "on_rest", "rest_delay": 1.0, "sequence": "shrink" }
//!   }
//! ]
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::pooledkiller::KillerSettings;

/// How to build one kind of pooled entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolTemplate {
    pub name: String,
    /// Uniform scale the entity is authored with.
    pub scale: f32,
    pub radius: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Names of child nodes hidden when the kill sequence starts.
    pub children: Vec<String>,
    /// Whether the entity gets a rigid body at all.
    pub has_body: bool,
    pub killer: KillerSettings,
}

impl Default for PoolTemplate {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            scale: 1.0,
            radius: 0.25,
            friction: 0.8,
            restitution: 0.3,
            children: Vec::new(),
            has_body: true,
            killer: KillerSettings::default(),
        }
    }
}

/// Templates available to the spawner, cycled in order.
#[derive(Resource, Debug, Clone, Default)]
pub struct TemplateLibrary {
    pub templates: Vec<PoolTemplate>,
}

impl TemplateLibrary {
    pub fn new(templates: Vec<PoolTemplate>) -> Self {
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Parse templates from a JSON string.
pub fn parse_templates(json: &str) -> Result<Vec<PoolTemplate>, String> {
    let templates: Vec<PoolTemplate> =
        serde_json::from_str(json).map_err(|e| format!("Invalid template JSON: {}", e))?;
    if templates.is_empty() {
        return Err("Template file defines no templates".to_string());
    }
    Ok(templates)
}

/// Load templates from a JSON file.
pub fn load_templates(path: impl AsRef<Path>) -> Result<Vec<PoolTemplate>, String> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read templates {:?}: {}", path, e))?;
    let templates = parse_templates(&json)?;
    info!("Loaded {} template(s) from {:?}", templates.len(), path);
    Ok(templates)
}
