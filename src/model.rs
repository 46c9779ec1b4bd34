//! Core data models for the AR wildlife viewer: spatial value types,
//! interaction configuration, the animal catalog, and the UI-level scene
//! reducer.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Position + orientation in world space. Immutable value type produced by
/// the surface probe and carried by placed objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Scalar min/max multipliers relative to an object's creation-time scale.
/// Invariant: `0 < min <= 1 <= max`, enforced by the constructor; the clamp
/// itself is applied per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}

impl ScaleBounds {
    pub fn new(min: f32, max: f32) -> Self {
        let min = min.clamp(f32::EPSILON, 1.0);
        let max = max.max(1.0);
        Self { min, max }
    }

    /// Clamp a candidate scale componentwise into
    /// `[initial * min, initial * max]`.
    pub fn clamp_vec(&self, initial: Vec3, candidate: Vec3) -> Vec3 {
        Vec3::new(
            candidate.x.clamp(initial.x * self.min, initial.x * self.max),
            candidate.y.clamp(initial.y * self.min, initial.y * self.max),
            candidate.z.clamp(initial.z * self.min, initial.z * self.max),
        )
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.5, max: 3.0 }
    }
}

/// Gesture settings. The engine reads these every tick, so external edits
/// take effect immediately.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub enable_drag: bool,
    pub enable_rotation: bool,
    pub enable_scale: bool,
    /// Degrees of yaw per degree of two-contact angle delta.
    pub rotation_speed: f32,
    pub scale_bounds: ScaleBounds,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enable_drag: true,
            enable_rotation: true,
            enable_scale: true,
            rotation_speed: 0.5,
            scale_bounds: ScaleBounds::default(),
        }
    }
}

/// One catalog entry. `model_key` is the opaque reference to the externally
/// owned 3D asset; a missing key is a configuration error surfaced at
/// placement time, not a crash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub habitat: String,
    pub diet: String,
    pub characteristics: String,
    pub model_key: Option<String>,
    /// Horizontal half-extent of the body collider, metres.
    pub collider_radius: f32,
    /// Standing height of the body collider, metres.
    pub collider_height: f32,
}

impl ModelInfo {
    fn new(
        name: &str,
        habitat: &str,
        diet: &str,
        characteristics: &str,
        model_key: &str,
        collider_radius: f32,
        collider_height: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            habitat: habitat.to_string(),
            diet: diet.to_string(),
            characteristics: characteristics.to_string(),
            model_key: Some(model_key.to_string()),
            collider_radius,
            collider_height,
        }
    }
}

pub fn default_catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new(
            "Elephant",
            "Savanna and forest",
            "Grasses, bark, fruit",
            "Largest living land animal; herds are led by the oldest female.",
            "elephant.glb",
            1.4,
            3.0,
        ),
        ModelInfo::new(
            "Lion",
            "Grasslands and open woodland",
            "Large herbivores",
            "Lives in prides; males defend territory while females hunt.",
            "lion.glb",
            0.7,
            1.2,
        ),
        ModelInfo::new(
            "Orca",
            "All oceans, coastal and open water",
            "Fish, seals, squid",
            "Apex predator; hunts cooperatively in family pods.",
            "orca.glb",
            1.2,
            1.8,
        ),
        ModelInfo::new(
            "Penguin",
            "Antarctic coastline",
            "Krill and fish",
            "Flightless seabird; huddles in colonies to survive the cold.",
            "penguin.glb",
            0.3,
            0.8,
        ),
        ModelInfo::new(
            "Zebra",
            "Savanna",
            "Grasses",
            "Every individual's stripe pattern is unique.",
            "zebra.glb",
            0.7,
            1.4,
        ),
    ]
}

// ---------------- Reducer & Actions -----------------

/// UI-level scene state: the catalog, the current selection, whether an
/// object is currently placed, and info-panel visibility. Spatial state
/// lives in the engine (`state::session`), not here.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub models: Vec<ModelInfo>,
    pub selected: Option<usize>,
    pub placed: bool,
    pub show_info: bool,
}

impl SceneState {
    pub fn with_catalog(models: Vec<ModelInfo>) -> Self {
        Self {
            models,
            selected: None,
            placed: false,
            show_info: false,
        }
    }

    pub fn selected_model(&self) -> Option<&ModelInfo> {
        self.selected.and_then(|i| self.models.get(i))
    }
}

#[derive(Clone, Debug)]
pub enum SceneAction {
    Select(usize),
    ObjectPlaced,
    ObjectRemoved,
    SetShowInfo(bool),
}

impl Reducible for SceneState {
    type Action = SceneAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SceneAction::*;
        let mut new = (*self).clone();
        match action {
            Select(i) => {
                if i < new.models.len() {
                    new.selected = Some(i);
                }
            }
            ObjectPlaced => {
                new.placed = true;
            }
            ObjectRemoved => {
                new.placed = false;
                new.show_info = false;
            }
            SetShowInfo(show) => {
                new.show_info = show;
            }
        }
        Rc::new(new)
    }
}
