//! Per-frame snapshot value types.
//!
//! A [`WorldSnapshot`] is one immutable view of simulation state for a single
//! frame: created fresh by the simulation's `world()` query, consumed
//! immediately by the renderer, discarded after drawing. The viewer never
//! mutates a snapshot and never retains one across frames, so simulations are
//! free to hand out cheap clones of internal state.
//!
//! Positions are normalized to the unit square: `(0, 0)` is the top-left
//! corner of the surface, `(1, 1)` the bottom-right. The renderer scales them
//! by the logical surface size at draw time.

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

/// A mobile agent (drawn as an oriented fish silhouette).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Agent {
    /// Normalized horizontal position in `[0, 1]`.
    pub x: f32,
    /// Normalized vertical position in `[0, 1]`.
    pub y: f32,
    /// Orientation in radians. Zero is the simulation's authored "facing up"
    /// reference direction; the renderer applies the matching convention.
    pub rotation: f32,
}

/// A static food item (drawn as a filled disc).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Food {
    /// Normalized horizontal position in `[0, 1]`.
    pub x: f32,
    /// Normalized vertical position in `[0, 1]`.
    pub y: f32,
}

// ---------------------------------------------------------------------------
// WorldSnapshot
// ---------------------------------------------------------------------------

/// One immutable view of simulation state for a single frame.
///
/// Sequence order is draw order: later entries paint over earlier ones where
/// they overlap, and all agents are drawn before all foods. The viewer
/// imposes no additional z-ordering of its own.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldSnapshot {
    /// Mobile agents, in draw order.
    pub agents: Vec<Agent>,
    /// Food items, in draw order.
    pub foods: Vec<Food>,
}

impl WorldSnapshot {
    /// `true` if there is nothing to draw (a frame still clears the surface).
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.foods.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_empty() {
        let snapshot = WorldSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.agents.len(), 0);
        assert_eq!(snapshot.foods.len(), 0);
    }

    #[test]
    fn snapshot_with_entities_is_not_empty() {
        let snapshot = WorldSnapshot {
            agents: vec![Agent {
                x: 0.5,
                y: 0.5,
                rotation: 0.0,
            }],
            foods: Vec::new(),
        };
        assert!(!snapshot.is_empty());

        let snapshot = WorldSnapshot {
            agents: Vec::new(),
            foods: vec![Food { x: 0.1, y: 0.9 }],
        };
        assert!(!snapshot.is_empty());
    }

    // The JSON field names are the collaborator wire contract: a simulation
    // that serializes `agents`/`foods` entries with `x`/`y`/`rotation`
    // fields must deserialize into these types unchanged.
    #[test]
    fn snapshot_json_shape_matches_collaborator_contract() {
        let json = r#"{
            "agents": [{ "x": 0.25, "y": 0.75, "rotation": 1.5 }],
            "foods": [{ "x": 0.5, "y": 0.5 }]
        }"#;

        let snapshot: WorldSnapshot = serde_json::from_str(json).expect("contract JSON parses");
        assert_eq!(snapshot.agents.len(), 1);
        assert_eq!(snapshot.foods.len(), 1);
        assert!((snapshot.agents[0].rotation - 1.5).abs() < f32::EPSILON);

        let back = serde_json::to_value(&snapshot).expect("snapshot serializes");
        assert!(back["agents"][0]["rotation"].is_number());
        assert!(back["foods"][0]["x"].is_number());
    }
}
