use anyhow::{anyhow, Result};
use buildings::{
    Building, BuildingId, BuildingType, BuildingsMobility, ExtWallsType, HybridBuildings,
    ModelConfig, Position,
};
use log::debug;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path, sync::Arc};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Separation at or below which loss is zero (meters).
    pub min_distance_m: Option<f64>,

    /// Average rooftop height (meters).
    pub rooftop_height_m: Option<f64>,

    /// Sub-model configuration.
    #[serde(default)]
    pub models: ModelConfig,

    #[serde(default)]
    pub buildings: Vec<BuildingSpec>,

    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildingSpec {
    pub id: u32,

    /// Lower corner "[x, y, z]".
    pub min: [f64; 3],

    /// Upper corner "[x, y, z]".
    pub max: [f64; 3],

    pub building_type: Option<BuildingType>,

    pub ext_walls_type: Option<ExtWallsType>,

    #[serde(default = "one")]
    pub floors: u16,

    /// Rooms per floor "[x, y]".
    #[serde(default = "one_by_one")]
    pub rooms: [u16; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,

    /// "[x, y, z]" where 'z' is meters above ground.
    pub position: [f64; 3],

    /// Keep the node outdoors even if a building contains it.
    #[serde(default)]
    pub outdoor: bool,
}

fn one() -> u16 {
    1
}

fn one_by_one() -> [u16; 2] {
    [1, 1]
}

/// A named endpoint placed against the scenario's buildings.
pub struct Node {
    pub name: String,
    pub mobility: BuildingsMobility,
}

impl Scenario {
    pub fn open(path: &Path) -> Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(rdr)?)
    }

    pub fn model(&self) -> Result<HybridBuildings> {
        let mut builder = HybridBuildings::builder().model_config(self.models);
        if let Some(meters) = self.min_distance_m {
            builder = builder.min_distance(meters);
        }
        builder = builder.rooftop_height(self.rooftop_height_m.unwrap_or(self.models.rooftop_height_m));
        Ok(builder.build()?)
    }

    pub fn buildings(&self) -> Result<Vec<Arc<Building>>> {
        self.buildings
            .iter()
            .map(|spec| {
                let mut builder = Building::builder()
                    .id(BuildingId(spec.id))
                    .bounds(Position::from(spec.min), Position::from(spec.max))
                    .floors(spec.floors)
                    .rooms(spec.rooms[0], spec.rooms[1]);
                if let Some(building_type) = spec.building_type {
                    builder = builder.building_type(building_type);
                }
                if let Some(ext_walls_type) = spec.ext_walls_type {
                    builder = builder.ext_walls_type(ext_walls_type);
                }
                Ok(Arc::new(builder.build()?))
            })
            .collect()
    }

    pub fn nodes(&self) -> Result<Vec<Node>> {
        let buildings = self.buildings()?;
        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .map(|spec| {
                let position = Position::from(spec.position);
                let mobility = if spec.outdoor {
                    BuildingsMobility::outdoor(position)
                } else {
                    BuildingsMobility::locate(position, &buildings)
                };
                debug!(
                    "node {}; {position:?}, indoor: {}",
                    spec.name,
                    mobility.is_indoor()
                );
                Node {
                    name: spec.name.clone(),
                    mobility,
                }
            })
            .collect();

        for (i, node) in nodes.iter().enumerate() {
            if nodes[..i].iter().any(|other| other.name == node.name) {
                return Err(anyhow!("duplicate node name '{}'", node.name));
            }
        }
        Ok(nodes)
    }
}

/// One office building with a far macro cell, a desk inside and a
/// porch beside it.
#[cfg(test)]
pub const TEST_SCENARIO: &str = r#"{
    "rooftop_height_m": 25.0,
    "models": { "frequency_hz": 900e6, "environment": "suburban" },
    "buildings": [
        {
            "id": 1,
            "min": [0, 0, 0],
            "max": [40, 40, 30],
            "building_type": "office",
            "ext_walls_type": "stone_blocks",
            "floors": 10,
            "rooms": [4, 4]
        }
    ],
    "nodes": [
        { "name": "enb", "position": [-1500, 20, 35] },
        { "name": "desk", "position": [5, 5, 13] },
        { "name": "porch", "position": [20, 0, 1.5], "outdoor": true }
    ]
}"#;

#[cfg(test)]
mod tests {
    use super::{Scenario, TEST_SCENARIO};
    use buildings::{Branch, Mobility, Placement};

    #[test]
    fn test_parse_and_place() {
        let scenario: Scenario = serde_json::from_str(TEST_SCENARIO).unwrap();
        let hybrid = scenario.model().unwrap();
        assert_eq!(hybrid.params().rooftop_height_m(), 25.0);
        assert_eq!(hybrid.params().min_distance_m(), 0.5);
        assert_eq!(hybrid.models().config().frequency_hz, 900e6);
        assert_eq!(hybrid.models().config().street_width_m, 20.0);

        let nodes = scenario.nodes().unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(!nodes[0].mobility.is_indoor());
        match nodes[1].mobility.placement() {
            Some(Placement::Indoor(indoor)) => {
                assert_eq!(indoor.floor, 5);
                assert_eq!((indoor.room_x, indoor.room_y), (1, 1));
            }
            other => panic!("expected indoor, got {other:?}"),
        }
        assert!(!nodes[2].mobility.is_indoor());

        let evaluation = hybrid.evaluate(&nodes[0].mobility, &nodes[1].mobility).unwrap();
        assert_eq!(evaluation.branch, Branch::OutdoorIndoorLongAboveRooftop);
        assert!(evaluation.loss_db > 0.0);
    }

    #[test]
    fn test_duplicate_names() {
        let scenario: Scenario = serde_json::from_str(
            r#"{ "nodes": [
                { "name": "a", "position": [0, 0, 1] },
                { "name": "a", "position": [1, 0, 1] }
            ] }"#,
        )
        .unwrap();
        assert!(scenario.nodes().is_err());
    }
}
