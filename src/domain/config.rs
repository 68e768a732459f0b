use serde::{Deserialize, Serialize};

use crate::core::math::Vector2;
use crate::domain::error::EngineError;
use crate::systems::boundary::{BoundaryAction, Bounds};

const DEFAULT_RESTITUTION: f64 = 0.8;

/// World setup handed over by the host page, usually as JSON.
///
/// ```json
/// {
///   "bounds": { "minX": 0, "minY": 0, "maxX": 800, "maxY": 600 },
///   "boundary": "bounce",
///   "restitution": 0.6,
///   "trailLength": 32,
///   "perfMetrics": false
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub bounds: Option<Bounds>,
    pub boundary: BoundaryAction,
    /// 0 disables trail recording.
    pub trail_length: usize,
    pub perf_metrics: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: None,
            boundary: BoundaryAction::None,
            trail_length: 0,
            perf_metrics: false,
        }
    }
}

impl WorldConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let root: ConfigRoot =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        Self::from_root(root)
    }

    pub fn to_json(&self) -> String {
        let restitution = match self.boundary {
            BoundaryAction::Bounce { restitution } => Some(restitution),
            _ => None,
        };
        let out = ConfigRoot {
            bounds: self.bounds.map(|b| ConfigBounds {
                min_x: b.min.x,
                min_y: b.min.y,
                max_x: b.max.x,
                max_y: b.max.y,
            }),
            boundary: self.boundary.name().to_string(),
            restitution,
            trail_length: self.trail_length,
            perf_metrics: self.perf_metrics,
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }

    fn from_root(root: ConfigRoot) -> Result<Self, EngineError> {
        let bounds = match root.bounds {
            None => None,
            Some(b) => Some(
                Bounds::new(Vector2::new(b.min_x, b.min_y), Vector2::new(b.max_x, b.max_y))
                    .map_err(|e| EngineError::InvalidConfig(e.to_string()))?,
            ),
        };

        let restitution = root.restitution.unwrap_or(DEFAULT_RESTITUTION);
        if !(0.0..=1.0).contains(&restitution) {
            return Err(EngineError::InvalidConfig(format!(
                "restitution must be within [0, 1], got {}",
                restitution
            )));
        }

        let boundary = BoundaryAction::from_name(&root.boundary, restitution)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        if boundary != BoundaryAction::None && bounds.is_none() {
            return Err(EngineError::InvalidConfig(format!(
                "boundary action '{}' requires bounds",
                root.boundary
            )));
        }

        Ok(Self {
            bounds,
            boundary,
            trail_length: root.trail_length,
            perf_metrics: root.perf_metrics,
        })
    }
}

fn default_boundary() -> String {
    "none".to_string()
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigRoot {
    #[serde(default)]
    bounds: Option<ConfigBounds>,
    #[serde(default = "default_boundary")]
    boundary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    restitution: Option<f64>,
    #[serde(default)]
    trail_length: usize,
    #[serde(default)]
    perf_metrics: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigBounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = WorldConfig::from_json("{}").unwrap();
        assert_eq!(cfg, WorldConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let cfg = WorldConfig::from_json(
            r#"{
                "bounds": { "minX": 0, "minY": 0, "maxX": 800, "maxY": 600 },
                "boundary": "bounce",
                "restitution": 0.5,
                "trailLength": 16,
                "perfMetrics": true
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.boundary, BoundaryAction::Bounce { restitution: 0.5 });
        assert_eq!(cfg.bounds.unwrap().max, Vector2::new(800.0, 600.0));
        assert_eq!(cfg.trail_length, 16);
        assert!(cfg.perf_metrics);
    }

    #[test]
    fn rejects_unknown_boundary_and_fields() {
        let err = WorldConfig::from_json(
            r#"{ "bounds": { "minX": 0, "minY": 0, "maxX": 1, "maxY": 1 }, "boundary": "teleport" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown boundary action"));

        assert!(WorldConfig::from_json(r#"{ "gravityScale": 2 }"#).is_err());
    }

    #[test]
    fn boundary_without_bounds_is_rejected() {
        let err = WorldConfig::from_json(r#"{ "boundary": "wrap" }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = WorldConfig::from_json(
            r#"{ "bounds": { "minX": 10, "minY": 0, "maxX": 0, "maxY": 5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn json_round_trip_keeps_boundary() {
        let cfg = WorldConfig::from_json(
            r#"{ "bounds": { "minX": 0, "minY": 0, "maxX": 4, "maxY": 4 }, "boundary": "die" }"#,
        )
        .unwrap();
        let again = WorldConfig::from_json(&cfg.to_json()).unwrap();
        assert_eq!(cfg, again);
    }
}
