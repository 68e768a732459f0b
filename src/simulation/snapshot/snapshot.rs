use serde::Serialize;

use crate::domain::entity::{Body, EntityId};

use super::WorldCore;

/// Draw-ready state of one body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Rigid bodies only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

/// Everything a renderer needs for one frame, in id order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub frame: u64,
    pub entities: Vec<EntitySnapshot>,
}

pub(super) fn snapshot<T: Body>(world: &WorldCore<T>) -> WorldSnapshot {
    let entities = world
        .bodies
        .iter()
        .map(|body| {
            let pos = body.position();
            let vel = body.velocity();
            EntitySnapshot {
                id: body.id(),
                x: pos.x,
                y: pos.y,
                vx: vel.x,
                vy: vel.y,
                angle: body.orientation_angle(),
            }
        })
        .collect();
    WorldSnapshot {
        frame: world.frame,
        entities,
    }
}

pub(super) fn snapshot_json<T: Body>(world: &WorldCore<T>) -> String {
    serde_json::to_string(&snapshot(world)).unwrap_or_else(|_| "{}".to_string())
}
