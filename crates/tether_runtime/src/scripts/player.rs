use glam::Vec3;
use tether_core::time::Timestep;
use tether_script::{
    BridgeResult, Entity, FieldValue, KeyCode, Script, ScriptClass, ScriptField, ScriptFieldType,
    TransformComponent,
};

use super::Camera;

/// WASD movement; Q/E pull the camera out or in.
#[derive(Default)]
pub struct Player {
    pub speed: f32,
    pub time: f32,
    transform: Option<TransformComponent>,
    camera: Option<Entity>,
}

impl Script for Player {
    fn on_create(&mut self, entity: &Entity) -> BridgeResult<()> {
        tracing::info!(entity = %entity.id(), "Player.on_create");
        self.transform = entity.get_component::<TransformComponent>()?;
        self.camera = entity.find_entity_by_name("Camera")?;
        Ok(())
    }

    fn on_update(&mut self, entity: &Entity, ts: Timestep) -> BridgeResult<()> {
        let ts = ts.seconds();
        self.time += ts;

        let input = entity.bridge();
        let mut velocity = Vec3::ZERO;

        if input.is_key_down(KeyCode::W)? {
            velocity.y = 1.0;
        } else if input.is_key_down(KeyCode::S)? {
            velocity.y = -1.0;
        }

        if input.is_key_down(KeyCode::A)? {
            velocity.x = -1.0;
        } else if input.is_key_down(KeyCode::D)? {
            velocity.x = 1.0;
        }

        // Resolved every step; the camera may have lost its script since.
        let camera = match &self.camera {
            Some(camera) => camera.as_script::<Camera>()?,
            None => None,
        };
        if let Some(camera) = camera {
            let step = self.speed * 2.0 * ts;
            if input.is_key_down(KeyCode::Q)? {
                camera.with_mut(|c| c.distance_from_player += step);
            } else if input.is_key_down(KeyCode::E)? {
                camera.with_mut(|c| c.distance_from_player -= step);
            }
        }

        let Some(transform) = &self.transform else {
            return Ok(());
        };
        let translation = transform.translation()?;
        transform.set_translation(translation + velocity * self.speed * ts)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Speed" => Some(FieldValue::Float(self.speed)),
            "Time" => Some(FieldValue::Float(self.time)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("Speed", FieldValue::Float(v)) => self.speed = v,
            ("Time", FieldValue::Float(v)) => self.time = v,
            _ => return false,
        }
        true
    }
}

impl ScriptClass for Player {
    const NAME: &'static str = "Player";
    const FIELDS: &'static [ScriptField] = &[
        ScriptField::new("Speed", ScriptFieldType::Float),
        ScriptField::new("Time", ScriptFieldType::Float),
    ];
}
