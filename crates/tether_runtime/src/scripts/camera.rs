use glam::Vec3;
use tether_core::time::Timestep;
use tether_script::{
    BridgeResult, Entity, FieldValue, Script, ScriptClass, ScriptField, ScriptFieldType,
    TransformComponent,
};

/// Follows the "Player" entity from behind at a tunable distance.
pub struct Camera {
    pub distance_from_player: f32,
    player: Option<Entity>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance_from_player: 5.0,
            player: None,
        }
    }
}

impl Script for Camera {
    fn on_create(&mut self, entity: &Entity) -> BridgeResult<()> {
        tracing::info!(entity = %entity.id(), "Camera.on_create");
        self.player = entity.find_entity_by_name("Player")?;
        Ok(())
    }

    fn on_update(&mut self, entity: &Entity, _ts: Timestep) -> BridgeResult<()> {
        let Some(player) = &self.player else {
            return Ok(());
        };
        // Stop following once the player loses its transform or is destroyed.
        let Some(target) = player.get_component::<TransformComponent>()? else {
            return Ok(());
        };
        let offset = Vec3::new(0.0, 0.0, self.distance_from_player);
        entity.set_translation(target.translation()? + offset)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "DistanceFromPlayer" => Some(FieldValue::Float(self.distance_from_player)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("DistanceFromPlayer", FieldValue::Float(v)) => {
                self.distance_from_player = v;
                true
            }
            _ => false,
        }
    }
}

impl ScriptClass for Camera {
    const NAME: &'static str = "Camera";
    const FIELDS: &'static [ScriptField] =
        &[ScriptField::new("DistanceFromPlayer", ScriptFieldType::Float)];
}
