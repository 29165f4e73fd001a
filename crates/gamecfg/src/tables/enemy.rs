//! Enemy definitions (`EnemyConfig`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::enums::EnemyType;
use crate::mapping::{ConfigRecord, TypeDescriptor};

/// One enemy archetype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyConfig {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub health: i32,
    /// Movement speed in units per second.
    pub speed: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    /// Attacks per second.
    pub attack_speed: f32,
    pub exp_reward: i32,
    pub gold_reward: i32,
    pub sprite_path: String,
    pub animator_path: String,
    pub enemy_type: EnemyType,
    pub is_boss: bool,
    /// Relative weight when picking enemies to spawn.
    pub spawn_weight: f32,
}

impl ConfigRecord for EnemyConfig {
    const TABLE: &'static str = "EnemyConfig";

    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::builder(Self::TABLE)
            .field("id", "Enemy ID", |r: &mut Self, v| r.id = v)
            .field("name", "Name", |r: &mut Self, v| r.name = v)
            .field("description", "Description", |r: &mut Self, v| r.description = v)
            .field("health", "Health", |r: &mut Self, v| r.health = v)
            .field("speed", "Move speed", |r: &mut Self, v| r.speed = v)
            .field("attackDamage", "Attack damage", |r: &mut Self, v| r.attack_damage = v)
            .field("attackRange", "Attack range", |r: &mut Self, v| r.attack_range = v)
            .field("attackSpeed", "Attack speed", |r: &mut Self, v| r.attack_speed = v)
            .field("expReward", "Experience reward", |r: &mut Self, v| r.exp_reward = v)
            .field("goldReward", "Gold reward", |r: &mut Self, v| r.gold_reward = v)
            .field("spritePath", "Sprite path", |r: &mut Self, v| r.sprite_path = v)
            .field("animatorPath", "Animator path", |r: &mut Self, v| r.animator_path = v)
            .field("enemyType", "Enemy type", |r: &mut Self, v| r.enemy_type = v)
            .field("isBoss", "Is boss", |r: &mut Self, v| r.is_boss = v)
            .field("spawnWeight", "Spawn weight", |r: &mut Self, v| r.spawn_weight = v)
            .id_field("id")
            .build()
    }
}

impl fmt::Display for EnemyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EnemyConfig(id={}, name={}, description={}, health={}, speed={}, attackDamage={}, \
             attackRange={}, attackSpeed={}, expReward={}, goldReward={}, spritePath={}, \
             animatorPath={}, enemyType={}, isBoss={}, spawnWeight={})",
            self.id,
            self.name,
            self.description,
            self.health,
            self.speed,
            self.attack_damage,
            self.attack_range,
            self.attack_speed,
            self.exp_reward,
            self.gold_reward,
            self.sprite_path,
            self.animator_path,
            self.enemy_type,
            self.is_boss,
            self.spawn_weight
        )
    }
}
