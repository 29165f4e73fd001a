//! Level definitions (`LevelConfig`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mapping::{ConfigRecord, TypeDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub required_level: i32,
    /// Level length in seconds.
    pub duration: f32,
    pub max_enemies: i32,
    pub enemy_spawn_rate: f32,
    /// Enemy ids allowed in this level, as written in the table.
    pub enemy_types: String,
    /// Spawn weights parallel to `enemy_types`.
    pub enemy_spawn_weights: String,
    pub exp_reward: i32,
    pub gold_reward: i32,
    pub background_path: String,
    pub music_path: String,
    pub is_boss_level: bool,
    pub boss_id: i32,
}

impl ConfigRecord for LevelConfig {
    const TABLE: &'static str = "LevelConfig";

    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::builder(Self::TABLE)
            .field("id", "Level ID", |r: &mut Self, v| r.id = v)
            .field("name", "Name", |r: &mut Self, v| r.name = v)
            .field("description", "Description", |r: &mut Self, v| r.description = v)
            .field("requiredLevel", "Required level", |r: &mut Self, v| r.required_level = v)
            .field("duration", "Duration", |r: &mut Self, v| r.duration = v)
            .field("maxEnemies", "Max enemies", |r: &mut Self, v| r.max_enemies = v)
            .field("enemySpawnRate", "Spawn rate", |r: &mut Self, v| r.enemy_spawn_rate = v)
            .field("enemyTypes", "Enemy types", |r: &mut Self, v| r.enemy_types = v)
            .field("enemySpawnWeights", "Spawn weights", |r: &mut Self, v| r.enemy_spawn_weights = v)
            .field("expReward", "Experience reward", |r: &mut Self, v| r.exp_reward = v)
            .field("goldReward", "Gold reward", |r: &mut Self, v| r.gold_reward = v)
            .field("backgroundPath", "Background path", |r: &mut Self, v| r.background_path = v)
            .field("musicPath", "Music path", |r: &mut Self, v| r.music_path = v)
            .field("isBossLevel", "Boss level", |r: &mut Self, v| r.is_boss_level = v)
            .field("bossId", "Boss ID", |r: &mut Self, v| r.boss_id = v)
            .id_field("id")
            .build()
    }
}

impl fmt::Display for LevelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LevelConfig(id={}, name={}, description={}, requiredLevel={}, duration={}, \
             maxEnemies={}, enemySpawnRate={}, enemyTypes={}, enemySpawnWeights={}, \
             expReward={}, goldReward={}, backgroundPath={}, musicPath={}, isBossLevel={}, \
             bossId={})",
            self.id,
            self.name,
            self.description,
            self.required_level,
            self.duration,
            self.max_enemies,
            self.enemy_spawn_rate,
            self.enemy_types,
            self.enemy_spawn_weights,
            self.exp_reward,
            self.gold_reward,
            self.background_path,
            self.music_path,
            self.is_boss_level,
            self.boss_id
        )
    }
}
