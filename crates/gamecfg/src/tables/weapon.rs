//! Weapon definitions (`WeaponConfig`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::enums::WeaponType;
use crate::mapping::{ConfigRecord, TypeDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponConfig {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub weapon_type: WeaponType,
    pub damage: f32,
    pub attack_speed: f32,
    pub range: f32,
    /// Projectiles fired per attack.
    pub projectile_count: i32,
    pub projectile_speed: f32,
    /// Seconds between attacks.
    pub cooldown: f32,
    pub max_level: i32,
    pub sprite_path: String,
    pub projectile_prefab: String,
    pub is_unlocked: bool,
    /// Player level at which the weapon unlocks.
    pub unlock_level: i32,
}

impl ConfigRecord for WeaponConfig {
    const TABLE: &'static str = "WeaponConfig";

    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::builder(Self::TABLE)
            .field("id", "Weapon ID", |r: &mut Self, v| r.id = v)
            .field("name", "Name", |r: &mut Self, v| r.name = v)
            .field("description", "Description", |r: &mut Self, v| r.description = v)
            .field("weaponType", "Weapon type", |r: &mut Self, v| r.weapon_type = v)
            .field("damage", "Damage", |r: &mut Self, v| r.damage = v)
            .field("attackSpeed", "Attack speed", |r: &mut Self, v| r.attack_speed = v)
            .field("range", "Range", |r: &mut Self, v| r.range = v)
            .field("projectileCount", "Projectile count", |r: &mut Self, v| r.projectile_count = v)
            .field("projectileSpeed", "Projectile speed", |r: &mut Self, v| r.projectile_speed = v)
            .field("cooldown", "Cooldown", |r: &mut Self, v| r.cooldown = v)
            .field("maxLevel", "Max level", |r: &mut Self, v| r.max_level = v)
            .field("spritePath", "Sprite path", |r: &mut Self, v| r.sprite_path = v)
            .field("projectilePrefab", "Projectile prefab", |r: &mut Self, v| r.projectile_prefab = v)
            .field("isUnlocked", "Unlocked", |r: &mut Self, v| r.is_unlocked = v)
            .field("unlockLevel", "Unlock level", |r: &mut Self, v| r.unlock_level = v)
            .id_field("id")
            .build()
    }
}

impl fmt::Display for WeaponConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeaponConfig(id={}, name={}, description={}, weaponType={}, damage={}, \
             attackSpeed={}, range={}, projectileCount={}, projectileSpeed={}, cooldown={}, \
             maxLevel={}, spritePath={}, projectilePrefab={}, isUnlocked={}, unlockLevel={})",
            self.id,
            self.name,
            self.description,
            self.weapon_type,
            self.damage,
            self.attack_speed,
            self.range,
            self.projectile_count,
            self.projectile_speed,
            self.cooldown,
            self.max_level,
            self.sprite_path,
            self.projectile_prefab,
            self.is_unlocked,
            self.unlock_level
        )
    }
}
