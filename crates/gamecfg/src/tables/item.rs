//! Pickup definitions (`ItemConfig`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::enums::{ItemType, Rarity};
use crate::mapping::{ConfigRecord, TypeDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub item_type: ItemType,
    pub effect_value: f32,
    /// Effect duration in seconds, 0 for instant effects.
    pub duration: f32,
    pub max_stack: i32,
    pub sprite_path: String,
    pub is_consumable: bool,
    pub is_permanent: bool,
    /// Rarity tier as an ordinal, see [`ItemConfig::rarity_tier`].
    pub rarity: i32,
    pub effect_description: String,
}

impl ItemConfig {
    /// The rarity column as a [`Rarity`]; out-of-range ordinals map to `Common`.
    pub fn rarity_tier(&self) -> Rarity {
        usize::try_from(self.rarity)
            .ok()
            .and_then(Rarity::from_ordinal)
            .unwrap_or_default()
    }
}

impl ConfigRecord for ItemConfig {
    const TABLE: &'static str = "ItemConfig";

    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::builder(Self::TABLE)
            .field("id", "Item ID", |r: &mut Self, v| r.id = v)
            .field("name", "Name", |r: &mut Self, v| r.name = v)
            .field("description", "Description", |r: &mut Self, v| r.description = v)
            .field("itemType", "Item type", |r: &mut Self, v| r.item_type = v)
            .field("effectValue", "Effect value", |r: &mut Self, v| r.effect_value = v)
            .field("duration", "Duration", |r: &mut Self, v| r.duration = v)
            .field("maxStack", "Max stack", |r: &mut Self, v| r.max_stack = v)
            .field("spritePath", "Sprite path", |r: &mut Self, v| r.sprite_path = v)
            .field("isConsumable", "Consumable", |r: &mut Self, v| r.is_consumable = v)
            .field("isPermanent", "Permanent", |r: &mut Self, v| r.is_permanent = v)
            .field("rarity", "Rarity", |r: &mut Self, v| r.rarity = v)
            .field("effectDescription", "Effect text", |r: &mut Self, v| r.effect_description = v)
            .id_field("id")
            .build()
    }
}

impl fmt::Display for ItemConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ItemConfig(id={}, name={}, description={}, itemType={}, effectValue={}, \
             duration={}, maxStack={}, spritePath={}, isConsumable={}, isPermanent={}, \
             rarity={}, effectDescription={})",
            self.id,
            self.name,
            self.description,
            self.item_type,
            self.effect_value,
            self.duration,
            self.max_stack,
            self.sprite_path,
            self.is_consumable,
            self.is_permanent,
            self.rarity,
            self.effect_description
        )
    }
}
