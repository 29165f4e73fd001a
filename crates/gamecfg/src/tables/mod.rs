//! Built-in game tables and their enum types.
//!
//! These four tables are always bound by [`ConfigRegistry`](crate::ConfigRegistry);
//! other tables need a registration or a derived schema.

mod enemy;
mod enums;
mod item;
mod level;
mod weapon;

pub use enemy::EnemyConfig;
pub use enums::{EnemyType, GameDifficulty, ItemType, Rarity, WeaponType};
pub use item::ItemConfig;
pub use level::LevelConfig;
pub use weapon::WeaponConfig;

use crate::mapping::ConfigRecord;
use crate::schema::EnumDescriptor;

/// Names of the built-in tables.
pub const BUILTIN_TABLES: [&str; 4] = [
    EnemyConfig::TABLE,
    WeaponConfig::TABLE,
    ItemConfig::TABLE,
    LevelConfig::TABLE,
];

/// Symbol tables of the built-in enums.
pub fn builtin_enums() -> Vec<EnumDescriptor> {
    vec![
        EnemyType::descriptor(),
        WeaponType::descriptor(),
        ItemType::descriptor(),
        Rarity::descriptor(),
        GameDifficulty::descriptor(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_document;
    use crate::mapping::RecordMapper;

    #[test]
    fn test_builtin_descriptors_have_unique_fields() {
        assert_eq!(EnemyConfig::descriptor().fields().len(), 15);
        assert_eq!(WeaponConfig::descriptor().fields().len(), 15);
        assert_eq!(ItemConfig::descriptor().fields().len(), 12);
        assert_eq!(LevelConfig::descriptor().fields().len(), 15);
    }

    #[test]
    fn test_enemy_rows_map_to_typed_records() {
        let text = "ID,Name,Health,Type,Boss\n\
                    id,name,health,enemyType,isBoss\n\
                    int,string,int,EnemyType,bool\n\
                    1,Zombie,100,Tank,false\n\
                    2,\"Lich, King\",900,Boss,TRUE\n";
        let doc = parse_document(text, 3);
        let outcome = RecordMapper::map(doc.field_names(), &doc.data_rows, &EnemyConfig::descriptor());

        assert_eq!(outcome.records.len(), 2);
        let lich = &outcome.records[1];
        assert_eq!(lich.name, "Lich, King");
        assert_eq!(lich.enemy_type, EnemyType::Boss);
        assert!(lich.is_boss);
        assert_eq!(outcome.records[0].speed, 0.0);
        assert!(outcome.notes.is_empty());
        assert!(lich.to_string().starts_with("EnemyConfig(id=2, name=Lich, King, "));
    }
}
