//! Enum types referenced by the built-in tables.

/// Declare a configuration enum.
///
/// The first variant is the default and the zero value of the column. The
/// generated type serializes as its variant name and implements
/// [`FromValue`](crate::coerce::FromValue), so it can be used as a field in a
/// [`TypeDescriptor`](crate::mapping::TypeDescriptor).
///
/// ```
/// gamecfg::config_enum! {
///     /// Projectile behaviour.
///     Trajectory { Straight, Arc, Homing }
/// }
///
/// assert_eq!(Trajectory::default(), Trajectory::Straight);
/// assert_eq!(Trajectory::descriptor().ordinal_of("Homing"), Some(2));
/// ```
#[macro_export]
macro_rules! config_enum {
    ($(#[$meta:meta])* $name:ident { $first:ident $(, $rest:ident)* $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            #[default]
            $first,
            $($rest,)*
        }

        impl $name {
            /// All variants in ordinal order.
            pub const VARIANTS: &'static [$name] = &[$name::$first, $($name::$rest,)*];

            /// Symbol table used for CSV coercion.
            pub fn descriptor() -> $crate::schema::EnumDescriptor {
                $crate::schema::EnumDescriptor::new(
                    stringify!($name),
                    [stringify!($first), $(stringify!($rest),)*],
                )
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $($name::$rest => stringify!($rest),)*
                }
            }

            pub fn from_ordinal(ordinal: usize) -> Option<Self> {
                Self::VARIANTS.get(ordinal).copied()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::coerce::FromValue for $name {
            fn declared_type() -> $crate::schema::DeclaredType {
                $crate::schema::DeclaredType::Enum(Self::descriptor())
            }

            fn from_value(value: $crate::coerce::Value) -> Self {
                match value {
                    $crate::coerce::Value::Enum(e) if e.type_name == stringify!($name) => {
                        Self::from_ordinal(e.ordinal).unwrap_or_default()
                    }
                    _ => Self::default(),
                }
            }
        }
    };
}

config_enum! {
    /// Enemy archetype.
    EnemyType { Normal, Fast, Tank, Ranged, Boss, Elite }
}

config_enum! {
    /// Weapon category.
    WeaponType { Melee, Ranged, Magic, Special }
}

config_enum! {
    /// Pickup effect category.
    ItemType { Health, Speed, Damage, Defense, Experience, Gold, Special }
}

config_enum! {
    /// Drop rarity tier.
    Rarity { Common, Uncommon, Rare, Epic, Legendary }
}

config_enum! {
    GameDifficulty { Easy, Normal, Hard, Nightmare }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::{FromValue, coerce};

    #[test]
    fn test_descriptor_matches_variants() {
        let d = EnemyType::descriptor();
        assert_eq!(d.name, "EnemyType");
        assert_eq!(d.symbols.len(), EnemyType::VARIANTS.len());
        assert_eq!(d.ordinal_of("Elite"), Some(5));
        assert_eq!(EnemyType::from_ordinal(5), Some(EnemyType::Elite));
    }

    #[test]
    fn test_from_coerced_value() {
        let v = coerce("Magic", &WeaponType::declared_type()).unwrap();
        assert_eq!(WeaponType::from_value(v), WeaponType::Magic);

        let foreign = coerce("Rare", &Rarity::declared_type()).unwrap();
        assert_eq!(WeaponType::from_value(foreign), WeaponType::Melee);
    }

    #[test]
    fn test_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&ItemType::Gold).unwrap(), "\"Gold\"");
        assert_eq!(GameDifficulty::Nightmare.to_string(), "Nightmare");
    }
}
