//! core::schema::vocabulary
//!
//! Closed sets of permitted string values.
//!
//! A [`Vocabulary`] maps symbolic names (`HAMAMATSU`) to canonical strings
//! (`"Hamamatsu"`). It is a read-only constraint source: unknown values are
//! rejected by the validator, never here.
//!
//! Vocabularies are declared with [`define_vocabulary!`], which emits both
//! the typed Rust enum used by record structs and the static table the
//! validator consults, so the two cannot drift apart.

use thiserror::Error;

/// Errors from vocabulary lookups on typed enums.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("'{value}' is not a valid {vocabulary}")]
    UnknownValue {
        vocabulary: &'static str,
        value: String,
    },
}

/// A closed (symbol → canonical value) mapping.
#[derive(Debug)]
pub struct Vocabulary {
    /// Name used in error messages and `describe` output
    pub name: &'static str,
    /// `(symbol, canonical value)` pairs in declaration order
    pub entries: &'static [(&'static str, &'static str)],
}

impl Vocabulary {
    /// Canonical value for a symbol.
    pub fn value_of(&self, symbol: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, value)| *value)
    }

    /// Symbol for a canonical value.
    pub fn symbol_of(&self, value: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(symbol, _)| *symbol)
    }

    /// Check if `value` is one of the canonical values.
    pub fn contains(&self, value: &str) -> bool {
        self.symbol_of(value).is_some()
    }

    /// Canonical values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vocabulary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declare a typed enum together with its static [`Vocabulary`].
///
/// ```
/// use neurometa::define_vocabulary;
///
/// define_vocabulary! {
///     /// Cooling method
///     pub enum Cooling as COOLING {
///         Air = "AIR" => "air",
///         Water = "WATER" => "water",
///     }
/// }
///
/// assert_eq!(Cooling::Water.as_str(), "water");
/// assert_eq!("air".parse::<Cooling>().unwrap(), Cooling::Air);
/// assert_eq!(COOLING.value_of("WATER"), Some("water"));
/// assert!("Air".parse::<Cooling>().is_err());
/// ```
#[macro_export]
macro_rules! define_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $table:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $symbol:literal => $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        $vis static $table: $crate::core::schema::Vocabulary = $crate::core::schema::Vocabulary {
            name: stringify!($name),
            entries: &[$(($symbol, $value)),+],
        };

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical string value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Symbolic name.
            pub fn symbol(&self) -> &'static str {
                match self {
                    $($name::$variant => $symbol,)+
                }
            }

            /// The static vocabulary backing this enum.
            pub fn vocabulary() -> &'static $crate::core::schema::Vocabulary {
                &$table
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::schema::VocabularyError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::core::schema::VocabularyError::UnknownValue {
                        vocabulary: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl ::std::convert::TryFrom<String> for $name {
            type Error = $crate::core::schema::VocabularyError;

            fn try_from(s: String) -> ::std::result::Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl ::std::convert::From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_vocabulary! {
        /// Test shapes
        pub enum Shape as SHAPE {
            Square = "SQUARE" => "Square",
            Ramp = "RAMP" => "Ramp",
            Sine = "SINE" => "Sinusoidal",
        }
    }

    #[test]
    fn lookup_both_directions() {
        assert_eq!(SHAPE.value_of("SINE"), Some("Sinusoidal"));
        assert_eq!(SHAPE.symbol_of("Sinusoidal"), Some("SINE"));
        assert_eq!(SHAPE.value_of("Sinusoidal"), None);
        assert_eq!(SHAPE.symbol_of("SINE"), None);
    }

    #[test]
    fn contains_checks_canonical_values() {
        assert!(SHAPE.contains("Ramp"));
        assert!(!SHAPE.contains("ramp"));
        assert!(!SHAPE.contains("RAMP"));
        assert_eq!(SHAPE.len(), 3);
        assert!(!SHAPE.is_empty());
    }

    #[test]
    fn values_in_declaration_order() {
        let values: Vec<_> = SHAPE.values().collect();
        assert_eq!(values, vec!["Square", "Ramp", "Sinusoidal"]);
    }

    #[test]
    fn typed_enum_matches_table() {
        for shape in Shape::ALL {
            assert_eq!(SHAPE.value_of(shape.symbol()), Some(shape.as_str()));
        }
        assert!(std::ptr::eq(Shape::vocabulary(), &SHAPE));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "Triangle".parse::<Shape>().unwrap_err();
        assert_eq!(
            err,
            VocabularyError::UnknownValue {
                vocabulary: "Shape",
                value: "Triangle".into()
            }
        );
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&Shape::Sine).unwrap();
        assert_eq!(json, "\"Sinusoidal\"");
        let parsed: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Shape::Sine);
        assert!(serde_json::from_str::<Shape>("\"SINE\"").is_err());
    }
}
