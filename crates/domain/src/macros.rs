//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Destination field types and dataset write modes travel as lowercase
//! strings in config files and API payloads. This macro keeps the string
//! mapping in one place.
//!
//! # Example
//!
//! ```rust
//! use reportsync_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Replace,
//!     Append,
//! }
//!
//! impl_domain_enum_conversions!(Mode {
//!     Replace => "replace",
//!     Append => "append",
//! });
//!
//! assert_eq!("APPEND".parse::<Mode>(), Ok(Mode::Append));
//! assert_eq!(Mode::Replace.to_string(), "replace");
//! ```

/// Implements Display and FromStr traits for unit enums
///
/// - Display writes the lowercase string
/// - FromStr is case-insensitive and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
