//! Macro for implementing Display and FromStr for label enums
//!
//! Project types and day statuses travel as lowercase strings (config files,
//! JSON output, CLI flags). This macro gives every such enum one consistent
//! pair of conversions with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use capacal_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Weekpart {
//!     Weekday,
//!     Weekend,
//! }
//!
//! impl_label_conversions!(Weekpart {
//!     Weekday => "weekday",
//!     Weekend => "weekend",
//! });
//!
//! assert_eq!(Weekpart::Weekend.to_string(), "weekend");
//! assert_eq!("WEEKDAY".parse::<Weekpart>().unwrap(), Weekpart::Weekday);
//! ```

/// Implements Display and FromStr traits for label enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase label
///
/// Parsing trims surrounding whitespace and ignores case.
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase label
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
