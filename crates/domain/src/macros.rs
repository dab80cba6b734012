//! Macro for implementing Display and FromStr for wire-label enums
//!
//! Several enums travel as fixed lowercase labels (notification kinds and
//! the like). This macro keeps the label in one place for both directions.
//!
//! # Example
//!
//! ```rust
//! use fieldlink_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Internal,
//!     Public,
//! }
//!
//! impl_domain_status_conversions!(Visibility {
//!     Internal => "internal",
//!     Public => "public",
//! });
//!
//! assert_eq!(Visibility::Internal.to_string(), "internal");
//! assert_eq!("PUBLIC".parse::<Visibility>(), Ok(Visibility::Public));
//! ```

/// Implements Display and FromStr for an enum of fixed labels
///
/// - Display writes the label
/// - FromStr parses case-insensitively and names the enum in the error
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire label for this variant.
            #[must_use]
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
