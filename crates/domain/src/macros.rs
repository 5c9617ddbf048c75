//! Macro for wire-format enums
//!
//! The backend serializes its enums as upper snake case (`IN_PROGRESS`).
//! This macro gives such enums a matching `Display` and a case-insensitive
//! `FromStr`, so query parameters and log fields use the same spelling as
//! the JSON bodies.
//!
//! # Example
//!
//! ```rust
//! use courseportal_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Hidden,
//! }
//!
//! impl_wire_enum_conversions!(Visibility {
//!     Public => "PUBLIC",
//!     Hidden => "HIDDEN",
//! });
//!
//! assert_eq!(Visibility::Public.to_string(), "PUBLIC");
//! assert_eq!("hidden".parse::<Visibility>(), Ok(Visibility::Hidden));
//! ```

/// Implements `Display` and `FromStr` for an enum using its wire names
///
/// * `Display` writes the wire name verbatim.
/// * `FromStr` accepts the wire name in any ASCII case.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $wire:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire name of this variant.
            pub const fn as_wire_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_wire_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        NotStarted,
        Running,
    }

    impl_wire_enum_conversions!(Phase {
        NotStarted => "NOT_STARTED",
        Running => "RUNNING",
    });

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(Phase::NotStarted.to_string(), "NOT_STARTED");
        assert_eq!(Phase::Running.as_wire_str(), "RUNNING");
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Phase::from_str("not_started"), Ok(Phase::NotStarted));
        assert_eq!(Phase::from_str("Running"), Ok(Phase::Running));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = Phase::from_str("paused").unwrap_err();
        assert!(err.contains("Phase"));
        assert!(err.contains("paused"));
    }
}
