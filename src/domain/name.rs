use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// Error returned when a catalog name is empty once surrounding whitespace
/// is removed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid {kind} name '{raw}': must contain non-whitespace characters")]
pub struct InvalidNameError {
    kind: &'static str,
    raw: String,
}

macro_rules! catalog_name {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(NonEmptyString);

        impl $name {
            /// Creates a name from raw text, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns [`InvalidNameError`] if nothing remains after trimming.
            pub fn new(raw: &str) -> Result<Self, InvalidNameError> {
                NonEmptyString::new(raw.trim().to_string())
                    .map(Self)
                    .map_err(|_| InvalidNameError {
                        kind: $kind,
                        raw: raw.to_string(),
                    })
            }

            /// Returns the string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl TryFrom<&str> for $name {
            type Error = InvalidNameError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = InvalidNameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        // Lets ordered maps keyed by names be queried with plain `&str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

catalog_name!(
    /// The name of a service in the catalog, for example `Staffing`.
    ///
    /// Always non-empty and free of leading or trailing whitespace.
    ServiceName,
    "service"
);

catalog_name!(
    /// The name of an operation exposed by a service, for example
    /// `Hire_Employee`.
    ///
    /// Always non-empty and free of leading or trailing whitespace.
    OperationName,
    "operation"
);

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use test_case::test_case;

    use super::*;

    #[test_case("Staffing", "Staffing" ; "already trimmed")]
    #[test_case("  Staffing\n", "Staffing" ; "surrounding whitespace")]
    #[test_case("Human Resources", "Human Resources" ; "inner whitespace kept")]
    fn service_name_is_trimmed(raw: &str, expected: &str) {
        let name = ServiceName::new(raw).unwrap();
        assert_eq!(name.as_str(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\n\t" ; "control whitespace")]
    fn blank_names_are_rejected(raw: &str) {
        assert!(ServiceName::new(raw).is_err());
        assert!(OperationName::new(raw).is_err());
    }

    #[test]
    fn error_display_names_the_kind() {
        let error = OperationName::new(" ").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid operation name ' ': must contain non-whitespace characters"
        );
    }

    #[test]
    fn names_order_lexicographically() {
        let mut names: Vec<ServiceName> = ["Staffing", "Benefits", "Payroll"]
            .into_iter()
            .map(|s| s.parse().unwrap())
            .collect();
        names.sort();

        let names: Vec<&str> = names.iter().map(ServiceName::as_str).collect();
        assert_eq!(names, ["Benefits", "Payroll", "Staffing"]);
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ServiceName::new("Staffing").unwrap(), 1);

        assert_eq!(map.get("Staffing"), Some(&1));
        assert_eq!(map.get("Payroll"), None);
    }
}
