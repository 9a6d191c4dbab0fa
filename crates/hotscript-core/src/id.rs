// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TypeId: the stable key that identifies a script across reloads.

use std::path::Path;

/// Define a newtype ID wrapper around `String`.
///
/// Generates `new()`, `as_str()`, `Display`, `From<String>`, `From<&str>`,
/// `PartialEq<str>`, `PartialEq<&str>`, and `Borrow<str>` implementations.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Stable identifier of a script, derived from its source path: relative
    /// to the watched base directory, normalized to forward slashes,
    /// lower-cased, and stripped of its extension.
    ///
    /// Two different source files that normalize to the same `TypeId` is a
    /// configuration error in the embedding application; this crate does not
    /// attempt to detect or disambiguate it.
    pub struct TypeId;
}

impl TypeId {
    /// Derive a `TypeId` from a path relative to `base_dir`.
    ///
    /// Returns `None` if `path` is not inside `base_dir`.
    pub fn from_path(base_dir: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(base_dir).ok()?;
        let without_ext = relative.with_extension("");
        let normalized = without_ext
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
            .collect::<Vec<_>>()
            .join("/");
        if normalized.is_empty() {
            return None;
        }
        Some(TypeId::new(normalized))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
