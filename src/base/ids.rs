//! Identifiers for files, projects and metadata assemblies.

use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $display:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id from a raw index.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, "#{}"), self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

id_type!(
    /// An interned identifier for a source file.
    ///
    /// A file may be compiled by several projects at once (linked files), so a
    /// `FileId` alone does not identify a compilation.
    FileId,
    "file"
);

id_type!(
    /// Identifies one project, i.e. one compilation context.
    ///
    /// Every symbol handle carries the project it was observed from.
    ProjectId,
    "project"
);

id_type!(
    /// Identifies a metadata assembly referenced by projects.
    AssemblyId,
    "assembly"
);
