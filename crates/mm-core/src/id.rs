use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner shared by node and connection ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Defines an opaque, interned identifier type.
///
/// Ids are 4-byte `Spur` handles: `Copy`, `Eq`, `Hash` in O(1). Loaded maps
/// keep whatever string ids they were saved with; fresh ids are UUIDs so
/// they can never collide with ids already present in a loaded scene.
macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a string as an id, or return the existing handle.
            pub fn intern(s: &str) -> Self {
                $name(INTERNER.get_or_intern(s))
            }

            /// Resolve back to the string form.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }

            /// Generate a fresh, globally unique id.
            pub fn generate() -> Self {
                Self::intern(&uuid::Uuid::new_v4().simple().to_string())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identifier of a node on the canvas.
    NodeId
);

interned_id!(
    /// Identifier of a connection between two nodes.
    ConnectionId
);
