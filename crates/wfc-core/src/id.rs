use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for workflow ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Shared counter so generated ids never repeat within a process.
static COUNTER: AtomicU64 = AtomicU64::new(0);

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Spur);

        impl $name {
            /// Prefix used for generated ids (e.g. `node_12`).
            pub const PREFIX: &'static str = $prefix;

            /// Intern a string as an id, or return the existing one.
            pub fn intern(s: &str) -> Self {
                Self(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }

            /// True for the empty id a document gets when it omits one.
            pub fn is_blank(&self) -> bool {
                self.as_str().is_empty()
            }

            /// Generate an id that `taken` reports as unused.
            ///
            /// The counter alone is unique per process, but ids loaded from a
            /// document may already occupy `node_N` style names.
            pub fn fresh(taken: impl Fn(Self) -> bool) -> Self {
                loop {
                    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
                    let id = Self::intern(&format!("{}_{n}", Self::PREFIX));
                    if !taken(id) {
                        return id;
                    }
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::intern("")
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.as_str())
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
                Ok(Self::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identifier of a workflow node. Interned: 4 bytes, `Copy`, O(1) `Eq`/`Hash`.
    NodeId,
    "node"
);

interned_id!(
    /// Identifier of a connection between two nodes.
    ConnectionId,
    "conn"
);

interned_id!(
    /// Identifier of a node group.
    GroupId,
    "group"
);
