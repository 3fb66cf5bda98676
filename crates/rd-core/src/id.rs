use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for ids — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned key of a furniture catalog entry.
///
/// Catalog ids are supplied by the catalog collaborator (opaque strings,
/// typically uuids). Interning makes them 4-byte `Copy` keys with O(1)
/// comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogId(Spur);

impl CatalogId {
    /// Intern a catalog id string, or return the existing key.
    pub fn intern(s: &str) -> Self {
        CatalogId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the original string.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

/// Interned key of one placement on the canvas.
///
/// Unique per placement, never equal to a catalog id — the same catalog
/// entry may be placed many times, each with its own `InstanceId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Spur);

impl InstanceId {
    /// Intern an instance id string, or return the existing key.
    pub fn intern(s: &str) -> Self {
        InstanceId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the original string.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Mint a fresh unique id (`item_0`, `item_1`, ...). The counter is
    /// process-wide, so every placement and duplicate gets its own id.
    pub fn fresh() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("item_{n}"))
    }
}

impl fmt::Debug for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for CatalogId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CatalogId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CatalogId::intern(&s))
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(InstanceId::intern(&s))
    }
}
