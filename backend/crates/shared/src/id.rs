//! Record Identifiers
//!
//! Every marketplace record is keyed by a short prefixed string such as
//! `usr_1a2b3c4d`. The prefix names the record kind; the tail is the first
//! eight hex digits of a random UUID.
//!
//! Usage:
//! ```
//! use kernel::id::StoreId;
//! let store_id = StoreId::generate();
//! assert!(store_id.as_str().starts_with("store_"));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Length of the random tail appended after the prefix
const RANDOM_TAIL_LEN: usize = 8;

/// Prefix attached to newly generated ids of a record kind
pub trait IdPrefix {
    const PREFIX: &'static str;
}

/// Typed string identifier
///
/// Ids read back from storage are accepted verbatim; only freshly generated
/// ids are guaranteed to carry the kind's prefix.
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: IdPrefix> Id<T> {
    /// Generate a new random id with the kind's prefix
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self::from_string(format!("{}_{}", T::PREFIX, &uuid[..RANDOM_TAIL_LEN]))
    }
}

impl<T> Id<T> {
    /// Wrap an existing id (from storage or a request path)
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_string(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_string)
    }
}

/// Marker types for the record kinds
pub mod markers {
    use super::IdPrefix;

    pub struct User;
    pub struct Store;
    pub struct Product;
    pub struct Order;

    impl IdPrefix for User {
        const PREFIX: &'static str = "usr";
    }

    impl IdPrefix for Store {
        const PREFIX: &'static str = "store";
    }

    impl IdPrefix for Product {
        const PREFIX: &'static str = "prd";
    }

    impl IdPrefix for Order {
        const PREFIX: &'static str = "ord";
    }
}

pub type UserId = Id<markers::User>;
pub type StoreId = Id<markers::Store>;
pub type ProductId = Id<markers::Product>;
pub type OrderId = Id<markers::Order>;
