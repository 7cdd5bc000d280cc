use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle state
///
/// Any state may move to any other; sellers drive the flow by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Confirmed,
    Packing,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::New,
        OrderStatus::Confirmed,
        OrderStatus::Packing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use OrderStatus::*;
        match self {
            New => "new",
            Confirmed => "confirmed",
            Packing => "packing",
            Shipping => "shipping",
            Delivered => "delivered",
            Cancelled => "cancelled",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
