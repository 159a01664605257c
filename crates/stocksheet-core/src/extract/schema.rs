//! Destination sheet kinds and their fixed headers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Keywords that mark a header or noise line on every kind of sheet.
const BASE_BLACKLIST: &[&str] = &[
    "date", "item", "unit", "quantity", "demand", "s.no", "sno", "outlet",
];

/// Output shape selected from the destination sheet's purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Outlet demand list sent to the store.
    StoreDemand,
    /// Supplier invoice / purchase bill.
    Purchases,
    /// Stock register.
    Inventory,
    /// Anything else.
    Generic,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 4] = [
        SchemaKind::StoreDemand,
        SchemaKind::Purchases,
        SchemaKind::Inventory,
        SchemaKind::Generic,
    ];

    /// Pick the schema from a sheet name such as "StoreDemand_Oct" or "Purchases 2025".
    pub fn from_sheet_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        if key.contains("storedemand") || key.contains("demand") {
            SchemaKind::StoreDemand
        } else if key.contains("purchase") || key.contains("invoice") {
            SchemaKind::Purchases
        } else if key.contains("inventory") || key.contains("stock") {
            SchemaKind::Inventory
        } else {
            SchemaKind::Generic
        }
    }

    /// Header row written above the data.
    pub fn header(self) -> &'static [&'static str] {
        match self {
            SchemaKind::StoreDemand => &["S.No", "Item Name", "Unit", "Demand Quantity"],
            SchemaKind::Purchases => &["S.No", "Item Name", "Unit", "Quantity", "Rate", "Amount"],
            SchemaKind::Inventory => &["S.No", "Item Name", "Unit", "Stock Quantity"],
            SchemaKind::Generic => &["S.No", "Item", "Unit", "Quantity"],
        }
    }

    /// Number of numeric columns after the quantity.
    pub fn extra_columns(self) -> usize {
        self.header().len().saturating_sub(4)
    }

    /// Built-in header/noise keywords for this kind.
    pub fn default_blacklist(self) -> Vec<&'static str> {
        let extra: &[&str] = match self {
            SchemaKind::Purchases => &["invoice", "bill", "total", "gst"],
            SchemaKind::Inventory => &["stock", "opening", "closing"],
            SchemaKind::StoreDemand | SchemaKind::Generic => &[],
        };
        BASE_BLACKLIST.iter().chain(extra).copied().collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::StoreDemand => "store_demand",
            SchemaKind::Purchases => "purchases",
            SchemaKind::Inventory => "inventory",
            SchemaKind::Generic => "generic",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
