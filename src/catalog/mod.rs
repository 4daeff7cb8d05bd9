//! Static property catalog
//!
//! Read-only list of rental properties seeded at startup. Lookup by id is a
//! normal operation whose miss case is `None`, not a fault.

use serde::{Deserialize, Serialize};
use tracing::debug;

mod data;

/// A rentable vacation unit with descriptive metadata and reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Stable identifier, e.g. "wildhouse-farm"
    pub id: String,
    pub name: String,
    pub location: String,
    pub image: String,
    /// Display price for the stay, e.g. "£778"
    pub price: String,
    /// Pre-discount display price, when the property is on offer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    pub sleeps: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub dogs_allowed: u32,
    /// 0.0 - 5.0
    pub rating: f32,
    pub description: String,
    pub features: Vec<String>,
    pub nearby_attractions: Vec<String>,
    pub reviews: Vec<Review>,
}

/// A guest review, owned by its property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author: String,
    /// 0.0 - 5.0
    pub rating: f32,
    /// Display date string, e.g. "15th January 2025"
    pub date: String,
    pub comment: String,
}

/// The fixed in-memory catalog
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    /// Build the catalog from the seeded property list
    pub fn new() -> Self {
        let properties = data::seed_properties();
        debug!(count = properties.len(), "Catalog::new: seeded");
        Self { properties }
    }

    /// Look up a property by id
    pub fn lookup(&self, id: &str) -> Option<&Property> {
        debug!(%id, "Catalog::lookup: called");
        self.properties.iter().find(|p| p.id == id)
    }

    /// All properties, in catalog order
    pub fn all(&self) -> &[Property] {
        &self.properties
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
