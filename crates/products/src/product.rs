use serde::{Deserialize, Serialize};

use bazaar_core::ResourceId;

/// A marketplace listing.
///
/// # Invariants
///
/// - `owner` is fixed at creation: no update path carries an owner field,
///   so a product cannot change hands.
/// - `image` starts empty and is only set by the image-attach operation;
///   the field is omitted from JSON until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ResourceId,

    /// Canonical (lower-cased) username of the creator.
    pub owner: String,

    pub title: String,

    /// Positive JSON number; enforced by the payload contract upstream.
    pub price: f64,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
}

/// The fields a product is created from; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub owner: String,
    pub title: String,
    pub price: f64,
    pub description: String,
}

impl ProductDraft {
    pub fn into_product(self, id: ResourceId) -> Product {
        Product {
            id,
            owner: self.owner,
            title: self.title,
            price: self.price,
            description: self.description,
            image: None,
        }
    }
}

/// Full replacement of the caller-editable fields.
///
/// Carries no `owner` and no `image`: ownership is permanent, and the image
/// reference only changes through the image-attach operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub price: f64,
    pub description: String,
}

impl Product {
    /// Apply a full update, keeping id, owner, and image.
    pub fn with_update(mut self, update: ProductUpdate) -> Self {
        self.title = update.title;
        self.price = update.price;
        self.description = update.description;
        self
    }

    /// Record the stored image reference.
    pub fn with_image(mut self, reference: String) -> Self {
        self.image = Some(reference);
        self
    }
}
