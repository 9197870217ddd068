use chrono::NaiveDateTime;

use crate::domain::fixed_point::FixedPoint;

/// Domain representation of a product listed by a seller.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Identifier of the seller owning the product.
    pub seller_id: String,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to buyers.
    pub description: Option<String>,
    /// Current price.
    pub price: FixedPoint,
    /// Previous price shown as crossed out, if any.
    pub old_price: Option<FixedPoint>,
    /// Optional link to the product image.
    pub image_url: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Units available for sale.
    pub stock: i32,
    /// Average review rating maintained by the server.
    pub rating: Option<FixedPoint>,
    /// Number of reviews maintained by the server.
    pub reviews_count: i32,
    /// Whether the product is visible in listings.
    pub is_active: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
///
/// Rating, review count and the active flag are left to the column defaults.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: FixedPoint,
    pub old_price: Option<FixedPoint>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: i32,
    /// Timestamp captured when the payload was created.
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the required details and current timestamp.
    pub fn new(seller_id: impl Into<String>, name: impl Into<String>, price: FixedPoint) -> Self {
        Self {
            seller_id: seller_id.into(),
            name: name.into(),
            description: None,
            price,
            old_price: None,
            image_url: None,
            category: None,
            stock: 0,
            created_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_old_price(mut self, old_price: Option<FixedPoint>) -> Self {
        self.old_price = old_price;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// `None` leaves the stored value untouched. For nullable columns the inner
/// `Option` distinguishes "set to this value" from "clear".
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<FixedPoint>,
    pub old_price: Option<Option<FixedPoint>>,
    pub image_url: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
    /// Timestamp captured when the patch was created; always written.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            price: None,
            old_price: None,
            image_url: None,
            category: None,
            stock: None,
            is_active: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn price(mut self, price: FixedPoint) -> Self {
        self.price = Some(price);
        self
    }

    /// Update the previous price, using `None` to clear an existing value.
    pub fn old_price(mut self, old_price: Option<FixedPoint>) -> Self {
        self.old_price = Some(old_price);
        self
    }

    /// Update the image link, using `None` to clear an existing value.
    pub fn image_url(mut self, image_url: Option<impl Into<String>>) -> Self {
        self.image_url = Some(image_url.map(Into::into));
        self
    }

    /// Update the category, using `None` to clear an existing value.
    pub fn category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = Some(category.map(Into::into));
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Activate or deactivate the product.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Query definition used to list active products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    /// Optional exact seller filter.
    pub seller_id: Option<String>,
}

impl ProductListQuery {
    /// Construct a query over all active products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the results to products of a single seller.
    pub fn seller(mut self, seller_id: impl Into<String>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }
}
