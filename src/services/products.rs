use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{CreateProductPayload, UpdateProductPayload, product_id_from_query};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the read operation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductsQuery {
    /// Fetch a single product instead of listing.
    pub id: Option<String>,
    /// Restrict the listing to one seller.
    pub seller_id: Option<String>,
}

impl ProductsQuery {
    /// Pick the recognised keys out of raw query-string parameters; empty values count as absent.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            params
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
        };
        Self {
            id: non_empty("id"),
            seller_id: non_empty("seller_id"),
        }
    }
}

/// Outcome of the read operation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProductsResponse {
    One(ProductView),
    Many(Vec<ProductView>),
}

/// Either fetches the product named by `id` or lists active products.
pub fn load_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<ProductsResponse>
where
    R: ProductReader + ?Sized,
{
    let id = match query.id.as_deref() {
        Some(raw) => product_id_from_query(raw)?,
        None => None,
    };

    match id {
        Some(id) => fetch_product(repo, id).map(ProductsResponse::One),
        None => {
            let mut list_query = ProductListQuery::new();
            if let Some(seller_id) = query.seller_id {
                list_query = list_query.seller(seller_id);
            }
            list_products(repo, list_query).map(ProductsResponse::Many)
        }
    }
}

/// Fetches a single product, active or not.
pub fn fetch_product<R>(repo: &R, id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(id)?
        .map(ProductView::from)
        .ok_or(ServiceError::NotFound)
}

/// Lists active products, newest first.
pub fn list_products<R>(repo: &R, query: ProductListQuery) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products(query)?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// Creates a product from a JSON request body.
pub fn create_product<R>(repo: &R, body: &str) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    let payload = CreateProductPayload::from_json(body)?;
    let new_product = payload.into_new_product()?;

    let created = repo.create_product(&new_product)?;
    log::debug!(
        "Created product {} for seller {} at {}",
        created.id,
        created.seller_id,
        created.price
    );

    Ok(created.into())
}

/// Applies a partial update described by a JSON request body.
pub fn update_product<R>(repo: &R, body: &str) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    let payload = UpdateProductPayload::from_json(body)?;
    let (product_id, updates) = payload.into_update()?;

    let updated = repo.update_product(product_id, &updates)?;
    log::debug!("Updated product {product_id}");

    Ok(updated.into())
}

/// JSON shape of a product in responses.
///
/// Decimal fields are rendered as numbers; `old_price` and `rating` are
/// omitted rather than rendered as zero when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub reviews_count: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let Product {
            id,
            seller_id,
            name,
            description,
            price,
            old_price,
            image_url,
            category,
            stock,
            rating,
            reviews_count,
            is_active,
            created_at,
            updated_at,
        } = product;

        Self {
            id,
            seller_id,
            name,
            description,
            price: price.to_f64(),
            old_price: old_price.map(|value| value.to_f64()),
            image_url,
            category,
            stock,
            rating: rating.map(|value| value.to_f64()),
            reviews_count,
            is_active,
            created_at,
            updated_at,
        }
    }
}
