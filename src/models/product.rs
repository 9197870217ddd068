use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::fixed_point::FixedPoint;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub old_price: Option<i64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: i32,
    pub rating: Option<i64>,
    pub reviews_count: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub seller_id: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: i64,
    pub old_price: Option<i64>,
    pub image_url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Absent fields are skipped by the changeset; `Some(None)` writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub price: Option<i64>,
    pub old_price: Option<Option<i64>>,
    pub image_url: Option<Option<&'a str>>,
    pub category: Option<Option<&'a str>>,
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            seller_id: value.seller_id,
            name: value.name,
            description: value.description,
            price: FixedPoint::from_hundredths(value.price),
            old_price: value.old_price.map(FixedPoint::from_hundredths),
            image_url: value.image_url,
            category: value.category,
            stock: value.stock,
            rating: value.rating.map(FixedPoint::from_hundredths),
            reviews_count: value.reviews_count,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            seller_id: value.seller_id.as_str(),
            name: value.name.as_str(),
            description: value.description.as_deref(),
            price: value.price.hundredths(),
            old_price: value.old_price.map(FixedPoint::hundredths),
            image_url: value.image_url.as_deref(),
            category: value.category.as_deref(),
            stock: value.stock,
            created_at: value.created_at,
            updated_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value.description.as_ref().map(Option::as_deref),
            price: value.price.map(FixedPoint::hundredths),
            old_price: value.old_price.map(|price| price.map(FixedPoint::hundredths)),
            image_url: value.image_url.as_ref().map(Option::as_deref),
            category: value.category.as_ref().map(Option::as_deref),
            stock: value.stock,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
