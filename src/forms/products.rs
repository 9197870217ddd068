use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::fixed_point::FixedPoint;
use crate::domain::product::{NewProduct, UpdateProduct};

/// Result type returned by the product payload helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while turning a request body into domain values.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// A required create field is absent or null.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// The update body does not identify a product.
    #[error("Product ID is required")]
    MissingId,
    /// A non-nullable column was explicitly set to null in an update.
    #[error("Field cannot be null: {0}")]
    NullField(&'static str),
    /// The body is not valid JSON or has values of the wrong type.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// A product id that is neither an integer nor a numeric string.
    #[error("invalid product id `{0}`")]
    InvalidId(String),
    /// A decimal field that cannot be represented with two fractional digits.
    #[error("invalid value for {field}: {value}")]
    InvalidDecimal { field: &'static str, value: f64 },
}

/// Required create fields in the order they are reported when missing.
const REQUIRED_FIELDS: [&str; 3] = ["seller_id", "name", "price"];

/// JSON body accepted by the create operation.
#[derive(Debug, Deserialize)]
pub struct CreateProductPayload {
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub old_price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i32>,
}

impl CreateProductPayload {
    /// Parse a raw request body.
    ///
    /// Missing required fields are reported before any value is type-checked.
    pub fn from_json(body: &str) -> ProductFormResult<Self> {
        let body = json_object(body)?;
        if let Some(missing) = REQUIRED_FIELDS
            .into_iter()
            .find(|field| body.get(*field).is_none_or(Value::is_null))
        {
            return Err(ProductFormError::MissingField(missing));
        }
        Ok(serde_json::from_value(Value::Object(body))?)
    }

    /// Converts the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        let price = parse_decimal("price", self.price)?;
        let old_price = self
            .old_price
            .map(|value| parse_decimal("old_price", value))
            .transpose()?;

        Ok(NewProduct::new(self.seller_id, self.name, price)
            .with_description(self.description)
            .with_old_price(old_price)
            .with_image_url(self.image_url)
            .with_category(self.category)
            .with_stock(self.stock.unwrap_or(0)))
    }
}

/// JSON body accepted by the update operation.
///
/// Every field is `Option<Option<T>>`: the outer layer records whether the key
/// was present, the inner one whether it was null.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductPayload {
    #[serde(skip)]
    pub id: i32,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub old_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub stock: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub is_active: Option<Option<bool>>,
}

impl UpdateProductPayload {
    /// Parse a raw request body.
    ///
    /// The id is resolved before the remaining fields are type-checked.
    pub fn from_json(body: &str) -> ProductFormResult<Self> {
        let mut body = json_object(body)?;
        let id = product_id_from_value(body.remove("id").as_ref())?;
        let mut payload: Self = serde_json::from_value(Value::Object(body))?;
        payload.id = id;
        Ok(payload)
    }

    /// Split the payload into the target id and the patch to apply to it.
    pub fn into_update(self) -> ProductFormResult<(i32, UpdateProduct)> {
        let mut updates = UpdateProduct::new();
        updates.name = required("name", self.name)?;
        updates.description = self.description;
        updates.price = required("price", self.price)?
            .map(|value| parse_decimal("price", value))
            .transpose()?;
        updates.old_price = self
            .old_price
            .map(|value| value.map(|v| parse_decimal("old_price", v)).transpose())
            .transpose()?;
        updates.image_url = self.image_url;
        updates.category = self.category;
        updates.stock = required("stock", self.stock)?;
        updates.is_active = required("is_active", self.is_active)?;

        Ok((self.id, updates))
    }
}

/// Parse the `id` query parameter of a fetch request.
///
/// Returns `Ok(None)` when the parameter is empty and the request should list instead.
pub fn product_id_from_query(raw: &str) -> ProductFormResult<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| ProductFormError::InvalidId(raw.to_string()))
}

/// Accepts integers and numeric strings; `null`, `0`, `""` and `false` count as missing.
fn product_id_from_value(value: Option<&Value>) -> ProductFormResult<i32> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(ProductFormError::MissingId),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(0) => Err(ProductFormError::MissingId),
            Some(id) => i32::try_from(id).map_err(|_| ProductFormError::InvalidId(id.to_string())),
            None => Err(ProductFormError::InvalidId(number.to_string())),
        },
        Some(Value::String(raw)) => match product_id_from_query(raw)? {
            None | Some(0) => Err(ProductFormError::MissingId),
            Some(id) => Ok(id),
        },
        Some(other) => Err(ProductFormError::InvalidId(other.to_string())),
    }
}

/// Parse a body that must be a JSON object.
fn json_object(body: &str) -> ProductFormResult<Map<String, Value>> {
    Ok(serde_json::from_str(body)?)
}

/// Reject an explicit null on a non-nullable column.
fn required<T>(field: &'static str, value: Option<Option<T>>) -> ProductFormResult<Option<T>> {
    match value {
        Some(None) => Err(ProductFormError::NullField(field)),
        Some(Some(value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

fn parse_decimal(field: &'static str, value: f64) -> ProductFormResult<FixedPoint> {
    FixedPoint::from_f64(value).ok_or(ProductFormError::InvalidDecimal { field, value })
}

/// Deserialize a key that is present, keeping an explicit null as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
