use mockall::mock;

use super::{ProductReader, ProductWriter};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    }
}

/// Repository double combining the reader and writer mocks.
pub struct MockRepository {
    pub reader: MockProductReader,
    pub writer: MockProductWriter,
}

impl MockRepository {
    /// Mocks with no expectations: any call panics.
    pub fn new() -> Self {
        Self {
            reader: MockProductReader::new(),
            writer: MockProductWriter::new(),
        }
    }
}

impl ProductReader for MockRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        self.reader.get_product_by_id(id)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        self.reader.list_products(query)
    }
}

impl ProductWriter for MockRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        self.writer.create_product(new_product)
    }

    fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product> {
        self.writer.update_product(product_id, updates)
    }
}
