//! Product repository.
//!
//! Single-entity reads load the same joined row shape the pagination
//! queries use and fold it with the same collapser, so a product looks
//! identical whether it was fetched alone or as part of a page.

use std::future::Future;

use catalog_core::model::{Product, ProductId, Variation};
use catalog_core::paginate::collapse_rows;
use catalog_core::query::{
    Conditions, Ordering, PRODUCT_ROW_COLUMNS, Params, SelectQuery, Statement,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use super::executor::load_rows;
use crate::model::{
    BrandRecord, NewProduct, NewProductVariation, NewVariation, ProductRecord,
    ProductVariationRecord, VariationRecord,
};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, scoped_transaction, schema};

/// Unique index that keeps `products.created_at` usable as a cursor key.
pub const PRODUCTS_CREATED_AT_KEY: &str = "products_created_at_key";

/// Repository for product database operations.
pub trait ProductRepository {
    /// Creates a new product and returns it with its id and brand.
    ///
    /// Fails with a unique violation on [`PRODUCTS_CREATED_AT_KEY`] when
    /// another product already has the same `created_at`.
    fn insert_product(
        &mut self,
        new_product: NewProduct,
    ) -> impl Future<Output = PgResult<Product>> + Send;

    /// Finds a product by id, with its brand and variations.
    fn find_product_by_id(
        &mut self,
        product_id: ProductId,
    ) -> impl Future<Output = PgResult<Option<Product>>> + Send;

    /// Creates a variation and attaches it to a product with the given stock.
    ///
    /// Both inserts run in one transaction.
    fn insert_product_variation(
        &mut self,
        product_id: ProductId,
        name: String,
        quantity: i32,
    ) -> impl Future<Output = PgResult<Variation>> + Send;

    /// Deletes a product and its variation links in one transaction.
    ///
    /// Returns whether a product was deleted.
    fn delete_product(
        &mut self,
        product_id: ProductId,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists every product, newest first, with brands and variations.
    fn list_products(&mut self) -> impl Future<Output = PgResult<Vec<Product>>> + Send;
}

/// Renders the joined lookup of a single product.
fn product_by_id_statement(product_id: ProductId) -> Statement {
    let mut params = Params::new();
    let placeholder = params.push(product_id.0);
    let sql = format!(
        "SELECT {PRODUCT_ROW_COLUMNS} FROM products AS p \
         LEFT JOIN brands AS b ON b.id = p.brand_id \
         LEFT JOIN product_variations AS pv ON pv.product_id = p.id \
         LEFT JOIN variations AS v ON v.id = pv.variation_id \
         WHERE p.id = {placeholder} ORDER BY pv.id ASC"
    );

    Statement { sql, params }
}

impl ProductRepository for PgConnection {
    async fn insert_product(&mut self, new_product: NewProduct) -> PgResult<Product> {
        use schema::{brands, products};

        let record = diesel::insert_into(products::table)
            .values(&new_product)
            .returning(ProductRecord::as_returning())
            .get_result(self)
            .await
            .map_err(|err| {
                let err = PgError::from(err);
                if err.constraint() == Some(PRODUCTS_CREATED_AT_KEY) {
                    tracing::warn!(
                        target: TRACING_TARGET_QUERY,
                        "Rejected product with a duplicate created_at"
                    );
                }
                err
            })?;

        let brand = match record.brand_id {
            Some(brand_id) => brands::table
                .find(brand_id)
                .select(BrandRecord::as_select())
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?,
            None => None,
        };

        tracing::debug!(target: TRACING_TARGET_QUERY, product_id = record.id, "Product inserted");

        let mut product = Product::from(record);
        product.brand = brand.map(Into::into);
        Ok(product)
    }

    async fn find_product_by_id(&mut self, product_id: ProductId) -> PgResult<Option<Product>> {
        let rows = load_rows(self, &product_by_id_statement(product_id)).await?;
        Ok(collapse_rows(rows).into_iter().next())
    }

    async fn insert_product_variation(
        &mut self,
        product_id: ProductId,
        name: String,
        quantity: i32,
    ) -> PgResult<Variation> {
        use schema::{product_variations, variations};

        let variation = scoped_transaction(self, |conn| {
            async move {
                let variation = diesel::insert_into(variations::table)
                    .values(&NewVariation { name })
                    .returning(VariationRecord::as_returning())
                    .get_result(conn)
                    .await?;

                let link = diesel::insert_into(product_variations::table)
                    .values(&NewProductVariation {
                        quantity,
                        product_id: product_id.0,
                        variation_id: variation.id,
                    })
                    .returning(ProductVariationRecord::as_returning())
                    .get_result(conn)
                    .await?;

                Ok::<_, PgError>(link.into_variation(variation))
            }
            .scope_boxed()
        })
        .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            product_id = product_id.0,
            variation_id = variation.id.0,
            "Product variation inserted"
        );

        Ok(variation)
    }

    async fn delete_product(&mut self, product_id: ProductId) -> PgResult<bool> {
        use schema::{product_variations, products};

        let deleted = scoped_transaction(self, |conn| {
            async move {
                diesel::delete(
                    product_variations::table
                        .filter(product_variations::product_id.eq(product_id.0)),
                )
                .execute(conn)
                .await?;

                let deleted = diesel::delete(products::table.find(product_id.0))
                    .execute(conn)
                    .await?;

                Ok::<_, PgError>(deleted > 0)
            }
            .scope_boxed()
        })
        .await?;

        tracing::debug!(target: TRACING_TARGET_QUERY, product_id = product_id.0, deleted, "Product deleted");
        Ok(deleted)
    }

    async fn list_products(&mut self) -> PgResult<Vec<Product>> {
        let statement = SelectQuery::new(Conditions::default(), Ordering::default()).render();
        let rows = load_rows(self, &statement).await?;
        Ok(collapse_rows(rows))
    }
}
