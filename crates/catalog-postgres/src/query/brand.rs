//! Brand repository.

use std::future::Future;

use catalog_core::model::{Brand, BrandId};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{BrandRecord, NewBrand};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for brand database operations.
pub trait BrandRepository {
    /// Creates a new brand and returns it with its assigned id.
    fn insert_brand(&mut self, new_brand: NewBrand) -> impl Future<Output = PgResult<Brand>> + Send;

    /// Finds a brand by id.
    fn find_brand_by_id(
        &mut self,
        brand_id: BrandId,
    ) -> impl Future<Output = PgResult<Option<Brand>>> + Send;
}

impl BrandRepository for PgConnection {
    async fn insert_brand(&mut self, new_brand: NewBrand) -> PgResult<Brand> {
        use schema::brands;

        let brand = diesel::insert_into(brands::table)
            .values(&new_brand)
            .returning(BrandRecord::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, brand_id = brand.id, "Brand inserted");
        Ok(brand.into())
    }

    async fn find_brand_by_id(&mut self, brand_id: BrandId) -> PgResult<Option<Brand>> {
        use schema::brands::dsl::*;

        let brand = brands
            .filter(id.eq(brand_id.0))
            .select(BrandRecord::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(brand.map(Brand::from))
    }
}
