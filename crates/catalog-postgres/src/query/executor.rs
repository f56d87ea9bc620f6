//! Execution of the engine's query shapes with positional binds.

use catalog_core::RowSource;
use catalog_core::model::ProductRow;
use catalog_core::query::{CountQuery, ExistsQuery, SelectQuery, SqlValue, Statement};
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Integer, Timestamptz};
use diesel_async::RunQueryDsl;

use crate::model::{CountRow, ExistsRow, JoinedProductRow};
use crate::{PgConn, PgConnection, PgError, PgResult, TRACING_TARGET_QUERY};

/// Turns a rendered statement into a query with its values bound in order.
pub fn bind_statement(statement: &Statement) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    let query = diesel::sql_query(statement.sql.as_str()).into_boxed::<Pg>();

    statement
        .values()
        .iter()
        .fold(query, |query, value| match *value {
            SqlValue::Integer(value) => query.bind::<Integer, _>(value),
            SqlValue::BigInt(value) => query.bind::<BigInt, _>(value),
            SqlValue::Timestamp(value) => {
                query.bind::<Timestamptz, _>(jiff_diesel::Timestamp::from(value))
            }
        })
}

/// Loads the joined rows of a rendered window statement.
pub(crate) async fn load_rows(
    conn: &mut PgConnection,
    statement: &Statement,
) -> PgResult<Vec<ProductRow>> {
    tracing::trace!(target: TRACING_TARGET_QUERY, statement = %statement, "Loading product rows");

    let rows = bind_statement(statement)
        .load::<JoinedProductRow>(conn)
        .await
        .map_err(PgError::from)?;

    Ok(rows.into_iter().map(ProductRow::from).collect())
}

impl RowSource for PgConn {
    async fn fetch_rows(&mut self, query: &SelectQuery) -> catalog_core::Result<Vec<ProductRow>> {
        let rows = load_rows(self, &query.render()).await?;
        Ok(rows)
    }

    async fn count_rows(&mut self, query: &CountQuery) -> catalog_core::Result<i64> {
        let conn: &mut PgConnection = self;
        let statement = query.render();
        tracing::trace!(target: TRACING_TARGET_QUERY, statement = %statement, "Counting products");

        let row = bind_statement(&statement)
            .get_result::<CountRow>(conn)
            .await
            .map_err(PgError::from)?;

        Ok(row.count)
    }

    async fn row_exists(&mut self, query: &ExistsQuery) -> catalog_core::Result<bool> {
        let conn: &mut PgConnection = self;
        let statement = query.render();
        tracing::trace!(target: TRACING_TARGET_QUERY, statement = %statement, "Probing for products");

        let row = bind_statement(&statement)
            .get_result::<ExistsRow>(conn)
            .await
            .map_err(PgError::from)?;

        Ok(row.found)
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::query::{Comparison, Conditions, Ordering};
    use catalog_core::types::{ProductFilter, SortOrder};
    use diesel::debug_query;

    use super::*;

    #[test]
    fn binds_follow_placeholder_order() {
        let filter = ProductFilter::new()
            .with_price_range(500, 3000)
            .with_brands([1, 2]);
        let boundary: jiff::Timestamp = "2022-05-26T13:29:16Z".parse().unwrap();
        let conditions = Conditions::from_filter(&filter)
            .with_boundary(Comparison::after(SortOrder::Desc), boundary);
        let statement = SelectQuery::new(conditions, Ordering::default())
            .with_limit(6)
            .render();

        let query = bind_statement(&statement);
        let rendered = debug_query::<Pg, _>(&query).to_string();

        assert!(rendered.starts_with(&statement.sql));
        assert!(rendered.contains("binds: [500, 3000, 1, 2, "));
        assert!(rendered.contains("6]"));
    }
}
