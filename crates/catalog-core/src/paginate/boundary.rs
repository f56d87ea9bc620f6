//! Detecting whether pages exist on either side of a window.

use super::RowSource;
use crate::model::Product;
use crate::query::CursorWindow;
use crate::types::{BoundaryStrategy, Cursor, CursorPosition, Cursors};
use crate::{Result, TRACING_TARGET_PAGINATION};

/// Whether products exist before and after a window, in presented order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boundaries {
    /// Some product precedes the first item.
    pub has_before: bool,
    /// Some product follows the last item.
    pub has_after: bool,
}

impl Boundaries {
    /// Derives the page cursors from the window's edge items.
    ///
    /// An empty window never has cursors.
    pub fn cursors(&self, items: &[Product]) -> Cursors {
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return Cursors::none();
        };

        Cursors {
            prev: self.has_before.then(|| Cursor::new(first.created_at)),
            next: self.has_after.then(|| Cursor::new(last.created_at)),
        }
    }
}

/// Resolves the boundaries of a window.
///
/// `items` is the collapsed window in presented order, already trimmed to
/// the limit. `overflow` tells whether an extra row was fetched beyond the
/// limit in the travel direction; it is only meaningful under
/// [`BoundaryStrategy::Overfetch`].
pub async fn resolve_boundaries<S>(
    source: &mut S,
    window: &CursorWindow,
    items: &[Product],
    overflow: bool,
) -> Result<Boundaries>
where
    S: RowSource,
{
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return Ok(Boundaries::default());
    };

    let pagination = window.pagination();
    let overfetch = pagination.strategy == BoundaryStrategy::Overfetch;

    let boundaries = match pagination.position {
        CursorPosition::First => {
            let has_after = if overfetch {
                overflow
            } else {
                source.row_exists(&window.probe_after(last)).await?
            };
            Boundaries {
                has_before: false,
                has_after,
            }
        }
        CursorPosition::Next(_) => {
            let has_after = if overfetch {
                overflow
            } else {
                source.row_exists(&window.probe_after(last)).await?
            };
            let has_before = source.row_exists(&window.probe_before(first)).await?;
            Boundaries {
                has_before,
                has_after,
            }
        }
        CursorPosition::Prev(_) => {
            let has_before = if overfetch {
                overflow
            } else {
                source.row_exists(&window.probe_before(first)).await?
            };
            let has_after = source.row_exists(&window.probe_after(last)).await?;
            Boundaries {
                has_before,
                has_after,
            }
        }
    };

    tracing::trace!(
        target: TRACING_TARGET_PAGINATION,
        has_before = boundaries.has_before,
        has_after = boundaries.has_after,
        "Resolved window boundaries"
    );

    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn product(id: i64, created_at: &str) -> Product {
        let created_at: Timestamp = created_at.parse().unwrap();
        Product::new(id, created_at, format!("P{id}"), 100)
    }

    #[test]
    fn empty_window_has_no_cursors() {
        let boundaries = Boundaries {
            has_before: true,
            has_after: true,
        };
        assert_eq!(boundaries.cursors(&[]), Cursors::none());
    }

    #[test]
    fn cursors_point_at_edges() {
        let items = vec![
            product(3, "2022-05-27T13:29:16Z"),
            product(2, "2022-05-26T13:29:16Z"),
        ];
        let boundaries = Boundaries {
            has_before: true,
            has_after: false,
        };

        let cursors = boundaries.cursors(&items);
        assert_eq!(cursors.prev, Some(Cursor::new(items[0].created_at)));
        assert_eq!(cursors.next, None);
    }
}
