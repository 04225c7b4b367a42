//! Paginated listing shared by every repository.
//!
//! A [`PredicateSet`] is compiled into a `WHERE` clause twice from the same
//! predicates: once for the page itself and once for the `COUNT(*)` of all
//! matching rows.
//!
//! `LOWER` in `SQLite` only folds ASCII, so text searched ignoring case is
//! stored a second time, folded with [`fold_case`], and the needle is folded
//! the same way before it is bound.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use clinic_domain::page::{Page, PageRequest};
use clinic_domain::query::{Comparison, PredicateSet, Value, fold_case};

use crate::codec;
use crate::error::StorageError;

/// Maps a domain field onto the SQL expression it is filtered on.
pub(crate) trait Column: Copy {
    fn column(self) -> &'static str;

    /// Column holding the [`fold_case`] copy of the field, searched by
    /// [`Comparison::ContainsIgnoreCase`].
    fn folded_column(self) -> &'static str;
}

/// The fixed parts of one entity's listing queries.
pub(crate) struct Listing {
    /// `SELECT … FROM …` with joins, without a `WHERE` clause.
    pub select: &'static str,
    /// `SELECT COUNT(*) FROM …` over the same joins.
    pub count: &'static str,
    /// Creation time column, listings are ordered on it descending.
    pub created_at: &'static str,
    /// Primary key column, breaks creation time ties.
    pub id: &'static str,
}

/// Run the page and count queries for `predicates`.
pub(crate) async fn find_page<F, W>(
    pool: &SqlitePool,
    listing: &Listing,
    predicates: &PredicateSet<F>,
    page: &PageRequest,
) -> Result<Page<W>, StorageError>
where
    F: Column,
    W: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut select = QueryBuilder::<Sqlite>::new(listing.select);
    push_where(&mut select, predicates);
    select
        .push(" ORDER BY ")
        .push(listing.created_at)
        .push(" DESC, ")
        .push(listing.id)
        .push(" DESC LIMIT ");
    select.push_bind(i64::from(page.page_size()));
    select.push(" OFFSET ");
    select.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
    let items: Vec<W> = select.build_query_as().fetch_all(pool).await?;

    let mut count = QueryBuilder::<Sqlite>::new(listing.count);
    push_where(&mut count, predicates);
    let (total,): (i64,) = count.build_query_as().fetch_one(pool).await?;

    Ok(Page::new(
        items,
        u64::try_from(total).unwrap_or_default(),
        page,
    ))
}

fn push_where<F: Column>(builder: &mut QueryBuilder<'_, Sqlite>, predicates: &PredicateSet<F>) {
    for (index, predicate) in predicates.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        let column = predicate.field.column();
        match predicate.comparison {
            Comparison::ContainsIgnoreCase => {
                builder.push(predicate.field.folded_column()).push(" LIKE ");
                builder.push_bind(contains_pattern(&predicate.value));
                builder.push(" ESCAPE '\\'");
            }
            Comparison::Equals => {
                builder.push(column).push(" = ");
                builder.push_bind(encode(&predicate.value));
            }
            Comparison::AtLeast => {
                builder.push(column).push(" >= ");
                builder.push_bind(encode(&predicate.value));
            }
            Comparison::AtMost => {
                builder.push(column).push(" <= ");
                builder.push_bind(encode(&predicate.value));
            }
        }
    }
}

/// Encode a predicate value the same way the column stores it.
fn encode(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Uuid(uuid) => uuid.to_string(),
        Value::DateTime(at) => codec::encode_local(*at),
    }
}

/// `%needle%`, case-folded, with LIKE wildcards in the needle escaped.
fn contains_pattern(value: &Value) -> String {
    let needle = fold_case(&encode(value));
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
