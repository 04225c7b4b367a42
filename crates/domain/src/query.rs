//! Dynamic predicates for listings.
//!
//! A listing filter is compiled into a [`PredicateSet`]: a conjunction of
//! `{field, comparison, value}` triples where absent filter values produce no
//! triple at all. Storage adapters translate the set into a `WHERE` clause;
//! in-memory stores evaluate it with [`PredicateSet::matches`] and
//! [`select_page`].

use std::cmp::Ordering;

use crate::page::{Page, PageRequest};
use crate::time::{LocalDateTime, Timestamp};

/// How a record's value is compared against the predicate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Case-insensitive substring containment.
    ContainsIgnoreCase,
    Equals,
    /// Record value `>=` predicate value.
    AtLeast,
    /// Record value `<=` predicate value.
    AtMost,
}

/// A comparable value, either held by a record or carried by a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Uuid(uuid::Uuid),
    DateTime(LocalDateTime),
}

impl Value {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<LocalDateTime> for Value {
    fn from(value: LocalDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Case folding applied to both sides of a `ContainsIgnoreCase` comparison.
///
/// Storage adapters fold stored text with this same function so every
/// listing agrees on which records match.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

impl Comparison {
    /// Whether `actual` (from a record) satisfies this comparison against `expected`.
    ///
    /// Values of different kinds never match.
    #[must_use]
    pub fn holds(self, actual: &Value, expected: &Value) -> bool {
        match self {
            Self::ContainsIgnoreCase => match (actual, expected) {
                (Value::Text(actual), Value::Text(expected)) => {
                    fold_case(actual).contains(&fold_case(expected))
                }
                _ => false,
            },
            Self::Equals => actual == expected,
            Self::AtLeast => matches!(
                actual.compare(expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::AtMost => matches!(
                actual.compare(expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

/// One `{field, comparison, value}` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<F> {
    pub field: F,
    pub comparison: Comparison,
    pub value: Value,
}

/// A conjunction of predicates over the fields `F` of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateSet<F> {
    predicates: Vec<Predicate<F>>,
}

impl<F> Default for PredicateSet<F> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<F: Copy> PredicateSet<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate that always applies, such as an owner scope.
    #[must_use]
    pub fn require(mut self, field: F, comparison: Comparison, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field,
            comparison,
            value: value.into(),
        });
        self
    }

    /// Add a predicate only when `value` is present.
    #[must_use]
    pub fn optional<V: Into<Value>>(self, field: F, comparison: Comparison, value: Option<V>) -> Self {
        match value {
            Some(value) => self.require(field, comparison, value),
            None => self,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate<F>> {
        self.predicates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether `record` satisfies every predicate.
    ///
    /// A field the record does not hold (`None`) fails any predicate on it.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Queryable<Field = F>,
    {
        self.predicates.iter().all(|predicate| {
            record
                .value_of(predicate.field)
                .is_some_and(|actual| predicate.comparison.holds(&actual, &predicate.value))
        })
    }
}

impl<'a, F> IntoIterator for &'a PredicateSet<F> {
    type Item = &'a Predicate<F>;
    type IntoIter = std::slice::Iter<'a, Predicate<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

/// A record that can be filtered by a [`PredicateSet`] without a database.
pub trait Queryable {
    type Field: Copy;

    /// The value held in `field`, if any.
    fn value_of(&self, field: Self::Field) -> Option<Value>;

    /// Listing order key: creation instant, then id. Listings sort on it descending.
    fn listing_key(&self) -> (Timestamp, uuid::Uuid);
}

/// Filter `records`, order them newest first and cut the requested page.
///
/// `total` counts every matching record, not only the returned page.
pub fn select_page<R>(
    records: impl IntoIterator<Item = R>,
    predicates: &PredicateSet<R::Field>,
    request: &PageRequest,
) -> Page<R>
where
    R: Queryable,
{
    let mut matched: Vec<R> = records
        .into_iter()
        .filter(|record| predicates.matches(record))
        .collect();
    matched.sort_by_key(|record| std::cmp::Reverse(record.listing_key()));

    let total = u64::try_from(matched.len()).unwrap_or(u64::MAX);
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
    let items = matched.into_iter().skip(skip).take(take).collect();
    Page::new(items, total, request)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Owner,
        At,
        Nickname,
    }

    #[derive(Debug, Clone)]
    struct Row {
        id: uuid::Uuid,
        name: String,
        owner: uuid::Uuid,
        at: LocalDateTime,
        created_at: Timestamp,
    }

    impl Queryable for Row {
        type Field = Field;

        fn value_of(&self, field: Field) -> Option<Value> {
            match field {
                Field::Name => Some(self.name.clone().into()),
                Field::Owner => Some(self.owner.into()),
                Field::At => Some(self.at.into()),
                Field::Nickname => None,
            }
        }

        fn listing_key(&self) -> (Timestamp, uuid::Uuid) {
            (self.created_at, self.id)
        }
    }

    fn row(n: u32, name: &str, owner: uuid::Uuid) -> Row {
        Row {
            id: uuid::Uuid::from_u128(u128::from(n)),
            name: name.to_string(),
            owner,
            at: NaiveDate::from_ymd_opt(2025, 9, n)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, n, 0, 0, 0).unwrap(),
        }
    }

    fn rows() -> (uuid::Uuid, Vec<Row>) {
        let owner = uuid::Uuid::from_u128(100);
        let other = uuid::Uuid::from_u128(200);
        (
            owner,
            vec![
                row(1, "Alice Cardio", owner),
                row(2, "Bob Neuro", owner),
                row(3, "Carol cardio", other),
                row(4, "Dan Derm", owner),
            ],
        )
    }

    #[test]
    fn should_match_everything_when_set_is_empty() {
        let (_, rows) = rows();
        let set = PredicateSet::<Field>::new();
        assert!(rows.iter().all(|r| set.matches(r)));
    }

    #[test]
    fn should_skip_absent_optional_values() {
        let set = PredicateSet::<Field>::new()
            .optional::<String>(Field::Name, Comparison::ContainsIgnoreCase, None)
            .optional(Field::Name, Comparison::ContainsIgnoreCase, Some("x"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn should_match_substring_ignoring_case() {
        let (_, rows) = rows();
        let set = PredicateSet::new().require(Field::Name, Comparison::ContainsIgnoreCase, "CARDIO");
        let names: Vec<_> = rows
            .iter()
            .filter(|r| set.matches(*r))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice Cardio", "Carol cardio"]);
    }

    #[test]
    fn should_fold_accented_letters_when_matching() {
        let name = Value::from("Émile Zola");
        assert!(Comparison::ContainsIgnoreCase.holds(&name, &Value::from("émile")));
        assert!(Comparison::ContainsIgnoreCase.holds(&name, &Value::from("ÉMILE")));
        assert_eq!(fold_case("ÉMILE Ünal"), "émile ünal");
    }

    #[test]
    fn should_combine_predicates_with_and() {
        let (owner, rows) = rows();
        let set = PredicateSet::new()
            .require(Field::Owner, Comparison::Equals, owner)
            .require(Field::Name, Comparison::ContainsIgnoreCase, "cardio");
        assert_eq!(rows.iter().filter(|r| set.matches(*r)).count(), 1);
    }

    #[test]
    fn should_apply_inclusive_date_time_bounds() {
        let (_, rows) = rows();
        let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        let set = PredicateSet::new()
            .require(Field::At, Comparison::AtLeast, crate::time::start_of_day(day(2)))
            .require(Field::At, Comparison::AtMost, crate::time::end_of_day(day(3)));
        let ids: Vec<_> = rows
            .iter()
            .filter(|r| set.matches(*r))
            .map(|r| r.id.as_u128())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn should_fail_predicate_on_field_record_does_not_hold() {
        let (_, rows) = rows();
        let set = PredicateSet::new().require(Field::Nickname, Comparison::ContainsIgnoreCase, "");
        assert!(!rows.iter().any(|r| set.matches(r)));
    }

    #[test]
    fn should_never_match_values_of_different_kinds() {
        let text = Value::from("2025");
        let uuid = Value::from(uuid::Uuid::nil());
        assert!(!Comparison::Equals.holds(&text, &uuid));
        assert!(!Comparison::AtLeast.holds(&text, &uuid));
        assert!(!Comparison::ContainsIgnoreCase.holds(&uuid, &text));
    }

    #[test]
    fn should_order_newest_first_and_count_all_matches() {
        let (owner, rows) = rows();
        let set = PredicateSet::new().require(Field::Owner, Comparison::Equals, owner);
        let page = select_page(rows, &set, &PageRequest::new(0, 2).unwrap());
        let ids: Vec<_> = page.items.iter().map(|r| r.id.as_u128()).collect();
        assert_eq!(ids, vec![4, 2]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn should_return_all_matches_when_page_size_equals_total() {
        let (_, rows) = rows();
        let page = select_page(rows, &PredicateSet::new(), &PageRequest::new(0, 4).unwrap());
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total, 4);
    }

    #[test]
    fn should_return_empty_page_past_the_end() {
        let (_, rows) = rows();
        let page = select_page(rows, &PredicateSet::new(), &PageRequest::new(5, 2).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }

    #[test]
    fn should_break_creation_ties_by_id_descending() {
        let (owner, mut rows) = rows();
        for r in &mut rows {
            r.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            r.owner = owner;
        }
        let first = select_page(rows.clone(), &PredicateSet::new(), &PageRequest::default());
        let second = select_page(rows, &PredicateSet::new(), &PageRequest::default());
        let ids: Vec<_> = first.items.iter().map(|r| r.id.as_u128()).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(
            ids,
            second.items.iter().map(|r| r.id.as_u128()).collect::<Vec<_>>()
        );
    }
}
