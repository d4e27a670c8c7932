//! Predicate builders over outcomes, for `query`, `filter` and `event_bind`.

/// Holds for outcomes equal to `value`.
pub fn just<T>(value: T) -> impl Fn(&T) -> bool + Clone
where
    T: PartialEq + Clone,
{
    move |outcome: &T| *outcome == value
}

/// Like [`just`] when a value is given, no constraint otherwise.
pub fn if_just<T>(value: Option<T>) -> impl Fn(&T) -> bool + Clone
where
    T: PartialEq + Clone,
{
    move |outcome: &T| match &value {
        Some(value) => outcome == value,
        None => true,
    }
}

/// Holds for outcomes contained in `values`.
pub fn one_of<T, I>(values: I) -> impl Fn(&T) -> bool + Clone
where
    T: PartialEq + Clone,
    I: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    move |outcome: &T| values.contains(outcome)
}

/// Holds for every outcome.
pub fn always<T>() -> impl Fn(&T) -> bool + Clone {
    |_: &T| true
}
