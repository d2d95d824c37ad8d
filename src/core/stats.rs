use indexmap::IndexMap;

/// Min and max of the finite values, or `None` when there are none.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Arithmetic mean of the finite values, or `None` when there are none.
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Groups items by key, keeping keys in first-seen order and items in input order.
pub fn group_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> IndexMap<K, Vec<T>>
where
    K: std::hash::Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_and_mean_skip_non_finite_values() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent(Vec::new()), None);
        assert_eq!(mean([2.0, 4.0, f64::INFINITY]), Some(3.0));
        assert_eq!(mean(Vec::new()), None);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups = group_by_key(["b1", "a1", "b2", "c1", "a2"], |item| item.as_bytes()[0]);
        let keys: Vec<u8> = groups.keys().copied().collect();
        assert_eq!(keys, vec![b'b', b'a', b'c']);
        assert_eq!(groups[&b'b'], vec!["b1", "b2"]);
    }
}
