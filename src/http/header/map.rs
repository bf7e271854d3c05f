use super::name::{Caseless, HeaderName};

use std::fmt;
use std::iter::FromIterator;

use indexmap::map::{self, IndexMap};

/// A multi-valued map of HTTP headers.
///
/// Names are matched case-insensitively, and the casing of the first
/// insertion is the one reported by [`iter`](HeaderMap::iter). Names keep
/// their first-insertion order, and each name's values keep the order
/// they were added in.
#[derive(Clone)]
pub struct HeaderMap<V> {
    map: IndexMap<HeaderName, Vec<V>>,
}

impl<V> HeaderMap<V> {
    pub fn new() -> HeaderMap<V> {
        HeaderMap {
            map: IndexMap::with_capacity(16),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&Caseless(name))
    }

    /// The number of distinct header names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns every value of the header, in insertion order.
    pub fn get(&self, name: &str) -> Option<&[V]> {
        self.map.get(&Caseless(name)).map(Vec::as_slice)
    }

    /// Returns the first value of the header.
    pub fn first(&self, name: &str) -> Option<&V> {
        self.get(name).and_then(<[V]>::first)
    }

    /// Adds a value to the header, keeping any existing values.
    pub fn append(&mut self, name: impl Into<HeaderName>, value: impl Into<V>) {
        match self.map.entry(name.into()) {
            map::Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            map::Entry::Vacant(entry) => {
                entry.insert(vec![value.into()]);
            }
        }
    }

    /// Replaces all values of the header with a single value.
    ///
    /// Returns the values that were replaced.
    pub fn insert(&mut self, name: impl Into<HeaderName>, value: impl Into<V>) -> Option<Vec<V>> {
        self.map.insert(name.into(), vec![value.into()])
    }

    /// Removes the header, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<V>> {
        self.map.shift_remove(&Caseless(name))
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over header names and their values, in the order the
    /// names were first added.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.map.iter(),
        }
    }

    /// Converts every value, keeping names and ordering.
    pub fn map_values<U, F>(&self, mut f: F) -> HeaderMap<U>
    where
        F: FnMut(&V) -> U,
    {
        HeaderMap {
            map: self
                .map
                .iter()
                .map(|(name, values)| (name.clone(), values.iter().map(&mut f).collect()))
                .collect(),
        }
    }
}

impl<V> Default for HeaderMap<V> {
    fn default() -> Self {
        HeaderMap::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HeaderMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for HeaderMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<N, V, T> FromIterator<(N, T)> for HeaderMap<V>
where
    N: Into<HeaderName>,
    T: Into<V>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
    {
        let mut map = HeaderMap::new();
        map.extend(iter);
        map
    }
}

impl<N, V, T> Extend<(N, T)> for HeaderMap<V>
where
    N: Into<HeaderName>,
    T: Into<V>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (N, T)>,
    {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a HeaderMap<V> {
    type Item = (&'a HeaderName, &'a [V]);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`HeaderMap`].
pub struct Iter<'a, V> {
    inner: map::Iter<'a, HeaderName, Vec<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a HeaderName, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, values)| (name, values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
