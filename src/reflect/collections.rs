use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use super::{Reflect, Shape, Target};

/// Zero-valued placeholder used to type empty collections and empty pointers.
pub(crate) fn zero<T: Reflect + Default + 'static>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

fn list<'a, T: Reflect + Default + 'static>(
    fixed: bool,
    items: impl Iterator<Item = &'a T>,
) -> Shape<'a> {
    Shape::List {
        fixed,
        elements: items.map(|item| Target::Borrowed(item as &dyn Reflect)).collect(),
        zero: zero::<T>,
    }
}

impl<T: Reflect + Default + 'static> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        list(false, self.iter())
    }
}

impl<T: Reflect + Default + 'static> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        list(false, self.iter())
    }
}

impl<T: Reflect + Default + 'static, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        list(true, self.iter())
    }
}

// ---- Maps ----

fn map<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Shape<'a>
where
    K: Reflect + Default + ToString + 'static,
    V: Reflect + 'a,
{
    Shape::Map {
        key: K::default().shape().kind(),
        key_type: Cow::Borrowed(std::any::type_name::<K>()),
        entries: entries
            .map(|(k, v)| (k.to_string(), Target::Borrowed(v as &dyn Reflect)))
            .collect(),
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + Default + ToString + 'static,
    V: Reflect,
    S: BuildHasher,
{
    fn shape(&self) -> Shape<'_> {
        map(self.iter())
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Default + ToString + 'static,
    V: Reflect,
{
    fn shape(&self) -> Shape<'_> {
        map(self.iter())
    }
}

impl<K, V, S> Reflect for IndexMap<K, V, S>
where
    K: Reflect + Default + ToString + 'static,
    V: Reflect,
    S: BuildHasher,
{
    fn shape(&self) -> Shape<'_> {
        map(self.iter())
    }
}
