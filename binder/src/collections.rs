use std::{collections::HashMap, ops::Deref};

use crate::node::Slot;

/// A node with an identity key, e.g. the name of a reference.
pub trait Keyed {
    fn key(&self) -> Option<&str>;
}

/// A node whose content is given per language (`xml:lang`).
pub trait Localized {
    fn lang(&self) -> Option<&str>;
}

/// An ordered collection of keyed nodes.
///
/// Reading appends every occurrence, so duplicate keys survive parsing.
/// [`insert`](Self::insert) and [`dedup`](Self::dedup) apply last-wins,
/// first-position semantics.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Deref for KeyedCollection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Keyed> KeyedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replaces the first entry with the same key in place and drops any
    /// later ones; appends when the key is new or absent.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let Some(key) = item.key().map(str::to_owned) else {
            self.items.push(item);
            return None;
        };
        let Some(first) = self.position(&key) else {
            self.items.push(item);
            return None;
        };
        let previous = std::mem::replace(&mut self.items[first], item);
        let mut index = 0;
        self.items.retain(|entry| {
            let keep = index <= first || entry.key() != Some(key.as_str());
            index += 1;
            keep
        });
        Some(previous)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == Some(key))
    }

    /// The last entry with `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().rev().find(|item| item.key() == Some(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.items.iter_mut().rev().find(|item| item.key() == Some(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes every entry with `key`, returning them in order.
    pub fn remove(&mut self, key: &str) -> Vec<T> {
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.key() == Some(key));
        self.items = kept;
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(Keyed::key)
    }

    /// Collapses duplicate keys: each key keeps the position of its first
    /// occurrence and the value of its last. Entries without a key are kept.
    pub fn dedup(&mut self) {
        let mut first_index: HashMap<String, usize> = HashMap::new();
        let mut deduped: Vec<T> = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            match item.key().map(str::to_owned) {
                Some(key) => match first_index.get(&key) {
                    Some(&index) => deduped[index] = item,
                    None => {
                        first_index.insert(key, deduped.len());
                        deduped.push(item);
                    }
                },
                None => deduped.push(item),
            }
        }
        self.items = deduped;
    }
}

impl<T> KeyedCollection<T> {
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Keyed> FromIterator<T> for KeyedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for KeyedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a KeyedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Slot for KeyedCollection<T> {
    type Item = T;
    const SCALAR: bool = false;

    fn accept(&mut self, value: T, first: bool) {
        if first {
            self.items.clear();
        }
        self.items.push(value);
    }

    fn accept_nil(&mut self, first: bool) {
        if first {
            self.items.clear();
        }
    }

    fn values(&self) -> &[T] {
        &self.items
    }
}

/// Texts that differ by language, e.g. descriptions.
///
/// When read, the texts are assigned all at once after the parent element
/// has been scanned; two texts for the same language fail that assignment
/// and the previous content is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalizedList<T> {
    items: Vec<T>,
    staged: Option<Vec<T>>,
}

impl<T> Default for LocalizedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            staged: None,
        }
    }
}

impl<T> Deref for LocalizedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Localized> LocalizedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// The entry for `lang`; `None` selects the entry without a language.
    pub fn get(&self, lang: Option<&str>) -> Option<&T> {
        self.items.iter().find(|item| item.lang() == lang)
    }

    pub fn set(&mut self, items: Vec<T>) -> Result<(), String> {
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.lang() == item.lang()) {
                return Err(match item.lang() {
                    Some(lang) => format!("more than one entry for language {lang:?}"),
                    None => "more than one entry without a language".to_string(),
                });
            }
        }
        self.items = items;
        Ok(())
    }
}

impl<T: Localized> FromIterator<T> for LocalizedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            staged: None,
        }
    }
}

impl<T: Localized> Slot for LocalizedList<T> {
    type Item = T;
    const SCALAR: bool = false;

    fn accept(&mut self, value: T, first: bool) {
        if first {
            self.staged = Some(Vec::new());
        }
        self.staged.get_or_insert_with(Vec::new).push(value);
    }

    fn accept_nil(&mut self, first: bool) {
        if first {
            self.staged = Some(Vec::new());
        }
    }

    fn values(&self) -> &[T] {
        &self.items
    }

    fn finish(&mut self) -> Result<(), String> {
        match self.staged.take() {
            Some(staged) => self.set(staged),
            None => Ok(()),
        }
    }
}
