//! Ordered value model for old-style property lists.
//!
//! Project descriptors are old-style (NeXTSTEP) property lists.
//! Dictionaries keep their entries in document order and atoms carry the
//! `/* ... */` annotation Xcode prints after identifiers, so a parsed
//! document can be rendered back without losing record ordering.

/// A scalar token with its optional trailing annotation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub text: String,
    pub annotation: Option<String>,
}

impl Atom {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotation: None,
        }
    }

    pub fn annotated(text: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotation: Some(annotation.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Atom(Atom),
    Array(Vec<Value>),
    Dict(Dict),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::Atom(Atom::new(text))
    }

    pub fn annotated(text: impl Into<String>, annotation: impl Into<String>) -> Self {
        Value::Atom(Atom::annotated(text, annotation))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Value::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_atom().map(|a| a.text.as_str())
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Atom,
    pub value: Value,
}

/// An insertion-ordered dictionary. Lookups scan linearly; descriptor
/// object tables are small enough that this never matters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dict {
    entries: Vec<Entry>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.key.text == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|e| e.key.text == key)
            .map(|e| &mut e.value)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        self.get(key)?.as_array()
    }

    pub fn get_array_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        self.get_mut(key)?.as_array_mut()
    }

    pub fn get_dict(&self, key: &str) -> Option<&Dict> {
        self.get(key)?.as_dict()
    }

    pub fn get_dict_mut(&mut self, key: &str) -> Option<&mut Dict> {
        self.get_mut(key)?.as_dict_mut()
    }

    /// Appends an entry at the end.
    pub fn push(&mut self, key: Atom, value: Value) {
        self.entries.push(Entry { key, value });
    }

    /// Inserts an entry at `index`, shifting later entries down.
    pub fn insert_at(&mut self, index: usize, key: Atom, value: Value) {
        self.entries.insert(index, Entry { key, value });
    }

    /// Replaces the value under `key`, appending a new entry when absent.
    pub fn set(&mut self, key: Atom, value: Value) {
        match self.entries.iter().position(|e| e.key.text == key.text) {
            Some(index) => self.entries[index].value = value,
            None => self.entries.push(Entry { key, value }),
        }
    }
}
