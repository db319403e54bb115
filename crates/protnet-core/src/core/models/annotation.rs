use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Key/value payload attached to a single edge (or, through a registry, to a node).
pub type Annotations = HashMap<String, AnnotationValue>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("List annotations may only hold scalar values, found a nested list at position {index}")]
    NestedList { index: usize },
}

/// A typed annotation value.
///
/// The variant set is closed: integers, floats, strings and flat lists of those.
/// Lists are wrapped in [`AnnotationList`], which can only be built through a
/// validating constructor, so a nested list can never be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawAnnotation")]
pub enum AnnotationValue {
    Integer(i64),
    Float(f64),
    Text(String),
    List(AnnotationList),
}

/// An ordered list of scalar annotation values.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct AnnotationList {
    items: Vec<AnnotationValue>,
}

impl AnnotationList {
    /// Builds a list, rejecting any element that is itself a list.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::NestedList`] naming the first offending position.
    pub fn new(items: Vec<AnnotationValue>) -> Result<Self, AnnotationError> {
        if let Some(index) = items.iter().position(AnnotationValue::is_list) {
            return Err(AnnotationError::NestedList { index });
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationValue> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[AnnotationValue] {
        &self.items
    }

    pub fn contains(&self, value: &AnnotationValue) -> bool {
        self.items.contains(value)
    }
}

impl<'a> IntoIterator for &'a AnnotationList {
    type Item = &'a AnnotationValue;
    type IntoIter = std::slice::Iter<'a, AnnotationValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl AnnotationValue {
    /// Builds a list value from scalar items.
    pub fn list(items: Vec<AnnotationValue>) -> Result<Self, AnnotationError> {
        AnnotationList::new(items).map(Self::List)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&AnnotationList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Merges two values stored under the same key.
    ///
    /// Equal values collapse to one copy. Differing values become a list holding
    /// this value's items first, followed by the items of `other` that are not
    /// already present. Lists are flattened rather than nested.
    pub fn merged_with(&self, other: &AnnotationValue) -> AnnotationValue {
        if self == other {
            return self.clone();
        }

        let mut items: Vec<AnnotationValue> = self.scalars().cloned().collect();
        for item in other.scalars() {
            if !items.contains(item) {
                items.push(item.clone());
            }
        }

        if items.len() == 1 {
            items.remove(0)
        } else {
            // Both sides contribute scalars only, so the list invariant holds.
            AnnotationValue::List(AnnotationList { items })
        }
    }

    fn scalars(&self) -> impl Iterator<Item = &AnnotationValue> {
        match self {
            Self::List(list) => list.as_slice().iter(),
            scalar => std::slice::from_ref(scalar).iter(),
        }
    }
}

/// Merges every entry of `incoming` into `target` using [`AnnotationValue::merged_with`].
pub fn merge_annotations(target: &mut Annotations, incoming: &Annotations) {
    for (key, value) in incoming {
        match target.get_mut(key) {
            Some(existing) => *existing = existing.merged_with(value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::List(list) => write!(f, "[{}]", list.iter().join(",")),
        }
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for AnnotationValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for AnnotationValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for AnnotationValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<AnnotationList> for AnnotationValue {
    fn from(value: AnnotationList) -> Self {
        Self::List(value)
    }
}

impl TryFrom<Vec<AnnotationValue>> for AnnotationValue {
    type Error = AnnotationError;

    fn try_from(items: Vec<AnnotationValue>) -> Result<Self, Self::Error> {
        Self::list(items)
    }
}

/// Wire shape accepted by deserializers before validation.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnnotation {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<RawAnnotation>),
}

impl TryFrom<RawAnnotation> for AnnotationValue {
    type Error = AnnotationError;

    fn try_from(raw: RawAnnotation) -> Result<Self, Self::Error> {
        match raw {
            RawAnnotation::Integer(v) => Ok(Self::Integer(v)),
            RawAnnotation::Float(v) => Ok(Self::Float(v)),
            RawAnnotation::Text(s) => Ok(Self::Text(s)),
            RawAnnotation::List(items) => {
                let items = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        RawAnnotation::List(_) => Err(AnnotationError::NestedList { index }),
                        scalar => Self::try_from(scalar),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::list(items)
            }
        }
    }
}
