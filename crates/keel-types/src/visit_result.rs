//! Values paired with their types
//!
//! The code generator produces these; the type core only reads the types.

use crate::ty::TypeId;
use std::ops::{Deref, DerefMut};

/// A generated value and its type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitResult {
    /// Type of the value
    pub ty: TypeId,
    /// Opaque token naming where the value lives in generated output
    pub variable: String,
}

impl VisitResult {
    /// Pair a type with a generated value
    pub fn new(ty: TypeId, variable: impl Into<String>) -> Self {
        VisitResult {
            ty,
            variable: variable.into(),
        }
    }
}

/// Ordered sequence of [`VisitResult`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitResultVector(Vec<VisitResult>);

impl VisitResultVector {
    /// Create an empty vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Project to the types of the values
    pub fn type_vector(&self) -> Vec<TypeId> {
        self.0.iter().map(|result| result.ty).collect()
    }
}

impl Deref for VisitResultVector {
    type Target = Vec<VisitResult>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for VisitResultVector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<VisitResult>> for VisitResultVector {
    fn from(results: Vec<VisitResult>) -> Self {
        VisitResultVector(results)
    }
}

impl FromIterator<VisitResult> for VisitResultVector {
    fn from_iter<I: IntoIterator<Item = VisitResult>>(iter: I) -> Self {
        VisitResultVector(iter.into_iter().collect())
    }
}

impl IntoIterator for VisitResultVector {
    type Item = VisitResult;
    type IntoIter = std::vec::IntoIter<VisitResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
