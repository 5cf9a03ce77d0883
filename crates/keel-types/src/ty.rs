//! Core type definitions for the Keel type system

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique identifier for a type in the type context
///
/// Handles are allocated in declaration order, and that order is the total
/// order used to keep union members deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Create a new TypeId from a raw value
    ///
    /// Note: This should generally only be used internally or for interop.
    /// Prefer using TypeContext methods to obtain handles.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value of this TypeId
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Nominal, non-decomposable type: primitives, opaque object types, `never`, `void`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbstractType {
    /// Unique nominal name
    pub name: String,
    /// Declared supertype, if any
    pub parent: Option<TypeId>,
    /// Name of the type in generated output
    pub generated_type: String,
}

/// Callable reference: `builtin (P1, ..., Pn) => R`
///
/// Invariant in both parameters and return type; only the shared
/// function-pointer base type takes part in subtyping.
#[derive(Debug, Clone)]
pub struct FunctionPointerType {
    /// Function-pointer base type
    pub parent: TypeId,
    /// Parameter types, in order
    pub parameter_types: Vec<TypeId>,
    /// Return type
    pub return_type: TypeId,
}

impl PartialEq for FunctionPointerType {
    fn eq(&self, other: &Self) -> bool {
        self.parameter_types == other.parameter_types && self.return_type == other.return_type
    }
}

impl Eq for FunctionPointerType {}

impl Hash for FunctionPointerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.return_type.hash(state);
        for parameter in &self.parameter_types {
            parameter.hash(state);
        }
    }
}

/// Union type: `(T1 | T2 | ... | Tn)`
///
/// Members are kept sorted by `TypeId` and no member is a subtype of another.
/// `parent` is always a common supertype of every member. The builder
/// operations live in [`crate::union`].
#[derive(Debug, Clone)]
pub struct UnionType {
    pub(crate) members: BTreeSet<TypeId>,
    pub(crate) parent: TypeId,
}

impl UnionType {
    /// Members of the union, in `TypeId` order
    pub fn members(&self) -> impl ExactSizeIterator<Item = TypeId> + '_ {
        self.members.iter().copied()
    }

    /// Number of retained members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a union has at least one member
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Common supertype of all members
    pub fn parent(&self) -> TypeId {
        self.parent
    }

    /// Check whether `id` is a retained member
    pub fn contains(&self, id: TypeId) -> bool {
        self.members.contains(&id)
    }
}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for UnionType {}

impl Hash for UnionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for member in &self.members {
            member.hash(state);
        }
    }
}

/// The core type representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Nominal type
    Abstract(AbstractType),

    /// Function pointer type
    FunctionPointer(FunctionPointerType),

    /// Union type
    Union(UnionType),
}

impl Type {
    /// Declared supertype of this type, if any
    pub fn parent(&self) -> Option<TypeId> {
        match self {
            Type::Abstract(a) => a.parent,
            Type::FunctionPointer(f) => Some(f.parent),
            Type::Union(u) => Some(u.parent),
        }
    }

    /// Check if this type is an abstract type
    pub fn is_abstract(&self) -> bool {
        matches!(self, Type::Abstract(_))
    }

    /// Check if this type is a function pointer type
    pub fn is_function_pointer(&self) -> bool {
        matches!(self, Type::FunctionPointer(_))
    }

    /// Check if this type is a union type
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Get the abstract type if this is one
    pub fn as_abstract(&self) -> Option<&AbstractType> {
        match self {
            Type::Abstract(a) => Some(a),
            _ => None,
        }
    }

    /// Get the function pointer type if this is one
    pub fn as_function_pointer(&self) -> Option<&FunctionPointerType> {
        match self {
            Type::FunctionPointer(f) => Some(f),
            _ => None,
        }
    }

    /// Get the union type if this is one
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            Type::Union(u) => Some(u),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn fptr(parent: u32, params: &[u32], ret: u32) -> FunctionPointerType {
        FunctionPointerType {
            parent: TypeId(parent),
            parameter_types: params.iter().map(|&p| TypeId(p)).collect(),
            return_type: TypeId(ret),
        }
    }

    #[test]
    fn test_type_id_order_follows_allocation() {
        assert!(TypeId(1) < TypeId(2));
        assert_eq!(TypeId::new(7).as_u32(), 7);
        assert_eq!(format!("{}", TypeId(3)), "TypeId(3)");
    }

    #[test]
    fn test_function_pointer_structural_equality() {
        assert_eq!(fptr(0, &[1, 2], 3), fptr(0, &[1, 2], 3));
        assert_ne!(fptr(0, &[2, 1], 3), fptr(0, &[1, 2], 3));
        assert_ne!(fptr(0, &[1, 2], 4), fptr(0, &[1, 2], 3));

        let mut set = FxHashSet::default();
        set.insert(fptr(0, &[1, 2], 3));
        assert!(set.contains(&fptr(0, &[1, 2], 3)));
        assert!(!set.contains(&fptr(0, &[2, 1], 3)));
    }

    #[test]
    fn test_union_equality_ignores_parent() {
        let a = UnionType {
            members: [TypeId(1), TypeId(2)].into_iter().collect(),
            parent: TypeId(0),
        };
        let b = UnionType {
            members: [TypeId(2), TypeId(1)].into_iter().collect(),
            parent: TypeId(5),
        };
        assert_eq!(a, b);
        assert_eq!(a.members().collect::<Vec<_>>(), vec![TypeId(1), TypeId(2)]);
    }

    #[test]
    fn test_type_as_methods() {
        let ty = Type::Abstract(AbstractType {
            name: "Smi".to_string(),
            parent: Some(TypeId(0)),
            generated_type: "TNode<Smi>".to_string(),
        });
        assert!(ty.is_abstract());
        assert!(!ty.is_union());
        assert!(ty.as_function_pointer().is_none());
        assert_eq!(ty.parent(), Some(TypeId(0)));
    }
}
