//! Subtyping rules for the Keel type system
//!
//! Implements the subtyping relation T <: U (T is a subtype of U) and the
//! lowest common supertype of two types. Subtyping is nominal: a type is a
//! subtype of everything on its parent chain. Unions are the only structural
//! case.

use crate::context::TypeContext;
use crate::error::TypeError;
use crate::ty::{Type, TypeId};
use tracing::debug;

/// Context for checking subtyping relationships
///
/// Read-only: queries never mutate the type context.
#[derive(Debug, Clone, Copy)]
pub struct SubtypingContext<'a> {
    /// Type context for resolving types
    type_ctx: &'a TypeContext,
}

impl<'a> SubtypingContext<'a> {
    /// Create a new subtyping context
    pub fn new(type_ctx: &'a TypeContext) -> Self {
        SubtypingContext { type_ctx }
    }

    /// Check if `sub` is a subtype of `sup` (sub <: sup)
    ///
    /// Returns false for handles that do not belong to the context.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        // Reflexivity: T <: T
        if sub == sup {
            return true;
        }

        let sub_ty = match self.type_ctx.get(sub) {
            Some(ty) => ty,
            None => return false,
        };

        // Union subtyping: T1 | T2 | ... | Tn <: U if Ti <: U for all i
        if let Type::Union(union) = sub_ty {
            return union.members().all(|member| self.is_subtype(member, sup));
        }

        // Union subtyping: T <: U1 | U2 | ... | Un if T <: Ui for some i
        if let Some(Type::Union(union)) = self.type_ctx.get(sup) {
            return union.members().any(|member| self.is_subtype(sub, member));
        }

        let mut current = sub_ty.parent();
        while let Some(ancestor) = current {
            if ancestor == sup {
                return true;
            }
            current = self.type_ctx.parent(ancestor);
        }
        false
    }

    /// Lowest type that both `a` and `b` are subtypes of
    ///
    /// Walks the deeper chain up until both sides are at the same depth, then
    /// walks both in lock-step. Returns `None` only when the chains end at
    /// different roots, which a well-formed hierarchy never produces.
    pub fn try_common_supertype(&self, a: TypeId, b: TypeId) -> Option<TypeId> {
        let mut a_depth = self.type_ctx.depth(a);
        let mut b_depth = self.type_ctx.depth(b);
        let mut a_super = a;
        let mut b_super = b;

        while a_depth > b_depth {
            a_super = self.type_ctx.parent(a_super)?;
            a_depth -= 1;
        }
        while b_depth > a_depth {
            b_super = self.type_ctx.parent(b_super)?;
            b_depth -= 1;
        }

        loop {
            if a_super == b_super {
                return Some(a_super);
            }
            a_super = self.type_ctx.parent(a_super)?;
            b_super = self.type_ctx.parent(b_super)?;
        }
    }

    /// Lowest common supertype, as an invariant-checked result
    pub fn common_supertype(&self, a: TypeId, b: TypeId) -> Result<TypeId, TypeError> {
        self.try_common_supertype(a, b).ok_or_else(|| {
            let a = self.type_ctx.display(a);
            let b = self.type_ctx.display(b);
            debug!(a = %a, b = %b, "no common supertype");
            TypeError::NoCommonSupertype { a, b }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TypeContext;
    use crate::union::UnionType;

    struct Hierarchy {
        ctx: TypeContext,
        object: TypeId,
        smi: TypeId,
        heap_object: TypeId,
        heap_number: TypeId,
        string: TypeId,
        number: TypeId,
    }

    // Object
    // +- Number
    // |  +- Smi
    // |  +- HeapNumber
    // +- HeapObject
    //    +- String
    fn hierarchy() -> Hierarchy {
        let mut ctx = TypeContext::new();
        let object = ctx.declare_abstract_type("Object", None, "TNode<Object>").unwrap();
        let number = ctx.declare_abstract_type("Number", Some(object), "TNode<Number>").unwrap();
        let smi = ctx.declare_abstract_type("Smi", Some(number), "TNode<Smi>").unwrap();
        let heap_number = ctx.declare_abstract_type("HeapNumber", Some(number), "TNode<HeapNumber>").unwrap();
        let heap_object = ctx.declare_abstract_type("HeapObject", Some(object), "TNode<HeapObject>").unwrap();
        let string = ctx.declare_abstract_type("String", Some(heap_object), "TNode<String>").unwrap();
        Hierarchy { ctx, object, smi, heap_object, heap_number, string, number }
    }

    /// Every abstract type of the hierarchy plus one union and one function pointer
    fn all_kinds(h: &mut Hierarchy) -> Vec<TypeId> {
        let code = h.ctx.declare_abstract_type("Code", Some(h.heap_object), "TNode<Code>").unwrap();
        let mut union = UnionType::from_type(&h.ctx, h.smi);
        union.extend(&h.ctx, h.string).unwrap();
        let smi_or_string = h.ctx.union_type(union);
        let fptr = h.ctx.function_pointer_type(vec![h.smi], h.number).unwrap();
        vec![h.object, h.smi, h.heap_object, h.heap_number, h.string, h.number, code, smi_or_string, fptr]
    }

    #[test]
    fn test_reflexivity() {
        let mut h = hierarchy();
        let all = all_kinds(&mut h);
        let sub_ctx = SubtypingContext::new(&h.ctx);

        for id in all {
            assert!(sub_ctx.is_subtype(id, id), "{:?}", h.ctx.get(id));
        }
    }

    #[test]
    fn test_chain_subtyping() {
        let h = hierarchy();
        let sub_ctx = SubtypingContext::new(&h.ctx);

        assert!(sub_ctx.is_subtype(h.smi, h.number));
        assert!(sub_ctx.is_subtype(h.smi, h.object));
        assert!(sub_ctx.is_subtype(h.string, h.object));
        assert!(!sub_ctx.is_subtype(h.number, h.smi));
        assert!(!sub_ctx.is_subtype(h.smi, h.heap_object));
        assert!(!sub_ctx.is_subtype(h.string, h.number));
    }

    #[test]
    fn test_invalid_handles_are_not_subtypes() {
        let h = hierarchy();
        let sub_ctx = SubtypingContext::new(&h.ctx);

        assert!(!sub_ctx.is_subtype(TypeId(99), h.object));
        assert!(!sub_ctx.is_subtype(h.object, TypeId(99)));
    }

    #[test]
    fn test_union_subtyping() {
        let mut h = hierarchy();
        let mut union = UnionType::from_type(&h.ctx, h.smi);
        union.extend(&h.ctx, h.string).unwrap();
        let smi_or_string = h.ctx.union_type(union);
        let sub_ctx = SubtypingContext::new(&h.ctx);

        // Smi <: Smi | String
        assert!(sub_ctx.is_subtype(h.smi, smi_or_string));
        // Smi | String <: Object
        assert!(sub_ctx.is_subtype(smi_or_string, h.object));
        // !(Smi | String <: Number)
        assert!(!sub_ctx.is_subtype(smi_or_string, h.number));
        // !(Number <: Smi | String)
        assert!(!sub_ctx.is_subtype(h.number, smi_or_string));
    }

    #[test]
    fn test_union_to_union_subtyping() {
        let mut h = hierarchy();
        let mut narrow = UnionType::from_type(&h.ctx, h.smi);
        narrow.extend(&h.ctx, h.string).unwrap();
        let mut wide = UnionType::from_type(&h.ctx, h.number);
        wide.extend(&h.ctx, h.heap_object).unwrap();
        let narrow = h.ctx.union_type(narrow);
        let wide = h.ctx.union_type(wide);
        let sub_ctx = SubtypingContext::new(&h.ctx);

        assert!(sub_ctx.is_subtype(narrow, wide));
        assert!(!sub_ctx.is_subtype(wide, narrow));
    }

    #[test]
    fn test_transitivity() {
        let mut h = hierarchy();
        let all = all_kinds(&mut h);
        let sub_ctx = SubtypingContext::new(&h.ctx);

        for &a in &all {
            for &b in &all {
                for &c in &all {
                    if sub_ctx.is_subtype(a, b) && sub_ctx.is_subtype(b, c) {
                        assert!(sub_ctx.is_subtype(a, c), "{:?} <: {:?} <: {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_common_supertype() {
        let h = hierarchy();
        let sub_ctx = SubtypingContext::new(&h.ctx);

        assert_eq!(sub_ctx.common_supertype(h.smi, h.heap_number), Ok(h.number));
        assert_eq!(sub_ctx.common_supertype(h.smi, h.string), Ok(h.object));
        assert_eq!(sub_ctx.common_supertype(h.smi, h.number), Ok(h.number));
        assert_eq!(sub_ctx.common_supertype(h.number, h.smi), Ok(h.number));
        assert_eq!(sub_ctx.common_supertype(h.string, h.string), Ok(h.string));
    }

    #[test]
    fn test_common_supertype_is_lowest() {
        let h = hierarchy();
        let sub_ctx = SubtypingContext::new(&h.ctx);
        let all = [h.object, h.smi, h.heap_object, h.heap_number, h.string, h.number];

        for &a in &all {
            for &b in &all {
                let join = sub_ctx.common_supertype(a, b).unwrap();
                assert!(sub_ctx.is_subtype(a, join));
                assert!(sub_ctx.is_subtype(b, join));
                // Every other common supertype sits above the join
                for &other in &all {
                    if sub_ctx.is_subtype(a, other) && sub_ctx.is_subtype(b, other) {
                        assert!(sub_ctx.is_subtype(join, other));
                    }
                }
            }
        }
    }

    #[test]
    fn test_unrelated_roots() {
        crate::test_utils::init_test_logging();
        let mut h = hierarchy();
        let cint = h.ctx.declare_abstract_type("constexpr int31", None, "int31_t").unwrap();
        let sub_ctx = SubtypingContext::new(&h.ctx);

        assert_eq!(sub_ctx.try_common_supertype(cint, h.smi), None);
        let err = sub_ctx.common_supertype(cint, h.smi).unwrap_err();
        assert!(matches!(err, TypeError::NoCommonSupertype { .. }));
        assert!(err.is_invariant_violation());
    }
}
