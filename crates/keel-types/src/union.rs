//! Union type algebra
//!
//! A [`UnionType`] is built from a seed type and grown with
//! [`UnionType::extend`] against a [`TypeContext`], then interned with
//! [`TypeContext::union_type`]. After every successful `extend`:
//!
//! - no retained member is a subtype of another retained member,
//! - `parent` is a common supertype of every member,
//! - unions never nest.

use crate::context::TypeContext;
use crate::error::TypeError;
use crate::ty::{Type, TypeId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

pub use crate::ty::UnionType;

/// Result of collapsing a trivial union
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized<'a> {
    /// The union has exactly one member, which stands for it
    Single(TypeId),
    /// The union has several members
    Union(&'a UnionType),
}

impl UnionType {
    /// Start a union from a single type
    ///
    /// A union seed is copied; any other type becomes the singleton `{t}`
    /// whose parent is `t` itself.
    pub fn from_type(ctx: &TypeContext, t: TypeId) -> UnionType {
        match ctx.get(t) {
            Some(Type::Union(union)) => union.clone(),
            _ => UnionType {
                members: BTreeSet::from([t]),
                parent: t,
            },
        }
    }

    /// Merge `t` into the union
    ///
    /// On error the union is left exactly as it was. Errors are invariant
    /// violations: a handle from another context, a compile-time-only type
    /// alongside any distinct type, or types without a common supertype.
    pub fn extend(&mut self, ctx: &TypeContext, t: TypeId) -> Result<(), TypeError> {
        ctx.check(t)?;
        ctx.check(self.parent)?;
        let mut next = self.clone();
        match ctx.get(t) {
            Some(Type::Union(other)) => {
                for member in other.members() {
                    next.extend_member(ctx, member)?;
                }
            }
            _ => next.extend_member(ctx, t)?,
        }
        *self = next;
        Ok(())
    }

    fn extend_member(&mut self, ctx: &TypeContext, t: TypeId) -> Result<(), TypeError> {
        if self.is_supertype_of(ctx, t) {
            trace!(ty = t.0, "already covered by union");
            return Ok(());
        }

        let retained: BTreeSet<TypeId> = self
            .members
            .iter()
            .copied()
            .filter(|&member| !ctx.is_subtype(member, t))
            .collect();

        if !retained.is_empty()
            && (ctx.is_constexpr(t) || retained.iter().any(|&member| ctx.is_constexpr(member)))
        {
            let union = ctx.union_to_string(self);
            let member = ctx.display(t);
            debug!(union = %union, member = %member, "constexpr type in union");
            return Err(TypeError::ConstexprUnion { union, member });
        }

        let parent = if retained.is_empty() {
            t
        } else {
            ctx.common_supertype(self.parent, t)?
        };

        trace!(
            ty = t.0,
            dropped = self.members.len() - retained.len(),
            parent = parent.0,
            "extended union"
        );
        self.members = retained;
        self.members.insert(t);
        self.parent = parent;
        Ok(())
    }

    /// Collapse a one-member union to its member
    pub fn normalize(&self) -> Normalized<'_> {
        match self.single_member() {
            Some(member) => Normalized::Single(member),
            None => Normalized::Union(self),
        }
    }

    /// The lone member, if the union has exactly one
    pub fn single_member(&self) -> Option<TypeId> {
        if self.members.len() != 1 {
            return None;
        }
        let member = self.members.iter().next().copied()?;
        debug_assert_eq!(member, self.parent);
        Some(member)
    }

    /// `other` is a subtype of at least one member
    pub fn is_supertype_of(&self, ctx: &TypeContext, other: TypeId) -> bool {
        self.members().any(|member| ctx.is_subtype(other, member))
    }

    /// Every member is a subtype of `sup`
    pub fn is_subtype_of(&self, ctx: &TypeContext, sup: TypeId) -> bool {
        self.members().all(|member| ctx.is_subtype(member, sup))
    }
}
