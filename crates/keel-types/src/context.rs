//! Type context for managing types and type interning

use super::config::{TypeSystemConfig, WellKnown};
use super::error::TypeError;
use super::subtyping::SubtypingContext;
use super::ty::{AbstractType, FunctionPointerType, Type, TypeId, UnionType};
use super::union::Normalized;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::debug;

/// Type context that owns every type of a compilation run
///
/// Types are created exactly once and never removed. Structural types
/// (function pointers and unions) are interned, so structurally equal types
/// share a `TypeId` and handle equality is type identity.
#[derive(Debug, Clone)]
pub struct TypeContext {
    /// Storage for all types, indexed by TypeId
    types: Vec<Type>,

    /// Reverse mapping for structural types
    type_to_id: FxHashMap<Type, TypeId>,

    /// Nominal types by name
    named_types: FxHashMap<String, TypeId>,

    /// Informal names, used only for diagnostics
    aliases: FxHashMap<TypeId, BTreeSet<String>>,

    /// Well-known handles, filled in as the matching names are declared
    well_known: [Option<TypeId>; WellKnown::ALL.len()],

    config: TypeSystemConfig,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    /// Create a new empty type context with the default configuration
    pub fn new() -> Self {
        Self::with_config(TypeSystemConfig::default())
    }

    /// Create a new empty type context
    pub fn with_config(config: TypeSystemConfig) -> Self {
        TypeContext {
            types: Vec::new(),
            type_to_id: FxHashMap::default(),
            named_types: FxHashMap::default(),
            aliases: FxHashMap::default(),
            well_known: [None; WellKnown::ALL.len()],
            config,
        }
    }

    /// Configuration this context was created with
    pub fn config(&self) -> &TypeSystemConfig {
        &self.config
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        debug_assert!(
            ty.parent().map_or(true, |parent| parent < id),
            "parent of {} must be declared before it",
            id
        );
        self.types.push(ty);
        id
    }

    /// Fail with `InvalidTypeId` unless `id` belongs to this context
    pub fn check(&self, id: TypeId) -> Result<TypeId, TypeError> {
        if id.index() < self.types.len() {
            Ok(id)
        } else {
            Err(TypeError::InvalidTypeId { id: id.0 })
        }
    }

    /// Declare a nominal type
    ///
    /// The name must be unique. If it matches a configured well-known name,
    /// the handle is recorded for the well-known predicates.
    pub fn declare_abstract_type(
        &mut self,
        name: impl Into<String>,
        parent: Option<TypeId>,
        generated_type: impl Into<String>,
    ) -> Result<TypeId, TypeError> {
        let name = name.into();
        if self.named_types.contains_key(&name) {
            debug!(name = %name, "duplicate type declaration");
            return Err(TypeError::DuplicateType { name });
        }
        if let Some(parent) = parent {
            self.check(parent)?;
        }

        let id = self.push(Type::Abstract(AbstractType {
            name: name.clone(),
            parent,
            generated_type: generated_type.into(),
        }));
        if let Some(kind) = self.config.well_known.kind_of(&name) {
            self.well_known[kind.slot()] = Some(id);
        }
        debug!(name = %name, id = id.0, parent = ?parent.map(|p| p.0), "declared abstract type");
        self.named_types.insert(name, id);
        Ok(id)
    }

    /// Intern a function pointer type
    ///
    /// Its parent is the configured function-pointer base, which must
    /// already be declared.
    pub fn function_pointer_type(
        &mut self,
        parameter_types: Vec<TypeId>,
        return_type: TypeId,
    ) -> Result<TypeId, TypeError> {
        for &param in &parameter_types {
            self.check(param)?;
        }
        self.check(return_type)?;
        let parent = self.require(self.config.function_pointer_base.into())?;

        let ty = Type::FunctionPointer(FunctionPointerType {
            parent,
            parameter_types,
            return_type,
        });
        if let Some(&id) = self.type_to_id.get(&ty) {
            return Ok(id);
        }

        let id = self.push(ty.clone());
        self.type_to_id.insert(ty, id);
        debug!(id = id.0, "interned function pointer type");
        Ok(id)
    }

    /// Intern a finished union
    ///
    /// A single-member union is the member itself, so its handle is returned
    /// unchanged.
    pub fn union_type(&mut self, union: UnionType) -> TypeId {
        let union = match union.normalize() {
            Normalized::Single(member) => return member,
            Normalized::Union(_) => union,
        };

        let ty = Type::Union(union);
        if let Some(&id) = self.type_to_id.get(&ty) {
            return id;
        }

        let id = self.push(ty.clone());
        self.type_to_id.insert(ty, id);
        debug!(id = id.0, "interned union type");
        id
    }

    /// Get a type by its TypeId
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    /// Look up a structural type's ID without interning
    pub fn lookup(&self, ty: &Type) -> Option<TypeId> {
        match ty {
            Type::Abstract(a) => self.lookup_named_type(&a.name),
            _ => self.type_to_id.get(ty).copied(),
        }
    }

    /// Look up a nominal type by name
    pub fn lookup_named_type(&self, name: &str) -> Option<TypeId> {
        self.named_types.get(name).copied()
    }

    /// Resolve a nominal type, returning an error if not found
    pub fn resolve_named_type(&self, name: &str) -> Result<TypeId, TypeError> {
        self.lookup_named_type(name).ok_or_else(|| TypeError::UndefinedType {
            name: name.to_string(),
        })
    }

    /// Declared supertype of a type
    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).and_then(Type::parent)
    }

    /// Number of parent hops from `id` to its root
    pub fn depth(&self, id: TypeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Record an informal name for a type
    pub fn add_alias(&mut self, id: TypeId, alias: impl Into<String>) {
        self.aliases.entry(id).or_default().insert(alias.into());
    }

    /// Informal names of a type, in sorted order
    pub fn aliases(&self, id: TypeId) -> impl Iterator<Item = &str> + '_ {
        self.aliases.get(&id).into_iter().flatten().map(String::as_str)
    }

    pub(crate) fn alias_set(&self, id: TypeId) -> Option<&BTreeSet<String>> {
        self.aliases.get(&id)
    }

    /// Handle of a well-known type, if it has been declared
    pub fn well_known(&self, kind: WellKnown) -> Option<TypeId> {
        self.well_known[kind.slot()]
    }

    /// Handle of a well-known type, failing if it has not been declared
    pub fn require(&self, kind: WellKnown) -> Result<TypeId, TypeError> {
        self.well_known(kind).ok_or_else(|| TypeError::MissingWellKnownType {
            name: self.config.well_known.name(kind).to_string(),
        })
    }

    fn is_well_known(&self, id: TypeId, kind: WellKnown) -> bool {
        self.well_known(kind) == Some(id)
    }

    /// Check if a type is `void`
    pub fn is_void(&self, id: TypeId) -> bool {
        self.is_well_known(id, WellKnown::Void)
    }

    /// Check if a type is `never`
    pub fn is_never(&self, id: TypeId) -> bool {
        self.is_well_known(id, WellKnown::Never)
    }

    /// Check if a type is `bool`
    pub fn is_bool(&self, id: TypeId) -> bool {
        self.is_well_known(id, WellKnown::Bool)
    }

    /// Check if a type is `constexpr bool`
    pub fn is_constexpr_bool(&self, id: TypeId) -> bool {
        self.is_well_known(id, WellKnown::ConstexprBool)
    }

    /// Check if a type is `void` or `never`
    pub fn is_void_or_never(&self, id: TypeId) -> bool {
        self.is_void(id) || self.is_never(id)
    }

    /// Whether values of this type exist only at compile time
    pub fn is_constexpr(&self, id: TypeId) -> bool {
        match self.get(id) {
            Some(Type::Abstract(a)) => a.name.starts_with(&self.config.constexpr_prefix),
            Some(Type::FunctionPointer(f)) => self.is_constexpr(f.parent),
            Some(Type::Union(u)) => {
                debug_assert!(!self.is_constexpr(u.parent), "constexpr union {}", id);
                false
            }
            None => false,
        }
    }

    /// Subtyping queries over this context
    pub fn subtyping(&self) -> SubtypingContext<'_> {
        SubtypingContext::new(self)
    }

    /// Check if `sub` is a subtype of `sup`
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.subtyping().is_subtype(sub, sup)
    }

    /// Lowest common supertype of `a` and `b`
    pub fn common_supertype(&self, a: TypeId, b: TypeId) -> Result<TypeId, TypeError> {
        self.subtyping().common_supertype(a, b)
    }

    /// Get the number of types in the context
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
