//! Diagnostic rendering, mangled names and generated type names
//!
//! All of these are pure string-producing queries over a [`TypeContext`].
//! Handles that do not belong to the context render as `InvalidType(n)`.

use crate::context::TypeContext;
use crate::ty::{Type, TypeId, UnionType};
use std::collections::BTreeSet;
use std::fmt::Write;

impl TypeContext {
    /// Human-readable form of a type, preferring its aliases
    ///
    /// No alias: the explicit form. One alias: the alias. Several:
    /// `first (aka. second, third)`.
    pub fn display(&self, id: TypeId) -> String {
        let aliases = match self.alias_set(id) {
            Some(aliases) if !aliases.is_empty() => aliases,
            _ => return self.to_explicit_string(id),
        };

        let mut iter = aliases.iter();
        let mut result = String::new();
        if let Some(first) = iter.next() {
            result.push_str(first);
        }
        if aliases.len() == 1 {
            return result;
        }
        result.push_str(" (aka. ");
        for (i, alias) in iter.enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            result.push_str(alias);
        }
        result.push(')');
        result
    }

    /// Structural form of a type, ignoring aliases
    pub fn to_explicit_string(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(Type::Abstract(a)) => a.name.clone(),
            Some(Type::FunctionPointer(f)) => {
                format!(
                    "builtin ({}) => {}",
                    self.display_types(&f.parameter_types),
                    self.display(f.return_type)
                )
            }
            Some(Type::Union(u)) => self.union_to_string(u),
            None => format!("InvalidType({})", id.0),
        }
    }

    /// Render a union value, interned or not: `(A | B | C)`
    pub fn union_to_string(&self, union: &UnionType) -> String {
        let mut result = String::from("(");
        for (i, member) in union.members().enumerate() {
            if i > 0 {
                result.push_str(" | ");
            }
            result.push_str(&self.display(member));
        }
        result.push(')');
        result
    }

    /// Comma-separated list of types
    pub fn display_types(&self, types: &[TypeId]) -> String {
        types
            .iter()
            .map(|&id| self.display(id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Identifier-safe, structurally unique encoding of a type
    ///
    /// Children of structural types are length-prefixed, so two
    /// structurally different types never share a mangled name.
    pub fn mangled_name(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(Type::Abstract(a)) => {
                let mut result = String::from("AT");
                push_mangled_name(&mut result, &a.name);
                result
            }
            Some(Type::FunctionPointer(f)) => {
                let mut result = String::from("FT");
                for &param in &f.parameter_types {
                    self.push_mangled_child(&mut result, param);
                }
                self.push_mangled_child(&mut result, f.return_type);
                result
            }
            Some(Type::Union(u)) => {
                let mut result = String::from("UT");
                for member in u.members() {
                    self.push_mangled_child(&mut result, member);
                }
                result
            }
            None => format!("IT{}", id.0),
        }
    }

    fn push_mangled_child(&self, out: &mut String, id: TypeId) {
        let child = self.mangled_name(id);
        let _ = write!(out, "{}{}", child.len(), child);
    }

    /// Name of the type's runtime shape in generated code
    pub fn generated_type_name(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(Type::Abstract(a)) => a.generated_type.clone(),
            Some(Type::FunctionPointer(f)) => self.generated_type_name(f.parent),
            Some(Type::Union(_)) => format!(
                "{}<{}>",
                self.config().generated_wrapper,
                self.generated_tnode_type_name(id)
            ),
            None => String::new(),
        }
    }

    /// Generated type name without the `TNode<...>` wrapper
    pub fn generated_tnode_type_name(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(Type::Abstract(a)) => self.strip_wrapper(&a.generated_type).to_string(),
            Some(Type::FunctionPointer(f)) => self.generated_tnode_type_name(f.parent),
            Some(Type::Union(u)) => {
                let members: BTreeSet<String> = u
                    .members()
                    .map(|member| self.generated_tnode_type_name(member))
                    .collect();
                match self.config().union_representation(&members) {
                    Some(name) => name.to_string(),
                    None => self.generated_tnode_type_name(u.parent()),
                }
            }
            None => String::new(),
        }
    }

    fn strip_wrapper<'s>(&self, generated: &'s str) -> &'s str {
        let wrapper = self.config().generated_wrapper.as_str();
        generated
            .strip_prefix(wrapper)
            .and_then(|rest| rest.strip_prefix('<'))
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(generated)
    }
}

/// Escape a nominal name into identifier characters
///
/// Alphanumerics are kept, `_` becomes `__` and any other character becomes
/// `_<hex code point>_`. No escape is a prefix of another, so distinct names
/// never share an encoding.
fn push_mangled_name(out: &mut String, name: &str) {
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if c == '_' {
            out.push_str("__");
        } else {
            let _ = write!(out, "_{:x}_", c as u32);
        }
    }
}
