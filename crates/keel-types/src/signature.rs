//! Declared signatures and call arguments

use crate::assignability::AssignabilityContext;
use crate::context::TypeContext;
use crate::ty::TypeId;
use crate::visit_result::VisitResultVector;

/// A named, typed slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameAndType {
    /// Slot name
    pub name: String,
    /// Slot type
    pub ty: TypeId,
}

/// Label as declared by a callee: `labels Bailout(Smi)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelDeclaration {
    /// Label name
    pub name: String,
    /// Types the callee passes when it jumps to the label
    pub types: Vec<TypeId>,
}

/// Label as defined by a caller, with named parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelDefinition {
    /// Label name
    pub name: String,
    /// Parameters bound when control arrives at the label
    pub parameters: Vec<NameAndType>,
}

impl LabelDefinition {
    /// Types of the label's parameters
    pub fn types(&self) -> Vec<TypeId> {
        self.parameters.iter().map(|p| p.ty).collect()
    }
}

/// Parameter types with an optional untyped variadic tail
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterTypes {
    /// Fixed parameter types
    pub types: Vec<TypeId>,
    /// Whether any number of extra arguments may follow
    pub var_args: bool,
}

/// Declared signature of a callable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter names, informational only
    pub parameter_names: Vec<String>,
    /// Parameter types
    pub parameter_types: ParameterTypes,
    /// Return type
    pub return_type: TypeId,
    /// Out-of-band control transfers the callee may take
    pub labels: Vec<LabelDeclaration>,
}

/// Arguments supplied at a call site
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    /// Argument values
    pub parameters: VisitResultVector,
    /// Labels handed to the callee
    pub labels: Vec<LabelDefinition>,
}

impl Signature {
    /// Fixed parameter types
    pub fn types(&self) -> &[TypeId] {
        &self.parameter_types.types
    }

    /// Same parameter types (including the variadic flag) and return type
    ///
    /// Names and labels are not compared. Used to detect duplicate or
    /// ambiguous declarations.
    pub fn has_same_types_as(&self, other: &Signature) -> bool {
        self.parameter_types == other.parameter_types && self.return_type == other.return_type
    }

    /// Check a whole call site: arguments and labels
    pub fn accepts(&self, ctx: &TypeContext, arguments: &Arguments) -> bool {
        let assign_ctx = AssignabilityContext::new(ctx);
        if !assign_ctx.is_compatible_signature(&self.parameter_types, &arguments.parameters.type_vector()) {
            return false;
        }
        self.labels.len() == arguments.labels.len()
            && self
                .labels
                .iter()
                .zip(&arguments.labels)
                .all(|(declared, supplied)| assign_ctx.is_compatible_label(&declared.types, &supplied.types()))
    }
}

impl TypeContext {
    /// Render parameter types: `(A, B, ...)`
    pub fn display_parameter_types(&self, parameters: &ParameterTypes) -> String {
        let mut result = format!("({}", self.display_types(&parameters.types));
        if parameters.var_args {
            if !parameters.types.is_empty() {
                result.push_str(", ");
            }
            result.push_str("...");
        }
        result.push(')');
        result
    }

    /// Render a signature: `(a: A, b: B, ...): R labels L1(T1), L2`
    pub fn display_signature(&self, signature: &Signature) -> String {
        let mut result = String::from("(");
        for (i, &ty) in signature.parameter_types.types.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            if let Some(name) = signature.parameter_names.get(i) {
                result.push_str(name);
                result.push_str(": ");
            }
            result.push_str(&self.display(ty));
        }
        if signature.parameter_types.var_args {
            if !signature.parameter_types.types.is_empty() {
                result.push_str(", ");
            }
            result.push_str("...");
        }
        result.push_str("): ");
        result.push_str(&self.display(signature.return_type));

        for (i, label) in signature.labels.iter().enumerate() {
            result.push_str(if i == 0 { " labels " } else { ", " });
            result.push_str(&label.name);
            if !label.types.is_empty() {
                result.push('(');
                result.push_str(&self.display_types(&label.types));
                result.push(')');
            }
        }
        result
    }
}
