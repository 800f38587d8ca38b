//! Parameter identifiers and the well-known parameter codes.

use std::sync::LazyLock;

use envex_envelope::tags::TAG_PARAMETER;

use crate::identifier::{Identifier, Role};
use crate::registry::KnownRegistry;

/// Marker for identifiers in the parameter role.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParameterRole;

/// Identifier naming an argument slot of an expression.
pub type Parameter = Identifier<ParameterRole>;

/// The single unnamed argument of a unary function.
pub const BLANK: Parameter = Parameter::new_static(1, "_");
pub const LHS: Parameter = Parameter::new_static(2, "lhs");
pub const RHS: Parameter = Parameter::new_static(3, "rhs");

static GLOBAL_PARAMETERS: LazyLock<KnownRegistry<ParameterRole>> =
    LazyLock::new(KnownRegistry::seeded);

impl Role for ParameterRole {
    const TAG: u64 = TAG_PARAMETER;
    const KIND: &'static str = "parameter";

    fn well_known() -> Vec<Parameter> {
        vec![BLANK, LHS, RHS]
    }

    fn global() -> &'static KnownRegistry<Self> {
        &GLOBAL_PARAMETERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_registry_is_seeded() {
        let registry = ParameterRole::global();
        assert_eq!(registry.lookup(1).unwrap().name(), Some("_"));
        assert_eq!(registry.lookup(3).unwrap(), RHS);
    }
}
