//! Function identifiers and the well-known function codes.

use std::sync::LazyLock;

use envex_envelope::tags::TAG_FUNCTION;

use crate::identifier::{Identifier, Role};
use crate::registry::KnownRegistry;

/// Marker for identifiers in the function role.
#[derive(Clone, Copy, Debug, Default)]
pub struct FunctionRole;

/// Identifier naming the function an expression calls.
pub type Function = Identifier<FunctionRole>;

pub const ADD: Function = Function::new_static(1, "add");
pub const SUB: Function = Function::new_static(2, "sub");
pub const MUL: Function = Function::new_static(3, "mul");
pub const DIV: Function = Function::new_static(4, "div");
pub const NEG: Function = Function::new_static(5, "neg");
pub const LT: Function = Function::new_static(6, "lt");
pub const LE: Function = Function::new_static(7, "le");
pub const GT: Function = Function::new_static(8, "gt");
pub const GE: Function = Function::new_static(9, "ge");
pub const EQ: Function = Function::new_static(10, "eq");
pub const NE: Function = Function::new_static(11, "ne");
pub const AND: Function = Function::new_static(12, "and");
pub const OR: Function = Function::new_static(13, "or");
pub const XOR: Function = Function::new_static(14, "xor");
pub const NOT: Function = Function::new_static(15, "not");

static GLOBAL_FUNCTIONS: LazyLock<KnownRegistry<FunctionRole>> =
    LazyLock::new(KnownRegistry::seeded);

impl Role for FunctionRole {
    const TAG: u64 = TAG_FUNCTION;
    const KIND: &'static str = "function";

    fn well_known() -> Vec<Function> {
        vec![
            ADD, SUB, MUL, DIV, NEG, LT, LE, GT, GE, EQ, NE, AND, OR, XOR, NOT,
        ]
    }

    fn global() -> &'static KnownRegistry<Self> {
        &GLOBAL_FUNCTIONS
    }
}
