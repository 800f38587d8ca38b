//! Dual-representation identifiers shared by functions and parameters.
//!
//! An identifier is either *known*, a numeric code with an optional
//! cosmetic name, or *named*, defined entirely by its string. The shape is
//! implemented once and instantiated per [`Role`]; each role brings its own
//! CBOR tag and its own registry of well-known codes.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::registry::KnownRegistry;

/// The part an identifier plays on the wire: function or parameter.
pub trait Role: Sized + Send + Sync + 'static {
    /// CBOR tag wrapping identifiers of this role.
    const TAG: u64;
    /// Label used in logs and error messages.
    const KIND: &'static str;

    /// Identifiers the role's process-wide registry is seeded with.
    fn well_known() -> Vec<Identifier<Self>>;

    /// The role's process-wide registry.
    fn global() -> &'static KnownRegistry<Self>;
}

#[derive(Clone)]
enum Repr {
    Known {
        code: u64,
        name: Option<Cow<'static, str>>,
    },
    Named(String),
}

/// A function or parameter identifier.
///
/// Two known identifiers are equal iff their codes are equal; the name is
/// not part of identity. Two named identifiers are equal iff their strings
/// are equal. Known and named identifiers are never equal.
pub struct Identifier<R> {
    repr: Repr,
    role: PhantomData<fn() -> R>,
}

impl<R> Identifier<R> {
    /// A known identifier without a display name.
    pub const fn from_code(code: u64) -> Self {
        Self {
            repr: Repr::Known { code, name: None },
            role: PhantomData,
        }
    }

    /// A known identifier with a static display name.
    pub const fn new_static(code: u64, name: &'static str) -> Self {
        Self {
            repr: Repr::Known {
                code,
                name: Some(Cow::Borrowed(name)),
            },
            role: PhantomData,
        }
    }

    pub fn new_known(code: u64, name: Option<String>) -> Self {
        Self {
            repr: Repr::Known {
                code,
                name: name.map(Cow::Owned),
            },
            role: PhantomData,
        }
    }

    pub fn new_named(name: impl Into<String>) -> Self {
        Self {
            repr: Repr::Named(name.into()),
            role: PhantomData,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self.repr, Repr::Known { .. })
    }

    pub fn is_named(&self) -> bool {
        matches!(self.repr, Repr::Named(_))
    }

    /// The code of a known identifier.
    pub fn code(&self) -> Option<u64> {
        match self.repr {
            Repr::Known { code, .. } => Some(code),
            Repr::Named(_) => None,
        }
    }

    /// The display name of a known identifier, or the string of a named one.
    pub fn name(&self) -> Option<&str> {
        match &self.repr {
            Repr::Known { name, .. } => name.as_deref(),
            Repr::Named(name) => Some(name.as_str()),
        }
    }
}

impl<R: Role> Identifier<R> {
    /// Display form, preferring the name `registry` holds for a known code.
    ///
    /// Without a registry this is the same as `Display`.
    pub fn display_name(&self, registry: Option<&KnownRegistry<R>>) -> String {
        match &self.repr {
            Repr::Known { code, name } => registry
                .and_then(|r| r.lookup(*code))
                .and_then(|canonical| canonical.name().map(str::to_owned))
                .or_else(|| name.as_ref().map(|n| n.to_string()))
                .unwrap_or_else(|| code.to_string()),
            Repr::Named(name) => format!("\"{}\"", name),
        }
    }
}

impl<R> Clone for Identifier<R> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
            role: PhantomData,
        }
    }
}

impl<R> PartialEq for Identifier<R> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Known { code: a, .. }, Repr::Known { code: b, .. }) => a == b,
            (Repr::Named(a), Repr::Named(b)) => a == b,
            _ => false,
        }
    }
}

impl<R> Eq for Identifier<R> {}

impl<R> Hash for Identifier<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.repr {
            Repr::Known { code, .. } => {
                0u8.hash(state);
                code.hash(state);
            }
            Repr::Named(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl<R> fmt::Display for Identifier<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Known {
                name: Some(name), ..
            } => write!(f, "{}", name),
            Repr::Known { code, name: None } => write!(f, "{}", code),
            Repr::Named(name) => write!(f, "\"{}\"", name),
        }
    }
}

impl<R: Role> fmt::Debug for Identifier<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Known { code, name } => f
                .debug_struct(R::KIND)
                .field("code", code)
                .field("name", &name.as_deref())
                .finish(),
            Repr::Named(name) => f.debug_tuple(R::KIND).field(name).finish(),
        }
    }
}

impl<R> From<u64> for Identifier<R> {
    fn from(code: u64) -> Self {
        Self::from_code(code)
    }
}

impl<R> From<&str> for Identifier<R> {
    fn from(name: &str) -> Self {
        Self::new_named(name)
    }
}

impl<R> From<String> for Identifier<R> {
    fn from(name: String) -> Self {
        Self::new_named(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::function::Function;
    use crate::parameter::Parameter;

    #[test]
    fn known_equality_ignores_name() {
        assert_eq!(
            Function::new_known(5, Some("foo".into())),
            Function::new_known(5, Some("bar".into()))
        );
        assert_eq!(
            Parameter::new_known(5, Some("foo".into())),
            Parameter::new_known(5, None)
        );
        assert_ne!(Function::from_code(5), Function::from_code(6));
    }

    #[test]
    fn known_never_equals_named() {
        assert_ne!(Function::from_code(5), Function::new_named("5"));
        assert_ne!(Parameter::from_code(5), Parameter::new_named("5"));
    }

    #[test]
    fn hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(Function::new_static(1, "add"));
        set.insert(Function::new_known(1, Some("plus".into())));
        set.insert(Function::new_named("add"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors() {
        let known = Function::new_static(3, "mul");
        assert!(known.is_known());
        assert!(!known.is_named());
        assert_eq!(known.code(), Some(3));
        assert_eq!(known.name(), Some("mul"));

        let bare = Function::from_code(3);
        assert_eq!(bare.name(), None);

        let named = Parameter::new_named("amount");
        assert!(named.is_named());
        assert_eq!(named.code(), None);
        assert_eq!(named.name(), Some("amount"));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Function::new_static(1, "add").to_string(), "add");
        assert_eq!(Function::from_code(42).to_string(), "42");
        assert_eq!(Function::new_named("transfer").to_string(), "\"transfer\"");
    }

    #[test]
    fn literal_conversions() {
        assert_eq!(Function::from(7u64), Function::from_code(7));
        assert_eq!(Parameter::from("to"), Parameter::new_named("to"));
        assert_eq!(Parameter::from(String::from("to")), Parameter::new_named("to"));
    }

    #[test]
    fn debug_names_the_role() {
        let s = format!("{:?}", Function::new_static(1, "add"));
        assert!(s.starts_with("function"));
        assert!(s.contains("add"));
        let s = format!("{:?}", Parameter::new_named("x"));
        assert!(s.starts_with("parameter"));
    }
}
