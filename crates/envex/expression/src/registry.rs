use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::RegistryError;
use crate::identifier::{Identifier, Role};

/// Table mapping numeric codes to canonical identifiers of one role.
///
/// Decoding consults the registry to restore display names for bare codes
/// on the wire. Registration is last-write-wins and may happen at any time,
/// so the same bytes can decode to differently-named (but equal)
/// identifiers before and after a concurrent `register`. Reads and writes
/// are serialised by an `RwLock`.
pub struct KnownRegistry<R: Role> {
    entries: RwLock<HashMap<u64, Identifier<R>>>,
}

impl<R: Role> KnownRegistry<R> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A registry holding the role's well-known identifiers.
    pub fn seeded() -> Self {
        let entries = R::well_known()
            .into_iter()
            .filter_map(|id| id.code().map(|code| (code, id)))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Insert or overwrite the entry for `identifier`'s code.
    ///
    /// Returns the entry that was replaced, if any. Named identifiers have no
    /// code and are rejected without touching the table.
    pub fn register(
        &self,
        identifier: Identifier<R>,
    ) -> Result<Option<Identifier<R>>, RegistryError> {
        let code = identifier.code().ok_or_else(|| RegistryError::NamedIdentifier {
            kind: R::KIND,
            name: identifier.name().unwrap_or_default().to_string(),
        })?;
        debug!(
            kind = R::KIND,
            code,
            name = identifier.name().unwrap_or(""),
            "Registering known identifier"
        );
        let previous = self.write().insert(code, identifier);
        if let Some(ref prev) = previous {
            debug!(kind = R::KIND, code, replaced = %prev, "Replaced known identifier");
        }
        Ok(previous)
    }

    pub fn lookup(&self, code: u64) -> Option<Identifier<R>> {
        self.read().get(&code).cloned()
    }

    /// The registered identifier for `code`, or a bare unnamed one.
    pub fn canonical_or_bare(&self, code: u64) -> Identifier<R> {
        self.lookup(code)
            .unwrap_or_else(|| Identifier::from_code(code))
    }

    pub fn contains(&self, code: u64) -> bool {
        self.read().contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered codes in ascending order.
    pub fn codes(&self) -> Vec<u64> {
        let mut codes: Vec<u64> = self.read().keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    // A poisoned lock still holds a consistent map: every write is a single insert.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<u64, Identifier<R>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<u64, Identifier<R>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Role> Default for KnownRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
