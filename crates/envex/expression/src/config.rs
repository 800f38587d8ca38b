use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::function::{Function, FunctionRole};
use crate::identifier::{Identifier, Role};
use crate::parameter::{Parameter, ParameterRole};
use crate::registry::KnownRegistry;

/// A coded identifier with its display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownEntry {
    pub code: u64,
    pub name: String,
}

impl KnownEntry {
    pub fn new(code: u64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    fn to_identifier<R>(&self) -> Identifier<R> {
        Identifier::new_known(self.code, Some(self.name.clone()))
    }
}

/// Extra known identifiers to install at startup.
///
/// ```json
/// { "functions": [{ "code": 100, "name": "transfer" }], "parameters": [] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Function codes to register.
    #[serde(default)]
    pub functions: Vec<KnownEntry>,
    /// Parameter codes to register.
    #[serde(default)]
    pub parameters: Vec<KnownEntry>,
}

impl RegistryConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.parameters.is_empty()
    }

    /// Register every entry into the given registries. Entries overwrite
    /// existing codes.
    pub fn apply_to(
        &self,
        functions: &KnownRegistry<FunctionRole>,
        parameters: &KnownRegistry<ParameterRole>,
    ) -> Result<(), ConfigError> {
        for entry in &self.functions {
            functions.register(entry.to_identifier::<FunctionRole>())?;
        }
        for entry in &self.parameters {
            parameters.register(entry.to_identifier::<ParameterRole>())?;
        }
        info!(
            functions = self.functions.len(),
            parameters = self.parameters.len(),
            "Registry config applied"
        );
        Ok(())
    }

    /// Register every entry into the process-wide registries.
    pub fn apply(&self) -> Result<(), ConfigError> {
        self.apply_to(FunctionRole::global(), ParameterRole::global())
    }
}

impl From<&KnownEntry> for Function {
    fn from(entry: &KnownEntry) -> Self {
        entry.to_identifier()
    }
}

impl From<&KnownEntry> for Parameter {
    fn from(entry: &KnownEntry) -> Self {
        entry.to_identifier()
    }
}
