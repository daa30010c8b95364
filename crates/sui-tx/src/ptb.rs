//! Programmable Transaction Structures
//!
//! The accumulator that call builders append to. It is never executed here:
//! a wallet or signer resolves object versions, sets gas, and signs it.
//!
//! Every command may produce a value that later commands reference by
//! position, so the order of appends is significant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bcs;

/// Inputs and commands are addressed by `u16`
pub const MAX_ENTRIES: usize = u16::MAX as usize + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("Transaction has no room for {requested} more inputs ({used} of {max} used)", max = MAX_ENTRIES)]
    TooManyInputs { used: usize, requested: usize },

    #[error("Transaction has no room for {requested} more commands ({used} of {max} used)", max = MAX_ENTRIES)]
    TooManyCommands { used: usize, requested: usize },
}

impl From<TxError> for vault_core::Error {
    fn from(err: TxError) -> Self {
        vault_core::Error::invalid_parameters(err.to_string())
    }
}

/// Transaction-local reference to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The coin paying for gas
    GasCoin,
    /// An entry of `inputs`
    Input(u16),
    /// The single result of a command
    Result(u16),
    /// One element of a command returning a tuple
    NestedResult(u16, u16),
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS-encoded pure value
    Pure(Vec<u8>),
    /// Object reference whose version and ownership are resolved by the signer
    UnresolvedObject {
        #[serde(rename = "objectId")]
        object_id: String,
    },
}

/// A Move function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    /// `package::module::function` target string
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

/// A single pending command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<MoveCall>),
    TransferObjects {
        objects: Vec<Argument>,
        address: Argument,
    },
}

impl Command {
    /// Get the Move call if this command is one
    pub fn as_move_call(&self) -> Option<&MoveCall> {
        match self {
            Self::MoveCall(call) => Some(call),
            Self::TransferObjects { .. } => None,
        }
    }
}

/// Either a raw object ID or a handle produced earlier in the same transaction
///
/// `Resolved` is listed first so `"GasCoin"` reads back as the gas coin
/// rather than as an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectHandle {
    Resolved(Argument),
    Id(String),
}

impl From<&str> for ObjectHandle {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for ObjectHandle {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<&String> for ObjectHandle {
    fn from(id: &String) -> Self {
        Self::Id(id.clone())
    }
}

impl From<Argument> for ObjectHandle {
    fn from(arg: Argument) -> Self {
        Self::Resolved(arg)
    }
}

/// Complete unsigned programmable transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl ProgrammableTransaction {
    /// Create a new empty transaction
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &[CallArg] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Check if nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.commands.is_empty()
    }

    /// Check that `inputs` more inputs and `commands` more commands fit.
    ///
    /// Builders call this before their first append so a full transaction
    /// is rejected with nothing appended.
    pub fn reserve(&self, inputs: usize, commands: usize) -> Result<(), TxError> {
        if self.inputs.len() + inputs > MAX_ENTRIES {
            return Err(TxError::TooManyInputs {
                used: self.inputs.len(),
                requested: inputs,
            });
        }
        if self.commands.len() + commands > MAX_ENTRIES {
            return Err(TxError::TooManyCommands {
                used: self.commands.len(),
                requested: commands,
            });
        }
        Ok(())
    }

    fn next_input(&self) -> Result<u16, TxError> {
        u16::try_from(self.inputs.len()).map_err(|_| TxError::TooManyInputs {
            used: self.inputs.len(),
            requested: 1,
        })
    }

    /// Add a pre-encoded pure input
    pub fn pure(&mut self, bytes: Vec<u8>) -> Result<Argument, TxError> {
        let index = self.next_input()?;
        self.inputs.push(CallArg::Pure(bytes));
        Ok(Argument::Input(index))
    }

    pub fn pure_u8(&mut self, value: u8) -> Result<Argument, TxError> {
        self.pure(bcs::encode_u8(value))
    }

    pub fn pure_u64(&mut self, value: u64) -> Result<Argument, TxError> {
        self.pure(bcs::encode_u64(value))
    }

    /// Add a `vector<u8>` input
    pub fn pure_bytes(&mut self, value: &[u8]) -> Result<Argument, TxError> {
        self.pure(bcs::encode_bytes(value))
    }

    /// Add an object input, reusing the existing input if the same ID was added before
    pub fn object(&mut self, object_id: &str) -> Result<Argument, TxError> {
        let existing = self.inputs.iter().position(|input| {
            matches!(input, CallArg::UnresolvedObject { object_id: id } if id == object_id)
        });
        // Existing positions were range-checked when they were pushed
        if let Some(index) = existing.and_then(|i| u16::try_from(i).ok()) {
            return Ok(Argument::Input(index));
        }

        let index = self.next_input()?;
        self.inputs.push(CallArg::UnresolvedObject {
            object_id: object_id.to_string(),
        });
        Ok(Argument::Input(index))
    }

    /// Turn a handle into an argument, adding an object input for raw IDs
    pub fn resolve(&mut self, handle: &ObjectHandle) -> Result<Argument, TxError> {
        match handle {
            ObjectHandle::Id(id) => self.object(id),
            ObjectHandle::Resolved(arg) => Ok(*arg),
        }
    }

    /// Append a Move call and return a handle to its result
    pub fn move_call(
        &mut self,
        package: &str,
        module: &str,
        function: &str,
        type_arguments: Vec<String>,
        arguments: Vec<Argument>,
    ) -> Result<Argument, TxError> {
        let index = u16::try_from(self.commands.len()).map_err(|_| TxError::TooManyCommands {
            used: self.commands.len(),
            requested: 1,
        })?;
        self.commands.push(Command::MoveCall(Box::new(MoveCall {
            package: package.to_string(),
            module: module.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        })));
        Ok(Argument::Result(index))
    }

    /// Append a transfer of `objects` to `address`
    pub fn transfer_objects(
        &mut self,
        objects: Vec<Argument>,
        address: Argument,
    ) -> Result<(), TxError> {
        self.reserve(0, 1)?;
        self.commands
            .push(Command::TransferObjects { objects, address });
        Ok(())
    }

    /// Iterate over the Move calls in order
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().filter_map(Command::as_move_call)
    }

    /// Get the raw bytes of a pure input
    pub fn pure_input(&self, arg: Argument) -> Option<&[u8]> {
        match arg {
            Argument::Input(index) => match self.inputs.get(index as usize) {
                Some(CallArg::Pure(bytes)) => Some(bytes.as_slice()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
