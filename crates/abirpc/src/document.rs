//! # Schema Documents
//!
//! The JSON form of a contract interface: an array of entries, each with a
//! `type` of `function`, `constructor` or `event` (absent means `function`).
//! Unknown fields are ignored.

use abipack::Error as CodecError;
use abipack::Limits;
use abipack::Type;
use serde::Deserialize;

use crate::argument::Argument;
use crate::argument::Arguments;

/// One entry of a schema document, as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub constant: bool,
    /// `view` and `pure` imply `constant`.
    #[serde(default)]
    pub state_mutability: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub inputs: Option<Vec<RawArgument>>,
    #[serde(default)]
    pub outputs: Option<Vec<RawArgument>>,
}

impl Entry {
    pub fn is_constant(&self) -> bool {
        self.constant || matches!(self.state_mutability.as_deref(), Some("view") | Some("pure"))
    }
}

/// One argument of an entry, as written. `components` describes tuple members.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArgument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub components: Option<Vec<RawArgument>>,
    #[serde(default)]
    pub indexed: bool,
}

impl RawArgument {
    /// Resolves the type string and any components into an [`Argument`].
    pub fn resolve(&self, limits: &Limits) -> Result<Argument, CodecError> {
        Ok(Argument {
            name: self.name.clone(),
            ty: self.resolve_type(0, limits.max_depth)?,
            indexed: self.indexed,
        })
    }

    fn resolve_type(&self, depth: usize, max_depth: usize) -> Result<Type, CodecError> {
        if depth > max_depth {
            return Err(CodecError::RecursionLimitExceeded);
        }
        // each array suffix is one level of nesting around the base
        let suffixes = self.ty.matches('[').count();
        let budget = max_depth - depth;
        if suffixes > budget {
            return Err(CodecError::RecursionLimitExceeded);
        }
        let components = match &self.components {
            Some(raw) => {
                let mut resolved = Vec::with_capacity(raw.len());
                for component in raw {
                    let inner = component.resolve_type(depth + suffixes + 1, max_depth)?;
                    resolved.push((component.name.clone(), inner));
                }
                Some(resolved)
            }
            None => None,
        };
        Type::parse_nested(&self.ty, components, budget)
    }
}

/// Resolves an optional argument list; absent means empty.
pub(crate) fn resolve_all(raw: Option<&[RawArgument]>, limits: &Limits) -> Result<Arguments, CodecError> {
    raw.unwrap_or_default().iter().map(|arg| arg.resolve(limits)).collect()
}
