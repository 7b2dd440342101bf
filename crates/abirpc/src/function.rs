//! Callable entries of a registry.

use crate::argument::Arguments;
use crate::hash::Hasher256;
use crate::selector;

/// A function (or, when nameless, the constructor).
///
/// `name` is the registry key, which differs from `raw_name` when the document
/// declares the same name more than once. Signatures always use `raw_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    /// The name as declared. Overloads keyed `foo0`, `foo1`, ... still hash as
    /// `foo(...)`, so their selectors match what a deployed contract dispatches on
    /// rather than `keccak("foo0(...)")`.
    pub raw_name: String,
    pub inputs: Arguments,
    pub outputs: Arguments,
    /// Calling it does not change state.
    pub constant: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, inputs: Arguments, outputs: Arguments, constant: bool) -> Self {
        let name = name.into();
        Self { raw_name: name.clone(), name, inputs, outputs, constant }
    }

    pub fn constructor(inputs: Arguments) -> Self {
        Self { inputs, ..Self::default() }
    }

    pub fn is_constructor(&self) -> bool {
        self.raw_name.is_empty()
    }

    /// e.g. `transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        selector::signature(&self.raw_name, &self.inputs)
    }

    pub fn selector<H: Hasher256 + ?Sized>(&self, hasher: &H) -> [u8; 4] {
        selector::selector(hasher, &self.signature())
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inputs: Vec<String> = self
            .inputs
            .iter()
            .map(|a| if a.name.is_empty() { a.ty.to_string() } else { format!("{} {}", a.ty, a.name) })
            .collect();
        let outputs: Vec<String> = self
            .outputs
            .iter()
            .map(|a| if a.name.is_empty() { a.ty.to_string() } else { format!("{} {}", a.ty, a.name) })
            .collect();
        let constant = if self.constant { "constant " } else { "" };
        write!(
            f,
            "function {}({}) {}returns({})",
            self.raw_name,
            inputs.join(", "),
            constant,
            outputs.join(", ")
        )
    }
}
