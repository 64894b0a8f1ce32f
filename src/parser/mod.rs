mod common;
mod recovery;
mod script;

pub use common::{descendants, node_text, ModuleReference, ParseResult, ReferenceKind};
pub use script::{ExportedDeclaration, ModuleItem, ScriptParser};
