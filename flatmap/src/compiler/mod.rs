mod accessor;
mod compiled_mapping;
mod path_compiler;

pub use accessor::{AbsentElement, CompiledAccessor, walk};
pub use compiled_mapping::{CompiledMapping, MemberPlan, PlannedBinding};
pub use path_compiler::PathCompiler;
