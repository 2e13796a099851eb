pub mod assemble_report;
pub mod confirm;
pub mod resolve_factory;
pub mod submit;
