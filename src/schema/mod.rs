pub mod content;
pub mod neighborhood;
pub mod template_kind;
