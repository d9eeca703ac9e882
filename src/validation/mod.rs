pub mod rules;
pub mod validator;

pub use rules::{CatalogueTypenameRule, CleaningRule, MissingMembersRule, RawMapTypenameRule};
pub use validator::Validator;
