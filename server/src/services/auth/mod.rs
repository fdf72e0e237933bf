pub mod bearer;
pub mod principal;
pub mod token_table;

pub use bearer::BearerToken;
pub use principal::Principal;
pub use token_table::TokenTable;
