pub mod err;
pub mod lexis;
pub mod syntax;

mod context;
mod scope;
