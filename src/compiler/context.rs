use std::mem;

use log::{debug, warn};

use crate::sys_error;

use super::scope::{Scope, Tag};
use super::syntax::ast::crumb::{Binding, Identifier};
use super::syntax::err::ParseError;

/// State shared by one parse run: the symbol table and every diagnostic reported so far.
pub struct Context {
    scope: Scope<Binding>,
    errors: Vec<ParseError>,
}

impl Context {
    #[must_use]
    pub fn new() -> Context {
        let mut scope = Scope::new();
        scope.enter(Tag::Global);
        Context {
            scope,
            errors: Vec::new(),
        }
    }

    pub fn enter(&mut self, tag: Tag) {
        debug!("entering {tag} scope at depth {}", self.scope.depth() + 1);
        self.scope.enter(tag);
    }

    pub fn leave(&mut self, tag: Tag) {
        if let Err(error) = self.scope.leave(tag) {
            sys_error!("{error}");
        }
    }

    pub fn declare(&mut self, identifier: Identifier, binding: Binding) {
        match self.scope.declare(identifier.clone(), binding) {
            Ok(Some(_)) => debug!("`{identifier}` shadows an earlier declaration"),
            Ok(None) => {}
            Err(error) => sys_error!("{error}"),
        }
    }

    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<Binding> {
        self.scope.lookup_symbol(identifier).ok().flatten()
    }

    pub fn report(&mut self, error: ParseError) {
        warn!("{error}");
        self.errors.push(error);
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        mem::take(&mut self.errors)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
