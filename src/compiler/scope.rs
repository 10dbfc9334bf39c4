use std::{
    collections::HashMap,
    fmt::{self, Display},
};

use self::err::ScopeError;

pub mod err;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Global,
    Block,
    Loop,
    Function(String),
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Global => {
                write!(f, "Global")
            }
            Tag::Block => {
                write!(f, "Block")
            }
            Tag::Loop => {
                write!(f, "Loop")
            }
            Tag::Function(name) => {
                write!(f, "Function {name}")
            }
        }
    }
}

/// Chain of symbol layers, innermost first. Lookups fall through to outer layers.
pub struct Scope<T: Clone> {
    current_layer: LayerLink<T>,
}

impl<T: Clone> Scope<T> {
    pub fn new() -> Scope<T> {
        Scope {
            current_layer: None,
        }
    }

    pub fn enter(&mut self, tag: Tag) {
        let new_layer = Box::new(Layer::new(tag, self.current_layer.take()));
        self.current_layer = Some(new_layer);
    }

    pub fn leave(&mut self, tag: Tag) -> Result<(), ScopeError> {
        let Some(layer) = self.current_layer.take() else {
            return Err(ScopeError::NullScope);
        };
        if layer.tag != tag {
            let encountered = layer.tag.clone();
            self.current_layer = Some(layer);
            return Err(ScopeError::ScopeMismatch {
                expected: tag,
                encountered,
            });
        }
        self.current_layer = layer.outer;
        Ok(())
    }

    /// Binds `symbol` in the innermost layer. A name already bound in that layer is shadowed
    /// and its previous binding returned.
    pub fn declare(&mut self, symbol: String, symbol_info: T) -> Result<Option<T>, ScopeError> {
        self.current_layer
            .as_mut()
            .map_or(Err(ScopeError::NullScope), |layer| {
                Ok(layer.declare(symbol, symbol_info))
            })
    }

    pub fn lookup_symbol(&self, symbol: &str) -> Result<Option<T>, ScopeError> {
        self.current_layer
            .as_ref()
            .map_or(Err(ScopeError::NullScope), |layer| Ok(layer.lookup(symbol)))
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut layer = self.current_layer.as_deref();
        while let Some(current) = layer {
            depth += 1;
            layer = current.outer.as_deref();
        }
        depth
    }
}

impl<T: Clone> Default for Scope<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub type LayerLink<T> = Option<Box<Layer<T>>>;

pub struct Layer<T: Clone> {
    pub tag: Tag,
    pub symbol_table: HashMap<String, T>,
    pub outer: LayerLink<T>,
}

impl<T: Clone> Layer<T> {
    pub fn new(tag: Tag, outer: LayerLink<T>) -> Layer<T> {
        Layer {
            tag,
            symbol_table: HashMap::new(),
            outer,
        }
    }

    pub fn declare(&mut self, symbol: String, symbol_info: T) -> Option<T> {
        self.symbol_table.insert(symbol, symbol_info)
    }

    pub fn lookup(&self, symbol: &str) -> Option<T> {
        let result = self.symbol_table.get(symbol);
        if result.is_some() {
            return result.cloned();
        }
        match self.outer.as_ref() {
            None => None,
            Some(outer) => outer.lookup(symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn inner_layers_see_outer_symbols() {
        let mut scope = Scope::new();
        scope.enter(Tag::Global);
        scope.declare(String::from("x"), 1).unwrap();
        scope.enter(Tag::Block);
        assert_eq!(scope.lookup_symbol("x"), Ok(Some(1)));
        scope.declare(String::from("y"), 2).unwrap();
        scope.leave(Tag::Block).unwrap();
        assert_eq!(scope.lookup_symbol("y"), Ok(None));
        assert_eq!(scope.depth(), 1);
    }

    #[test]
    fn redeclaration_shadows() {
        let mut scope = Scope::new();
        scope.enter(Tag::Global);
        assert_eq!(scope.declare(String::from("x"), 1), Ok(None));
        assert_eq!(scope.declare(String::from("x"), 2), Ok(Some(1)));
        scope.enter(Tag::Function(String::from("f")));
        scope.declare(String::from("x"), 3).unwrap();
        assert_eq!(scope.lookup_symbol("x"), Ok(Some(3)));
        scope.leave(Tag::Function(String::from("f"))).unwrap();
        assert_eq!(scope.lookup_symbol("x"), Ok(Some(2)));
    }

    #[test]
    fn unbalanced_leave_is_refused() {
        let mut scope: Scope<i32> = Scope::new();
        assert_eq!(scope.leave(Tag::Global), Err(ScopeError::NullScope));
        assert_eq!(scope.lookup_symbol("x"), Err(ScopeError::NullScope));
        scope.enter(Tag::Loop);
        assert_eq!(
            scope.leave(Tag::Block),
            Err(ScopeError::ScopeMismatch {
                expected: Tag::Block,
                encountered: Tag::Loop,
            })
        );
        assert_eq!(scope.depth(), 1);
    }
}
