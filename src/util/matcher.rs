/// Generates the `match_*` / `expect_*` / `digest_*` family for each named token class
/// (`Keyword`, `Symbol`) on a type exposing `peek(&self) -> &Token` and `next(&mut self)`.
#[macro_export]
macro_rules! define_token_matchers {
    ($($class:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[must_use]
                pub fn [<match_ $class:snake>](&self, expected: $class) -> bool {
                    self.peek().kind == $crate::compiler::lexis::token::TokenKind::$class(expected)
                }

                pub fn [<expect_ $class:snake>](&mut self, expected: $class) -> bool {
                    let matched = self.[<match_ $class:snake>](expected);
                    if matched {
                        self.next();
                    }
                    matched
                }

                /// # Errors
                pub fn [<digest_ $class:snake>](
                    &mut self,
                    expected: $class,
                ) -> Result<(), $crate::compiler::syntax::err::ParseError> {
                    if self.[<expect_ $class:snake>](expected) {
                        Ok(())
                    } else {
                        Err($crate::compiler::syntax::err::ParseError::new(
                            $crate::compiler::syntax::err::ParseErrorKind::[<Missing $class>](
                                expected,
                            ),
                            self.peek(),
                        ))
                    }
                }
            )*
        }
    };
}
