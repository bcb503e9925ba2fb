//! Macros for declaring state payloads.

/// Generate a `State` implementation for a plain enum.
///
/// # Example
///
/// ```
/// use signalgraph::core::State;
/// use signalgraph::state_enum;
///
/// state_enum! {
///     pub enum Token {
///         Start,
///         Digits,
///         Accept,
///     }
///     final: [Accept]
/// }
///
/// assert_eq!(Token::Digits.name(), "Digits");
/// assert!(Token::Accept.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
