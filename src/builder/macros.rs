//! Macros for ergonomic state and map construction.

/// Generate a State trait implementation for simple enums.
///
/// The enum derives everything a state needs (`Copy`, ordering, hashing,
/// serde) and implements `Display` with the variant name.
///
/// # Example
///
/// ```
/// use statekeeper::core::State;
/// use statekeeper::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Open,
///         Closed,
///         Locked,
///     }
/// }
///
/// assert_eq!(Door::Locked.name(), "Locked");
/// assert_eq!(Door::Open.to_string(), "Open");
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
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
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
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad($crate::core::State::name(self))
            }
        }
    };
}

/// Build a [`TransitionMap`](crate::core::TransitionMap) from a literal.
///
/// Each entry lists a state and the states it may move to. Edge closure is
/// not checked; call `validate()` on the result when the map comes from an
/// untrusted source.
///
/// # Example
///
/// ```
/// use statekeeper::core::TransitionMap;
/// use statekeeper::transition_map;
///
/// let door: TransitionMap<String> = transition_map! {
///     "OPEN" => ["CLOSED"],
///     "CLOSED" => ["LOCKED", "OPEN"],
///     "LOCKED" => ["CLOSED"],
/// };
///
/// assert_eq!(door.len(), 3);
/// ```
#[macro_export]
macro_rules! transition_map {
    ($($from:expr => [$($to:expr),* $(,)?]),* $(,)?) => {
        $crate::core::TransitionMap::from_typed_edges(::std::vec![
            $((
                ::std::convert::Into::into($from),
                ::std::vec![$(::std::convert::Into::into($to)),*],
            )),*
        ])
    };
}
