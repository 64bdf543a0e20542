//! Macros for ergonomic table construction.

/// Build a [`TransitionTable`](crate::table::TransitionTable) from a literal
/// list of states and their `on` maps.
///
/// Hooks and data are attached with [`StateBuilder`](crate::builder::StateBuilder)
/// or [`TransitionTable::set_enter`](crate::table::TransitionTable::set_enter).
///
/// # Example
///
/// ```
/// use uism::table;
///
/// let table = table! {
///     "idle" => { "FETCH" => "loading" },
///     "loading" => { "RESOLVE" => "ready", "REJECT" => "failed" },
///     "ready" => {},
///     "failed" => { "RETRY" => "loading" },
/// };
///
/// assert_eq!(table.len(), 4);
/// assert!(table.get("ready").unwrap().is_terminal());
/// ```
#[macro_export]
macro_rules! table {
    (
        $(
            $state:expr => { $( $event:expr => $to:expr ),* $(,)? }
        ),* $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut table = $crate::table::TransitionTable::new();
        $(
            table.insert(
                $state,
                $crate::builder::StateBuilder::new()
                    $( .on($event, $to) )*
                    .build(),
            );
        )*
        table
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::StateId;

    #[test]
    fn table_macro_declares_states_and_events() {
        let table = table! {
            "start" => { "SUCCESS" => "next", "FAIL" => "error" },
            "next" => {},
            "error" => { "RETRY" => "start" },
        };

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.destination("start", "FAIL"),
            Some(&StateId::from("error"))
        );
        assert_eq!(
            table
                .get("start")
                .unwrap()
                .events()
                .names()
                .collect::<Vec<_>>(),
            vec!["SUCCESS", "FAIL"]
        );
    }

    #[test]
    fn table_macro_accepts_empty_body() {
        let table = table! {};
        assert!(table.is_empty());
    }

    #[test]
    fn table_macro_accepts_expressions() {
        let first = "a";
        let table = table! {
            first => { "GO" => String::from("b") },
            "b" => {},
        };

        assert!(table.contains("a"));
        assert_eq!(table.destination("a", "GO"), Some(&StateId::from("b")));
    }
}
