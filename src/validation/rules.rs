//! Table checks, accumulated with `Validation`.

use crate::core::StateId;
use crate::table::TransitionTable;
use crate::validation::violations::TableViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Check the structure of `table`, accumulating ALL violations.
///
/// Returns `Validation::Success(())` when every destination is declared and
/// `initial` (if given) names a declared state. Otherwise returns
/// `Validation::Failure` listing every problem found. Dangling destinations
/// are reported in state-name order.
pub fn validate_table(
    table: &TransitionTable,
    initial: Option<&StateId>,
) -> Validation<(), NonEmptyVec<TableViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

    let check = if table.is_empty() {
        Validation::fail(TableViolation::EmptyTable)
    } else {
        Validation::success(())
    };
    checks.push(check);

    if let Some(initial) = initial {
        let check = if table.contains(initial.as_str()) {
            Validation::success(())
        } else {
            Validation::fail(TableViolation::UnknownInitialState {
                state: initial.clone(),
            })
        };
        checks.push(check);
    }

    let mut states: Vec<_> = table.states().collect();
    states.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (state, definition) in states {
        for (event, to) in definition.events().iter() {
            if !table.contains(to.as_str()) {
                checks.push(Validation::fail(TableViolation::DanglingDestination {
                    state: state.clone(),
                    event: event.to_string(),
                    to: to.clone(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;

    #[test]
    fn well_formed_table_passes() {
        let table = table! {
            "start" => { "SUCCESS" => "next" },
            "next" => { "BACK" => "start" },
        };

        let result = validate_table(&table, Some(&StateId::from("start")));
        assert!(result.is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let table = table! {
            "b" => { "GO" => "nowhere" },
            "a" => { "GO" => "void", "STAY" => "a" },
        };

        let result = validate_table(&table, Some(&StateId::from("missing")));

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);

                let has_initial = errors
                    .iter()
                    .any(|e| matches!(e, TableViolation::UnknownInitialState { .. }));
                let dangling: Vec<_> = errors
                    .iter()
                    .filter_map(|e| match e {
                        TableViolation::DanglingDestination { state, .. } => {
                            Some(state.as_str())
                        }
                        _ => None,
                    })
                    .collect();

                assert!(has_initial);
                assert_eq!(dangling, vec!["a", "b"]);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn empty_table_fails() {
        let table = TransitionTable::new();
        let result = validate_table(&table, None);

        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            assert!(errors
                .iter()
                .any(|e| matches!(e, TableViolation::EmptyTable)));
        }
    }

    #[test]
    fn initial_state_is_optional() {
        let table = table! { "only" => {} };
        assert!(validate_table(&table, None).is_success());
    }
}
