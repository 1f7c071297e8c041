use crate::*;

// Exhaustive search over all total assignments, returning the first
// satisfying one. Only fit for the small formulas tests build.
pub(crate) fn solve_brute_force(f: &Formula) -> Option<Assignment> {
    let variables: Vec<Variable> = f.variables().into_iter().collect();
    assert!(variables.len() <= 15); // just for safety

    for candidate in 0..(1u32 << variables.len()) {
        let assignment: Assignment = variables
            .iter()
            .enumerate()
            .map(|(i, variable)| (variable.clone(), candidate & (1 << i) != 0))
            .collect();
        if f.evaluate(&assignment) == Some(true) {
            return Some(assignment);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn finds_a_witness() {
        let f = Formula::new(vec![Clause::new(vec![p("x"), p("y")]), Clause::new(vec![n("x")])]);

        let witness = solve_brute_force(&f).expect("should be satisfiable");
        assert_eq!(f.evaluate(&witness), Some(true));
    }

    #[test]
    fn reports_unsat() {
        let f = Formula::new(vec![
            Clause::new(vec![p("x"), p("y")]),
            Clause::new(vec![n("x")]),
            Clause::new(vec![n("y")]),
        ]);

        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn empty_formula_has_the_empty_witness() {
        let f = Formula::new(vec![]);

        assert_eq!(solve_brute_force(&f), Some(Assignment::new()));
    }

    #[test]
    fn empty_clause_has_no_witness() {
        let f = Formula::new(vec![Clause::new(vec![])]);

        assert_eq!(solve_brute_force(&f), None);
    }
}
