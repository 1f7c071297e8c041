pub mod formula;
mod solver;

#[cfg(test)]
mod brute_force;

pub use formula::{Assignment, Clause, Formula, Literal, ParseError, Variable};
pub use solver::Solver;

/// Outcome of a solve: either a satisfying total assignment or the fact
/// that none exists.
#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        match self {
            SatResult::Satisfiable(_) => true,
            SatResult::Unsatisfiable => false,
        }
    }

    /// The model, when satisfiable.
    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sat_result_accessors() {
        let model: Assignment = vec![(Variable("x".to_string()), true)].into_iter().collect();

        let sat = SatResult::Satisfiable(model.clone());
        assert!(sat.is_satisfiable());
        assert_eq!(sat.model(), Some(&model));

        let unsat = SatResult::Unsatisfiable;
        assert!(!unsat.is_satisfiable());
        assert_eq!(unsat.model(), None);
    }
}
