use crate::formula::{Assignment, Formula, Variable};
use crate::SatResult;
use log::trace;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Depth-first DPLL search over immutable formula values. Every recursion
/// level owns its own (formula, assignment) pair, so backtracking is just
/// returning; the caller's values are untouched by a failed branch.
pub struct Solver {
    formula: Formula,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self { formula }
    }

    /// Decides satisfiability. A satisfiable result carries a model that is
    /// total over the input formula's variables.
    pub fn solve(&self) -> SatResult {
        match self.dpll(self.formula.clone(), Assignment::new()) {
            Some(model) => SatResult::Satisfiable(model),
            None => SatResult::Unsatisfiable,
        }
    }

    fn dpll(&self, formula: Formula, assignment: Assignment) -> Option<Assignment> {
        let (formula, assignment) = self.simplify(formula, assignment)?;

        match formula.evaluate(&assignment) {
            Some(true) => return Some(self.totalize(assignment)),
            Some(false) => return None,
            None => {}
        }

        let variable = self.choose_variable(&formula, &assignment);
        for &value in &[true, false] {
            trace!("branching on {} = {}", variable, value);
            let mut extended = assignment.clone();
            extended.assign(variable.clone(), value);
            match formula.reduce(&extended) {
                // this polarity contradicts immediately; skip the branch
                None => {}
                Some(reduced) => {
                    if let Some(model) = self.dpll(reduced, extended) {
                        return Some(model);
                    }
                }
            }
        }
        None
    }

    /// Runs unit propagation and pure-literal elimination to a fixpoint.
    /// `None` means this branch hit a contradiction. The returned formula is
    /// always reduced under the returned assignment: every literal it still
    /// mentions is undecided.
    fn simplify(
        &self,
        mut formula: Formula,
        mut assignment: Assignment,
    ) -> Option<(Formula, Assignment)> {
        let mut changed = true;
        while changed {
            changed = false;

            let mut units = formula.unit_clauses(&assignment);
            while !units.is_empty() {
                changed = true;
                for unit in units {
                    // reduction strips decided literals, so a unit clause
                    // still holds its single undecided literal; a binding
                    // that would have decided it surfaces as a
                    // contradiction before the clause is reached
                    let literal = unit
                        .literals()
                        .find(|literal| literal.eval(&assignment).is_none())
                        .expect("unit clause must contain an undecided literal")
                        .clone();
                    trace!("propagating unit {}", literal);
                    assignment.assign(literal.variable().clone(), literal.is_positive());
                    formula = formula.reduce(&assignment)?;
                }
                units = formula.unit_clauses(&assignment);
            }

            let pures = formula.pure_literals(&assignment);
            if !pures.is_empty() {
                changed = true;
                for literal in &pures {
                    trace!("binding pure literal {}", literal);
                    assignment.assign(literal.variable().clone(), literal.is_positive());
                }
                formula = formula.reduce(&assignment)?;
            }
        }
        Some((formula, assignment))
    }

    /// Completes a satisfying partial assignment over the input formula's
    /// variables. Variables the search never had to constrain default to
    /// false.
    fn totalize(&self, mut assignment: Assignment) -> Assignment {
        for variable in self.formula.variables() {
            if !assignment.contains(&variable) {
                trace!("defaulting {} = false", variable);
                assignment.assign(variable, false);
            }
        }
        assignment
    }

    /// Picks the branching variable: the one occurring most often among
    /// undecided literals of not-yet-satisfied clauses, ties broken toward
    /// the lexicographically least name.
    fn choose_variable(&self, formula: &Formula, assignment: &Assignment) -> Variable {
        let mut counts: BTreeMap<&Variable, usize> = BTreeMap::new();
        for clause in formula.clauses() {
            if clause.evaluate(assignment) == Some(true) {
                continue;
            }
            for literal in clause.literals() {
                if literal.eval(assignment).is_none() {
                    *counts.entry(literal.variable()).or_insert(0) += 1;
                }
            }
        }

        counts
            .into_iter()
            .max_by_key(|&(variable, count)| (count, Reverse(variable)))
            .map(|(variable, _)| variable.clone())
            .unwrap_or_else(|| {
                formula
                    .variables()
                    .into_iter()
                    .find(|variable| !assignment.contains(variable))
                    .expect("an undecided formula has an unassigned variable")
            })
    }
}
