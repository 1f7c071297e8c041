pub mod dimacs;
pub mod text;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Formatter};
use std::iter::FromIterator;

#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub String);

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(v.clone()),
            Literal::Negative(v) => Literal::Positive(v.clone()),
        }
    }

    /// The literal's truth value under `assignment`, or `None` while its
    /// variable is unbound.
    pub fn eval(&self, assignment: &Assignment) -> Option<bool> {
        assignment
            .value(self.variable())
            .map(|value| if self.is_positive() { value } else { !value })
    }
}

// Order by variable name, positive before negative, so clause iteration is
// name-ordered regardless of insertion order.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variable()
            .cmp(other.variable())
            .then_with(|| other.is_positive().cmp(&self.is_positive()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "!{}", v),
        }
    }
}

/// A disjunction of literals. Duplicates collapse; an empty clause is the
/// contradiction. Construction does not filter tautologies; that invariant
/// belongs to `Formula::new`.
#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|literal| self.literals.contains(&literal.negated()))
    }

    /// True iff exactly one literal is undecided and none is already true.
    pub fn is_unit(&self, assignment: &Assignment) -> bool {
        let mut undecided = 0;
        for literal in &self.literals {
            match literal.eval(assignment) {
                Some(true) => return false,
                Some(false) => {}
                None => {
                    undecided += 1;
                    if undecided > 1 {
                        return false;
                    }
                }
            }
        }
        undecided == 1
    }

    pub fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        let mut undecided = false;
        for literal in &self.literals {
            match literal.eval(assignment) {
                Some(true) => return Some(true),
                Some(false) => {}
                None => undecided = true,
            }
        }
        if undecided {
            None
        } else {
            Some(false)
        }
    }

    /// Applies `assignment` to the clause. A clause with a true literal is
    /// satisfied and drops out; otherwise the false literals are removed.
    /// A `Remaining` clause with no literals left signals contradiction to
    /// the caller.
    pub fn reduce(&self, assignment: &Assignment) -> Reduction {
        let mut remaining = BTreeSet::new();
        for literal in &self.literals {
            match literal.eval(assignment) {
                Some(true) => return Reduction::Satisfied,
                Some(false) => {}
                None => {
                    remaining.insert(literal.clone());
                }
            }
        }
        Reduction::Remaining(Clause { literals: remaining })
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.literals.is_empty() {
            return f.write_str("()");
        }
        if self.literals.len() > 1 {
            f.write_str("(")?;
        }
        let mut first = true;
        for literal in &self.literals {
            if first {
                first = false;
            } else {
                f.write_str(" | ")?;
            }
            write!(f, "{}", literal)?;
        }
        if self.literals.len() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Outcome of reducing a single clause under an assignment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Reduction {
    /// Some literal is true; the clause is satisfied and drops out.
    Satisfied,
    /// No literal is true; only the undecided literals remain.
    Remaining(Clause),
}

/// A conjunction of clauses. Tautological clauses are dropped at
/// construction, so the solver never sees them; an empty formula is
/// trivially true.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Formula {
    clauses: BTreeSet<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts
                .into_iter()
                .filter(|clause| !clause.is_tautology())
                .collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals())
            .map(|literal| literal.variable().clone())
            .collect()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        let mut undecided = false;
        for clause in &self.clauses {
            match clause.evaluate(assignment) {
                Some(false) => return Some(false),
                Some(true) => {}
                None => undecided = true,
            }
        }
        if undecided {
            None
        } else {
            Some(true)
        }
    }

    pub fn unit_clauses(&self, assignment: &Assignment) -> Vec<Clause> {
        self.clauses
            .iter()
            .filter(|clause| clause.is_unit(assignment))
            .cloned()
            .collect()
    }

    /// One literal per pure variable, carrying the polarity it always occurs
    /// with. Clauses that already evaluate true do not constrain purity.
    pub fn pure_literals(&self, assignment: &Assignment) -> Vec<Literal> {
        let mut polarities: BTreeMap<&Variable, (bool, bool)> = BTreeMap::new();
        for clause in &self.clauses {
            if clause.evaluate(assignment) == Some(true) {
                continue;
            }
            for literal in clause.literals() {
                if literal.eval(assignment).is_none() {
                    let seen = polarities.entry(literal.variable()).or_insert((false, false));
                    if literal.is_positive() {
                        seen.0 = true;
                    } else {
                        seen.1 = true;
                    }
                }
            }
        }
        polarities
            .into_iter()
            .filter_map(|(variable, seen)| match seen {
                (true, false) => Some(Literal::Positive(variable.clone())),
                (false, true) => Some(Literal::Negative(variable.clone())),
                _ => None,
            })
            .collect()
    }

    /// Reduces every clause under `assignment`. Satisfied clauses drop out;
    /// `None` reports that some clause reduced to empty, a contradiction,
    /// and no formula is produced.
    pub fn reduce(&self, assignment: &Assignment) -> Option<Formula> {
        let mut clauses = BTreeSet::new();
        for clause in &self.clauses {
            match clause.reduce(assignment) {
                Reduction::Satisfied => {}
                Reduction::Remaining(reduced) => {
                    if reduced.is_empty() {
                        return None;
                    }
                    clauses.insert(reduced);
                }
            }
        }
        Some(Formula { clauses })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for clause in &self.clauses {
            if first {
                first = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// A partial mapping from variables to truth values. Each search node owns
/// its copy; nothing is shared across branches.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, variable: Variable, value: bool) {
        self.values.insert(variable, value);
    }

    pub fn value(&self, variable: &Variable) -> Option<bool> {
        self.values.get(variable).copied()
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.values.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bindings in sorted variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, bool)> {
        self.values.iter().map(|(variable, value)| (variable, *value))
    }
}

impl FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
pub(crate) fn p(name: &str) -> Literal {
    Literal::Positive(Variable(name.to_string()))
}

#[cfg(test)]
pub(crate) fn n(name: &str) -> Literal {
    Literal::Negative(Variable(name.to_string()))
}

#[cfg(test)]
pub(crate) fn assignment(bindings: &[(&str, bool)]) -> Assignment {
    bindings
        .iter()
        .map(|(name, value)| (Variable(name.to_string()), *value))
        .collect()
}

#[cfg(test)]
pub(crate) use self::strategies::formula_strategy;

#[cfg(test)]
mod strategies {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn literal_strategy() -> impl Strategy<Value = Literal> {
        ("[a-h]", any::<bool>()).prop_map(|(name, positive)| {
            let variable = Variable(name);
            if positive {
                Literal::Positive(variable)
            } else {
                Literal::Negative(variable)
            }
        })
    }

    pub(crate) fn formula_strategy() -> impl Strategy<Value = Formula> {
        vec(vec(literal_strategy(), 1..=3), 0..=12)
            .prop_map(|clauses| Formula::new(clauses.into_iter().map(Clause::new)))
    }
}
