use crate::formula::{Clause, Formula, Literal, ParseError, Variable};
use std::io::{BufRead, BufReader, Read};

/// Parses DIMACS CNF: `c` comment lines, one `p cnf <variables> <clauses>`
/// problem line before any clause, then clauses as integer literals each
/// terminated by `0`. Parsing stops once the declared number of clauses has
/// been read. Integer variables keep their decimal form as names.
pub fn parse<R: Read>(input: R) -> Result<Formula, ParseError> {
    let reader = BufReader::new(input);

    let mut clauses = vec![];
    let mut declared = None;

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                declared = Some(parse_header(tokens)?);
            }
            Some(_) => {
                let declared = match declared {
                    Some(declared) => declared,
                    None => return Err(ParseError::Format("clause before 'p cnf' line".into())),
                };
                clauses.push(parse_clause(tokens)?);
                if clauses.len() >= declared {
                    break;
                }
            }
        }
    }

    if declared.is_none() {
        return Err(ParseError::Format("missing 'p cnf' line".into()));
    }

    Ok(Formula::new(clauses))
}

/// Reads the clause count out of a `p cnf <variables> <clauses>` line.
fn parse_header<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<usize, ParseError> {
    let _ = tokens.next();
    if tokens.next() != Some("cnf") {
        return Err(ParseError::Format("expected 'p cnf'".into()));
    }
    let _variables = parse_count(tokens.next(), "variable count")?;
    parse_count(tokens.next(), "clause count")
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize, ParseError> {
    token
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| ParseError::Format(format!("invalid {}", what)))
}

fn parse_clause<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Clause, ParseError> {
    let mut literals = vec![];
    for token in tokens {
        match parse_literal(token)? {
            Some(literal) => literals.push(literal),
            None => break,
        }
    }
    Ok(Clause::new(literals))
}

fn parse_literal(token: &str) -> Result<Option<Literal>, ParseError> {
    let value = token
        .parse::<isize>()
        .map_err(|_| ParseError::Format(format!("invalid literal '{}'", token)))?;
    if value == 0 {
        return Ok(None);
    }
    let variable = Variable(value.abs().to_string());
    if value > 0 {
        Ok(Some(Literal::Positive(variable)))
    } else {
        Ok(Some(Literal::Negative(variable)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};
    use crate::Solver;

    #[test]
    fn parse_cnf_basic() {
        let cnf = "c  simple_v3_c2.cnf
c
p cnf 3 2
1 -3 0
2 3 -1 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.len(), 2);

        assert_eq!(
            f.clauses().nth(0).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![p("1"), n("3")]
        );
        assert_eq!(
            f.clauses().nth(1).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![n("1"), p("2"), p("3")]
        );
    }

    #[test]
    fn parse_stops_at_declared_clause_count() {
        let cnf = "p cnf 2 1
1 -2 0
%
0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn rejects_clause_before_header() {
        let cnf = "1 2 0
p cnf 2 1
";
        match parse(cnf.as_bytes()) {
            Err(ParseError::Format(_)) => {}
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_header() {
        match parse("c just a comment\n".as_bytes()) {
            Err(ParseError::Format(_)) => {}
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_junk_literals() {
        let cnf = "p cnf 1 1
1 x 0
";
        match parse(cnf.as_bytes()) {
            Err(ParseError::Format(_)) => {}
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn solve_cnf_quinn() {
        let cnf = "c  quinn.cnf
c
p cnf 16 18
  1    2  0
 -2   -4  0
  3    4  0
 -4   -5  0
  5   -6  0
  6   -7  0
  6    7  0
  7  -16  0
  8   -9  0
 -8  -14  0
  9   10  0
  9  -10  0
-10  -11  0
 10   12  0
 11   12  0
 13   14  0
 14  -15  0
 15   16  0
";

        let f = parse(cnf.as_bytes()).expect("failed to parse");

        let solver = Solver::new(f.clone());
        let result = solver.solve();

        let model = result.model().expect("quinn.cnf is satisfiable");
        assert_eq!(f.evaluate(model), Some(true));
        assert!(f.variables().iter().all(|v| model.contains(v)));
    }
}
