use crate::formula::{Clause, Formula, Literal, ParseError, Variable};
use std::io::{BufRead, BufReader, Read};

/// Parses the line-oriented clause format: one clause per line, literals
/// separated by whitespace, a `-` prefix negating the variable it names.
/// Reading stops at the first blank line or end of input.
pub fn parse<R: Read>(input: R) -> Result<Formula, ParseError> {
    let reader = BufReader::new(input);

    let mut clauses = vec![];
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        clauses.push(parse_clause(&line)?);
    }

    Ok(Formula::new(clauses))
}

/// Parses one clause line.
pub fn parse_clause(line: &str) -> Result<Clause, ParseError> {
    let mut literals = vec![];
    for token in line.split_whitespace() {
        literals.push(parse_literal(token)?);
    }
    Ok(Clause::new(literals))
}

fn parse_literal(token: &str) -> Result<Literal, ParseError> {
    if let Some(name) = token.strip_prefix('-') {
        if name.is_empty() {
            return Err(ParseError::Format("'-' with no variable name".into()));
        }
        Ok(Literal::Negative(Variable(name.to_string())))
    } else {
        Ok(Literal::Positive(Variable(token.to_string())))
    }
}
