use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Statement {
    Insert(i32),
    Search(i32),
    Print,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Passando parametro de menos ou mais doto")]
    WrongTokenCount,
    #[error("Esperado imprimir")]
    ExpectedPrint,
    #[error("Não esperado esse caba {0}")]
    UnknownStatement(String),
    #[error("Não deu pra ler esse número")]
    BadNumber(#[from] ParseIntError),
}

pub trait Parser {
    fn parse_lines(&self, s: &str) -> Result<Vec<Statement>, ParseError>;
    fn parse_line(&self, s: &str) -> Result<Statement, ParseError>;
}

pub struct ParserVagaba {}

impl ParserVagaba {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ParserVagaba {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ParserVagaba {
    fn parse_lines(&self, s: &str) -> Result<Vec<Statement>, ParseError> {
        let mut vec: Vec<Statement> = Vec::new();

        for line in s.lines() {
            let stm = self.parse_line(line)?;
            vec.push(stm);
        }

        Ok(vec)
    }

    fn parse_line(&self, s: &str) -> Result<Statement, ParseError> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 2 {
            return Err(ParseError::WrongTokenCount);
        }

        let stm = tokens[0];

        if tokens.len() == 1 {
            if stm.to_lowercase() != "imp" {
                return Err(ParseError::ExpectedPrint);
            }

            return Ok(Statement::Print);
        }

        let value: i32 = tokens[1].parse()?;
        match stm.to_lowercase().as_str() {
            "inc" => Ok(Statement::Insert(value)),
            "bus" => Ok(Statement::Search(value)),
            e => Err(ParseError::UnknownStatement(e.to_string())),
        }
    }
}

#[cfg(test)]
mod parser_vagaba_tests {
    use pretty_assertions::assert_eq;

    use crate::sukuna::parser::{ParseError, Parser, ParserVagaba, Statement};

    #[test]
    fn test_parse_insert_statement() -> Result<(), ParseError> {
        // Arrange
        let s = "INC 14";
        let p = ParserVagaba::new();
        let expected_stm = Statement::Insert(14);

        // Act
        let actual_stm = p.parse_line(s)?;

        //Assert
        assert_eq!(expected_stm, actual_stm);

        Ok(())
    }

    #[test]
    fn test_parse_search_statement() -> Result<(), ParseError> {
        // Arrange
        let s = "BUS 14";
        let p = ParserVagaba::new();
        let expected_stm = Statement::Search(14);

        // Act
        let actual_stm = p.parse_line(s)?;

        //Assert
        assert_eq!(expected_stm, actual_stm);

        Ok(())
    }

    #[test]
    fn test_parse_print_statement() -> Result<(), ParseError> {
        // Arrange
        let s = "IMP";
        let p = ParserVagaba::new();
        let expected_stm = Statement::Print;

        // Act
        let actual_stm = p.parse_line(s)?;

        //Assert
        assert_eq!(expected_stm, actual_stm);

        Ok(())
    }

    #[test]
    fn test_lowercase_statements_are_fine() -> Result<(), ParseError> {
        // Arrange
        let s = "bus 14";
        let p = ParserVagaba::new();
        let expected_stm = Statement::Search(14);

        // Act
        let actual_stm = p.parse_line(s)?;

        //Assert
        assert_eq!(expected_stm, actual_stm);

        Ok(())
    }

    #[test]
    fn test_parse_lines() -> Result<(), ParseError> {
        // Arrange
        let s = "BUS 420\nINC 69\nIMP\nINC 777";
        let p = ParserVagaba::new();
        let expected_stms = Vec::from([
            Statement::Search(420),
            Statement::Insert(69),
            Statement::Print,
            Statement::Insert(777),
        ]);

        // Act
        let actual_stms = p.parse_lines(s)?;

        //Assert
        assert_eq!(expected_stms, actual_stms);

        Ok(())
    }

    #[test]
    fn test_cant_parse_unknown_tree_tokens() {
        // Arrange
        let s = "TUBIAS 24";
        let p = ParserVagaba::new();

        // Act
        let err = p.parse_line(s);

        //Assert
        assert!(matches!(err, Err(ParseError::UnknownStatement(_))));
    }

    #[test]
    fn test_cant_parse_unknown_one_tokens() {
        // Arrange
        let s = "GARGAMEL";
        let p = ParserVagaba::new();

        // Act
        let err = p.parse_line(s);

        //Assert
        assert!(matches!(err, Err(ParseError::ExpectedPrint)));
    }

    #[test]
    fn test_cant_parse_a_key_that_is_not_a_number() {
        // Arrange
        let s = "INC quarenta";
        let p = ParserVagaba::new();

        // Act
        let err = p.parse_line(s);

        //Assert
        assert!(matches!(err, Err(ParseError::BadNumber(_))));
    }

    #[test]
    fn test_cant_parse_too_many_tokens() {
        // Arrange
        let s = "INC 1 2";
        let p = ParserVagaba::new();

        // Act
        let err = p.parse_line(s);

        //Assert
        assert!(matches!(err, Err(ParseError::WrongTokenCount)));
    }
}
