use crate::ast::{normalize_input, ASTNode, Cursor, Operator, ROOT_OPERATOR};
use crate::error::ParseError;
use crate::functions;
use log::{debug, trace};

/// Hand-written recursive descent parser over four precedence tiers:
/// additive, multiplicative, power/root and atom. All scanning state lives in
/// a `Cursor` created per call, so the parser itself holds nothing.
pub struct MathParser;

impl MathParser {
    pub fn parse_expression(input: &str) -> Result<ASTNode, ParseError> {
        debug!("Parsing expression: {}", input);
        let normalized = normalize_input(input);
        let mut cursor = Cursor::new(&normalized);
        cursor.advance();

        let ast = Self::parse_additive(&mut cursor)?;
        if let Some(ch) = cursor.current() {
            return Err(ParseError::UnexpectedChar {
                ch,
                position: cursor.position(),
            });
        }

        debug!("Parse result: {}", ast);
        Ok(ast)
    }

    fn parse_additive(cursor: &mut Cursor) -> Result<ASTNode, ParseError> {
        let mut node = Self::parse_multiplicative(cursor)?;
        loop {
            let operator = if cursor.try_consume('+') {
                Operator::Add
            } else if cursor.try_consume('-') {
                Operator::Subtract
            } else {
                return Ok(node);
            };
            let right = Self::parse_multiplicative(cursor)?;
            node = ASTNode::binary(node, operator, right);
        }
    }

    fn parse_multiplicative(cursor: &mut Cursor) -> Result<ASTNode, ParseError> {
        let mut node = Self::parse_power(cursor)?;
        loop {
            let operator = if cursor.try_consume('*') {
                Operator::Multiply
            } else if cursor.try_consume('/') {
                Operator::Divide
            } else if cursor.try_consume('%') {
                Operator::Modulo
            } else {
                return Ok(node);
            };
            let right = Self::parse_power(cursor)?;
            node = ASTNode::binary(node, operator, right);
        }
    }

    fn parse_power(cursor: &mut Cursor) -> Result<ASTNode, ParseError> {
        let mut node = Self::parse_atom(cursor)?;
        loop {
            let operator = if cursor.try_consume('^') {
                Operator::Power
            } else if cursor.try_consume(ROOT_OPERATOR) {
                Operator::Root
            } else {
                return Ok(node);
            };
            let right = Self::parse_atom(cursor)?;
            node = ASTNode::binary(node, operator, right);
        }
    }

    /// Every nested construct (group, sign, function argument) passes through
    /// here, so the depth check bounds the whole recursion.
    fn parse_atom(cursor: &mut Cursor) -> Result<ASTNode, ParseError> {
        cursor.descend()?;
        let atom = Self::parse_primary(cursor);
        cursor.ascend();
        atom
    }

    fn parse_primary(cursor: &mut Cursor) -> Result<ASTNode, ParseError> {
        let start = cursor.position();

        if cursor.try_consume('+') {
            return Self::parse_atom(cursor);
        }
        if cursor.try_consume('-') {
            return Ok(ASTNode::negate(Self::parse_atom(cursor)?));
        }
        if cursor.try_consume('(') {
            let inner = Self::parse_additive(cursor)?;
            // A missing ')' is tolerated.
            cursor.try_consume(')');
            return Ok(inner);
        }

        match cursor.current() {
            Some(ch) if is_number_char(ch) => Self::parse_number(cursor, start),
            Some(ch) if is_identifier_char(ch) => Self::parse_identifier(cursor, start),
            Some(ch) => Err(ParseError::UnexpectedChar {
                ch,
                position: start,
            }),
            None => Err(ParseError::UnexpectedEnd { position: start }),
        }
    }

    fn parse_number(cursor: &mut Cursor, start: usize) -> Result<ASTNode, ParseError> {
        while cursor.current().is_some_and(is_number_char) {
            cursor.advance();
        }
        let literal = cursor.slice_from(start);
        literal
            .parse::<f64>()
            .map(ASTNode::Number)
            .map_err(|_| ParseError::InvalidNumber {
                literal,
                position: start,
            })
    }

    /// A name is always followed by one more atom when the next character can
    /// start one. For a function that atom is the argument (`sin0`, `sin(x)`);
    /// for a variable it is parsed and then dropped, so `x+1` reads as `x`.
    fn parse_identifier(cursor: &mut Cursor, start: usize) -> Result<ASTNode, ParseError> {
        while cursor.current().is_some_and(is_identifier_char) {
            cursor.advance();
        }
        let name = cursor.slice_from(start);

        let trailing = if cursor.current().is_some_and(starts_atom) {
            Some(Self::parse_atom(cursor)?)
        } else {
            None
        };

        match functions::lookup(&name) {
            Some(function) => {
                let argument = trailing.ok_or_else(|| ParseError::MissingArgument {
                    function: name.clone(),
                    position: cursor.position(),
                })?;
                Ok(ASTNode::call(function, argument))
            }
            None => {
                if let Some(discarded) = trailing {
                    trace!("Discarding operand {} after variable '{}'", discarded, name);
                }
                Ok(ASTNode::Identifier(name))
            }
        }
    }
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphabetic() && ch != '(' && ch != ')'
}

fn starts_atom(ch: char) -> bool {
    matches!(ch, '+' | '-' | '(') || is_number_char(ch) || is_identifier_char(ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::MAX_DEPTH;
    use crate::functions::Function;

    fn number(value: f64) -> ASTNode {
        ASTNode::Number(value)
    }

    fn ident(name: &str) -> ASTNode {
        ASTNode::Identifier(name.to_string())
    }

    #[test]
    fn test_precedence() {
        let ast = MathParser::parse_expression("2+3*4").unwrap();
        let expected = ASTNode::binary(
            number(2.0),
            Operator::Add,
            ASTNode::binary(number(3.0), Operator::Multiply, number(4.0)),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_grouped_expression() {
        let ast = MathParser::parse_expression("(2+3)*4").unwrap();
        let expected = ASTNode::binary(
            ASTNode::binary(number(2.0), Operator::Add, number(3.0)),
            Operator::Multiply,
            number(4.0),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_power_binds_tighter_than_multiplication() {
        let ast = MathParser::parse_expression("2*3^2").unwrap();
        let expected = ASTNode::binary(
            number(2.0),
            Operator::Multiply,
            ASTNode::binary(number(3.0), Operator::Power, number(2.0)),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_operators_are_left_associative() {
        let ast = MathParser::parse_expression("2^3^2").unwrap();
        let expected = ASTNode::binary(
            ASTNode::binary(number(2.0), Operator::Power, number(3.0)),
            Operator::Power,
            number(2.0),
        );
        assert_eq!(ast, expected);

        let ast = MathParser::parse_expression("8-4-2").unwrap();
        let expected = ASTNode::binary(
            ASTNode::binary(number(8.0), Operator::Subtract, number(4.0)),
            Operator::Subtract,
            number(2.0),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_unary_sign_binds_tighter_than_power() {
        let ast = MathParser::parse_expression("-2^2").unwrap();
        let expected = ASTNode::binary(
            ASTNode::negate(number(2.0)),
            Operator::Power,
            number(2.0),
        );
        assert_eq!(ast, expected);
        assert_eq!(MathParser::parse_expression("+-+3").unwrap(), ASTNode::negate(number(3.0)));
    }

    #[test]
    fn test_nth_root_glyph() {
        let ast = MathParser::parse_expression("8ⁿ√x3").unwrap();
        assert_eq!(ast, ASTNode::binary(number(8.0), Operator::Root, number(3.0)));
        let ast = MathParser::parse_expression("8@3").unwrap();
        assert_eq!(ast, ASTNode::binary(number(8.0), Operator::Root, number(3.0)));
    }

    #[test]
    fn test_function_call_forms() {
        let expected = ASTNode::call(Function::Sin, number(0.0));
        assert_eq!(MathParser::parse_expression("sin0").unwrap(), expected);
        assert_eq!(MathParser::parse_expression("sin(0)").unwrap(), expected);
        assert_eq!(MathParser::parse_expression("sin 0").unwrap(), expected);

        let expected = ASTNode::call(Function::Sin, ident("x"));
        assert_eq!(MathParser::parse_expression("sin(x)").unwrap(), expected);
        assert_eq!(MathParser::parse_expression("sin (x)").unwrap(), expected);
    }

    #[test]
    fn test_name_is_the_whole_alphabetic_run() {
        // Spaces are stripped first, so "sin x" is the single name "sinx".
        assert_eq!(MathParser::parse_expression("sinx").unwrap(), ident("sinx"));
        assert_eq!(MathParser::parse_expression("sin x").unwrap(), ident("sinx"));
    }

    #[test]
    fn test_radical_glyph() {
        let ast = MathParser::parse_expression("√16").unwrap();
        assert_eq!(ast, ASTNode::call(Function::Sqrt, number(16.0)));
    }

    #[test]
    fn test_nested_functions() {
        let ast = MathParser::parse_expression("sqrt(cos(0))").unwrap();
        let expected = ASTNode::call(Function::Sqrt, ASTNode::call(Function::Cos, number(0.0)));
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_function_argument_is_a_single_atom() {
        let ast = MathParser::parse_expression("sin(x)^2").unwrap();
        let expected = ASTNode::binary(
            ASTNode::call(Function::Sin, ident("x")),
            Operator::Power,
            number(2.0),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_single_identifier() {
        assert_eq!(MathParser::parse_expression("x").unwrap(), ident("x"));
        assert_eq!(MathParser::parse_expression("πr").unwrap(), ident("πr"));
    }

    #[test]
    fn test_variable_swallows_following_signed_atom() {
        assert_eq!(MathParser::parse_expression("x+1").unwrap(), ident("x"));
        assert_eq!(MathParser::parse_expression("x-1").unwrap(), ident("x"));
        assert_eq!(MathParser::parse_expression("x(2+3)").unwrap(), ident("x"));
        assert_eq!(MathParser::parse_expression("x.5").unwrap(), ident("x"));
    }

    #[test]
    fn test_variable_followed_by_operator() {
        let ast = MathParser::parse_expression("x*2+y/4").unwrap();
        let expected = ASTNode::binary(
            ASTNode::binary(ident("x"), Operator::Multiply, number(2.0)),
            Operator::Add,
            ASTNode::binary(ident("y"), Operator::Divide, number(4.0)),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_pretty_operators_and_spaces() {
        let ast = MathParser::parse_expression(" 6 × 2 ÷ 3 ").unwrap();
        let expected = ASTNode::binary(
            ASTNode::binary(number(6.0), Operator::Multiply, number(2.0)),
            Operator::Divide,
            number(3.0),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_missing_closing_paren_is_tolerated() {
        assert_eq!(MathParser::parse_expression("((3").unwrap(), number(3.0));
        let ast = MathParser::parse_expression("(1+2").unwrap();
        assert_eq!(ast, ASTNode::binary(number(1.0), Operator::Add, number(2.0)));
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(MathParser::parse_expression("2.5").unwrap(), number(2.5));
        assert_eq!(MathParser::parse_expression(".5").unwrap(), number(0.5));
        assert_eq!(MathParser::parse_expression("5.").unwrap(), number(5.0));
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            MathParser::parse_expression("1+1.2.3"),
            Err(ParseError::InvalidNumber {
                literal: "1.2.3".to_string(),
                position: 2,
            })
        );
        assert!(matches!(
            MathParser::parse_expression("."),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_operator_without_operand() {
        assert_eq!(
            MathParser::parse_expression("2+"),
            Err(ParseError::UnexpectedEnd { position: 2 })
        );
        assert_eq!(
            MathParser::parse_expression("2+*3"),
            Err(ParseError::UnexpectedChar { ch: '*', position: 2 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            MathParser::parse_expression(""),
            Err(ParseError::UnexpectedEnd { position: 0 })
        );
        assert_eq!(
            MathParser::parse_expression("   "),
            Err(ParseError::UnexpectedEnd { position: 0 })
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            MathParser::parse_expression("3)"),
            Err(ParseError::UnexpectedChar { ch: ')', position: 1 })
        );
        assert_eq!(
            MathParser::parse_expression("2x"),
            Err(ParseError::UnexpectedChar { ch: 'x', position: 1 })
        );
    }

    #[test]
    fn test_unsupported_characters() {
        let inputs = vec!["2#3", "$", "2+3!", "4&&5"];
        for input in inputs {
            assert!(
                matches!(
                    MathParser::parse_expression(input),
                    Err(ParseError::UnexpectedChar { .. })
                ),
                "Input '{}' should fail to parse, but it succeeded",
                input
            );
        }
    }

    #[test]
    fn test_function_without_argument() {
        assert_eq!(
            MathParser::parse_expression("2*sin"),
            Err(ParseError::MissingArgument {
                function: "sin".to_string(),
                position: 5,
            })
        );
        assert!(matches!(
            MathParser::parse_expression("cos*2"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let input = "(".repeat(10_000) + "1";
        assert_eq!(
            MathParser::parse_expression(&input),
            Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position: MAX_DEPTH,
            })
        );

        let input = "-".repeat(10_000) + "1";
        assert!(matches!(
            MathParser::parse_expression(&input),
            Err(ParseError::TooDeep { .. })
        ));

        let input = "sin(".repeat(10_000) + "0";
        assert!(matches!(
            MathParser::parse_expression(&input),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_nesting_within_limit_parses() {
        let levels = MAX_DEPTH - 1;
        let input = format!("{}7{}", "(".repeat(levels), ")".repeat(levels));
        assert_eq!(MathParser::parse_expression(&input).unwrap(), number(7.0));

        let input = "-".repeat(levels) + "7";
        let ast = MathParser::parse_expression(&input).unwrap();
        assert_eq!(ast.evaluate(&Default::default()), Ok(-7.0));
    }

    #[test]
    fn test_error_position_points_at_offending_char() {
        let error = MathParser::parse_expression("1+2*#").unwrap_err();
        assert_eq!(error.position(), 4);
        let error = MathParser::parse_expression("2*cos").unwrap_err();
        assert_eq!(error.position(), 5);
    }

    #[test]
    fn test_function_names_are_case_sensitive() {
        assert_eq!(MathParser::parse_expression("SIN").unwrap(), ident("SIN"));
    }

    #[test]
    fn test_very_large_expression() {
        let input = (1..=100)
            .map(|i| format!("{}*{}", i, i))
            .collect::<Vec<_>>()
            .join("+");

        let ast = MathParser::parse_expression(&input).unwrap();

        let mut expected = ASTNode::binary(number(1.0), Operator::Multiply, number(1.0));
        for i in 2..=100 {
            let value = i as f64;
            expected = ASTNode::binary(
                expected,
                Operator::Add,
                ASTNode::binary(number(value), Operator::Multiply, number(value)),
            );
        }
        assert_eq!(ast, expected);
    }
}
