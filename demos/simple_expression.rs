use graphix_rs::ast::{normalize_input, Parser};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let inputs = [
        "2 + 3 × 4",
        "(2 + 3) × 4",
        "8ⁿ√x3",
        "√16 + sin(0)",
        "r^2 × 3.14159",
        "2 +",
        "2 × # 3",
    ];
    let context = HashMap::from([("r".to_string(), 2.0)]);

    for input in inputs {
        match Parser::parse_expression(input) {
            Ok(ast) => match ast.evaluate(&context) {
                Ok(value) => println!("{:<16} {:<28} = {}", input, ast.to_string(), value),
                Err(err) => println!("{:<16} {:<28} ! {}", input, ast.to_string(), err),
            },
            Err(err) => {
                // Positions index the normalized input, which has no spaces.
                let normalized = normalize_input(input);
                println!("{:<16} parse error: {}", input, err);
                println!("{:<16} {}", "", normalized);
                println!("{:<16} {}^", "", " ".repeat(err.position()));
            }
        }
    }
}
