use graphix_rs::evaluate_with;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let mut variables = HashMap::from([("x".to_string(), 0.0)]);
    let ast = evaluate_with("x^3 - 2 × x", &variables)
        .expect("Failed to parse")
        .into_ast();

    for step in 0..=4 {
        let x = step as f64 * 0.5;
        variables.insert("x".to_string(), x);
        match ast.evaluate(&variables) {
            Ok(result) => println!("x = {:.1}: {}", x, result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
