use graphix_rs::plot::{PlotFunction, SampleOptions};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let mut functions = vec![PlotFunction::new(0), PlotFunction::new(1)];
    functions[0].set_input("sin(x) × a").unwrap();
    functions[1].set_input("x^2 ÷ 10").unwrap();

    let base = HashMap::from([("a".to_string(), 2.0)]);
    let options = SampleOptions::new(-3.0, 3.0, 6);

    for function in &functions {
        match function.sample(&options, &base) {
            Ok(points) => {
                println!("f{}(x) = {}", function.index(), function.raw_input());
                for (x, y) in points {
                    println!("  {:>6.2} {:>10.4}", x, y);
                }
            }
            Err(err) => println!("f{}: {}", function.index(), err),
        }
    }
}
