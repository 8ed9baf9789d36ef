use crate::ast::{Executor, Program, Variables};
use crate::error::EvalError;
use log::debug;
use rayon::prelude::*;

/// Where and how densely a function is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOptions {
    pub start: f64,
    pub end: f64,
    /// Number of intervals; `steps + 1` points are produced.
    pub steps: usize,
    /// Point count from which sampling runs on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            start: -10.0,
            end: 10.0,
            steps: 400,
            parallel_threshold: 256,
        }
    }
}

impl SampleOptions {
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self {
            start,
            end,
            steps,
            ..Self::default()
        }
    }

    pub fn point_count(&self) -> usize {
        self.steps.saturating_add(1)
    }

    /// The `index`-th abscissa. The last one is exactly `end`.
    pub fn x_at(&self, index: usize) -> f64 {
        if self.steps == 0 {
            return self.start;
        }
        if index == self.steps {
            return self.end;
        }
        self.start + (self.end - self.start) * (index as f64 / self.steps as f64)
    }
}

/// Evaluates `program` at every abscissa of `options`, binding `variable` on
/// top of `base`. Non-finite results are kept as they are.
pub fn sample_program(
    program: &Program,
    variable: &str,
    options: &SampleOptions,
    base: &Variables,
) -> Result<Vec<(f64, f64)>, EvalError> {
    let count = options.point_count();
    debug!(
        "Sampling {} points of '{}' over [{}, {}]",
        count, variable, options.start, options.end
    );

    let evaluate_at = |(executor, context): &mut (Executor, Variables), index: usize| {
        let x = options.x_at(index);
        context.insert(variable.to_string(), x);
        executor.execute(program, context).map(|y| (x, y))
    };

    if count >= options.parallel_threshold {
        (0..count)
            .into_par_iter()
            .map_init(|| (Executor::new(), base.clone()), evaluate_at)
            .collect()
    } else {
        let mut state = (Executor::new(), base.clone());
        (0..count).map(|index| evaluate_at(&mut state, index)).collect()
    }
}
