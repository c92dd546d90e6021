//! Result-returning validation pipeline
//!
//! A [`Pipeline`] is an explicit, ordered list of named stages. Each stage is
//! a pure predicate over a check context and either passes or returns the
//! [`ApiError`] that terminates the request. [`Pipeline::run`] folds the
//! stages left to right and stops at the first failure, so the terminal
//! store operation is only reached when every stage has passed.
//!
//! ```rust,ignore
//! let pipeline = Pipeline::new("dish.create")
//!     .stage("nameExists", stages::name_exists)
//!     .stage("priceExists", stages::price_exists);
//!
//! pipeline.run(&check)?;
//! ```

use crate::core::error::ApiError;

/// Outcome of a single stage
pub type StageResult = Result<(), ApiError>;

/// One named predicate in a pipeline
pub struct Stage<C> {
    name: &'static str,
    check: fn(&C) -> StageResult,
}

impl<C> Stage<C> {
    pub fn new(name: &'static str, check: fn(&C) -> StageResult) -> Self {
        Self { name, check }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self, input: &C) -> StageResult {
        (self.check)(input)
    }
}

/// Ordered list of stages for one operation
pub struct Pipeline<C> {
    name: &'static str,
    stages: Vec<Stage<C>>,
}

impl<C> Pipeline<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stages: Vec::new(),
        }
    }

    /// Append a stage; it runs after every stage added before it
    pub fn stage(mut self, name: &'static str, check: fn(&C) -> StageResult) -> Self {
        self.stages.push(Stage::new(name, check));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared stage order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Run every stage in order, stopping at the first failure
    pub fn run(&self, input: &C) -> StageResult {
        for stage in &self.stages {
            if let Err(err) = stage.check(input) {
                tracing::debug!(
                    pipeline = self.name,
                    stage = stage.name(),
                    status = err.status_code().as_u16(),
                    "validation stage rejected request: {}",
                    err
                );
                return Err(err);
            }
        }
        Ok(())
    }
}
