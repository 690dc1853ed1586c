pub mod batch;
pub mod executor;
pub mod report;
pub mod result;
pub mod runner;
pub mod spawn;
pub mod tokenizer;

pub use batch::StepChoice;
pub use executor::{DEFAULT_STEP_DELAY, Executor};
pub use report::{Summary, summarize};
pub use result::{ExecutionMode, ExecutionResult, Outcome};
pub use spawn::{ProcessSpawner, SpawnOutcome, SystemSpawner};
pub use tokenizer::tokenize;
