//! Run Python code in a child interpreter, classify the outcome, and ask an LLM to repair
//! failures.
//!
//! The loop is: [`params::inject`] user values, [`execution::Executor::execute`] the code,
//! [`classify::classify`] the output, and on error [`repair::Repairer::fix`] it using the
//! [`analysis`] summaries.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod execution;
pub mod llm;
pub mod params;
pub mod process;
pub mod repair;
pub mod role;
