pub mod cli;
pub mod config;
pub mod constants;
pub mod experiment;
pub mod metrics;
pub mod negotiation;
pub mod rng;
pub mod simulation;
pub mod strategies;
pub mod trading;
pub mod ui;

#[cfg(test)]
mod metrics_test;
#[cfg(test)]
mod rng_test;
#[cfg(test)]
mod strategies_test;
