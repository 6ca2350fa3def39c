// src/compose/mod.rs

//! Combinators that build composite commands out of child commands.

pub mod parallel;
pub mod pipe;
pub mod sequential;

pub use parallel::ParallelCommand;
pub use pipe::PipeCommand;
pub use sequential::SequentialCommand;
