//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Failure to load a puzzle input from disk
#[derive(Error, Debug)]
pub enum InputError {
    /// No file at the expected path
    #[error("no input for {year}/{day:02} at {}", path.display())]
    Missing { year: u16, day: u8, path: PathBuf },

    /// The file exists but could not be read
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be loaded
    #[error("{0}")]
    Input(#[from] InputError),

    /// Solver parse or solve failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two errors into one `Multiple`, flattening either side that
    /// already is one; order is preserved.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn combine_flattens() {
        let a: ArcExecutorError = ExecutorError::ChannelSend.into();
        let b: ArcExecutorError = ExecutorError::ThreadPool("x".into()).into();
        let ab = ArcExecutorError::combine(a.clone(), b.clone());
        assert_eq!(count(&ab), 2);

        let abc = ArcExecutorError::combine(ab.clone(), a.clone());
        assert_eq!(count(&abc), 3);
        let cab = ArcExecutorError::combine(b.clone(), ab.clone());
        assert_eq!(count(&cab), 3);
        assert_eq!(count(&ArcExecutorError::combine(ab, abc)), 5);
    }

    #[test]
    fn combine_opt_keeps_single_error() {
        let a: ArcExecutorError = ExecutorError::ChannelSend.into();
        let combined = ArcExecutorError::combine_opt(None, a);
        assert!(matches!(combined.inner(), ExecutorError::ChannelSend));
    }

    #[test]
    fn missing_input_message_names_the_path() {
        let err = InputError::Missing {
            year: 2022,
            day: 7,
            path: PathBuf::from("inputs/2022_day07.txt"),
        };
        let msg = ExecutorError::from(err).to_string();
        assert!(msg.contains("2022/07"));
        assert!(msg.contains("inputs/2022_day07.txt"));
    }
}
