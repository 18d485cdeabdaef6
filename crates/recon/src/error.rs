use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// Source has fewer rows than the fixed boilerplate/header layout needs.
    TooFewRows { source: &'static str, rows: usize, need: usize },
    /// Source is narrower than the highest fixed column offset.
    TooFewColumns { source: &'static str, width: usize, need: usize },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewRows { source, rows, need } => {
                write!(f, "{source} source: {rows} row(s), expected at least {need}")
            }
            Self::TooFewColumns { source, width, need } => {
                write!(f, "{source} source: {width} column(s), expected at least {need}")
            }
        }
    }
}

impl std::error::Error for ReconError {}
