use thiserror::Error;

/// Errors raised while building or stepping a linearized aircraft model.
#[derive(Error, Debug)]
pub enum Error {
    /// A derivative required by a transform or a system matrix is absent.
    #[error("missing derivative `{axis}.{variable}`")]
    MissingDerivative {
        axis: String,
        variable: String,
    },

    /// Matrix, state, or input sizes disagree.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    Dimension {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A trim scalar is outside the range the linear models accept.
    #[error("invalid trim condition: {field} = {value}")]
    InvalidTrim { field: &'static str, value: f64 },

    /// Time steps must be finite and strictly positive.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// A commanded control value is NaN or infinite.
    #[error("invalid {control} command: {value}")]
    InvalidCommand { control: &'static str, value: f64 },

    /// The axis transform could not be inverted at this trim angle.
    #[error("axis transform is singular at alpha = {alpha} rad")]
    SingularTransform { alpha: f64 },

    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("unknown control `{0}`")]
    UnknownControl(String),

    #[error("failed to parse aircraft definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn missing(axis: &str, variable: &str) -> Self {
        Self::MissingDerivative {
            axis: axis.to_string(),
            variable: variable.to_string(),
        }
    }

    pub(crate) fn dimension(context: &'static str, expected: usize, found: usize) -> Self {
        Self::Dimension {
            context,
            expected,
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
