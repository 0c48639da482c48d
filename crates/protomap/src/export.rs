pub mod dot;
pub mod doxygen;

use crate::graph::GraphModel;

// A single Exporter trait shared by every text output of a graph model
pub trait Exporter {
    /// File name suffix of the produced text, including the leading dot.
    fn suffix(&self) -> &str;

    fn export(&self, graph: &GraphModel) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
