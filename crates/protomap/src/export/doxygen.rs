//! Doxygen page wrapping a DOT graph.

use log::info;

use super::{Error, Exporter, dot::DotExporter};
use crate::graph::GraphModel;

/// Renders graph models as a Doxygen page embedding the DOT text.
#[derive(Debug, Clone)]
pub struct DoxygenExporter<'a> {
    dot: DotExporter<'a>,
    title: &'a str,
}

impl<'a> DoxygenExporter<'a> {
    pub fn new(dot: DotExporter<'a>, title: &'a str) -> Self {
        Self { dot, title }
    }

    pub fn render(&self, graph: &GraphModel) -> String {
        info!(title = self.title; "Rendering Doxygen page");
        wrap(&self.dot.render(graph), self.title)
    }
}

impl Exporter for DoxygenExporter<'_> {
    fn suffix(&self) -> &str {
        ".dox"
    }

    fn export(&self, graph: &GraphModel) -> Result<String, Error> {
        Ok(self.render(graph))
    }
}

/// Wrap already rendered DOT text in a Doxygen `\page` with `title`.
pub fn wrap(dot: &str, title: &str) -> String {
    format!(
        "/**\n\\page {title}\n\n{title}\n==================================\n\n\\dot\n{dot}\n\\enddot\n\n*/\n"
    )
}
