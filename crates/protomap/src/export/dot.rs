//! Graphviz DOT rendering of a [`GraphModel`].
//!
//! Each node is a `plaintext` node whose label is an HTML-like table: a bold
//! header row with the qualified id, then one row per field with four cells
//! (tag number, multiplicity marker, type tag, name). The edge port of a row
//! sits on the tag cell or on the name cell depending on the row's
//! [`AnchorSide`].

use std::{borrow::Cow, fmt};

use log::{debug, info};

use protomap_core::schema::{EnumValue, ValueKind};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    graph::{GraphModel, NodeBody, Row, port_name},
    layout::AnchorSide,
};

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Format `id` as a DOT identifier, quoting it unless it is a plain one.
pub fn node_id(id: &str) -> Cow<'_, str> {
    let mut chars = id.chars();
    let plain = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.iter().any(|keyword| keyword.eq_ignore_ascii_case(id));

    if plain {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(quoted(id))
    }
}

/// Wrap `text` in double quotes, escaping embedded quotes and backslashes.
pub fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Escape `text` for use inside an HTML-like label.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Renders graph models as DOT text with a fixed style.
#[derive(Debug, Clone)]
pub struct DotExporter<'a> {
    style: &'a StyleConfig,
}

impl<'a> DotExporter<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Render `graph` as a complete `digraph`.
    pub fn render(&self, graph: &GraphModel) -> String {
        info!(graph = graph.name(); "Rendering graph");
        let text = Dot {
            style: self.style,
            graph,
        }
        .to_string();
        debug!(bytes = text.len(); "Graph rendered");
        text
    }
}

impl Exporter for DotExporter<'_> {
    fn suffix(&self) -> &str {
        ".dot"
    }

    fn export(&self, graph: &GraphModel) -> Result<String, Error> {
        Ok(self.render(graph))
    }
}

struct Dot<'a> {
    style: &'a StyleConfig,
    graph: &'a GraphModel,
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let font = quoted(self.style.font_family());
        let size = self.style.font_size();

        writeln!(f, "digraph {} {{", node_id(self.style.graph_name()))?;
        writeln!(f, "\tfontname = {font}")?;
        writeln!(f, "\tfontsize = {size}")?;
        writeln!(f, "\tnode [ shape = record fontname={font} fontsize={size} ]")?;
        writeln!(
            f,
            "\tedge [ fontname={font} fontsize={size} arrowhead={} ]",
            quoted(self.style.arrow_style())
        )?;

        for node in self.graph.nodes() {
            self.write_node(f, node)?;
        }
        for edge in self.graph.edges() {
            writeln!(f, "\t\t{edge}")?;
        }

        writeln!(f, "}}")
    }
}

impl Dot<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &NodeBody) -> fmt::Result {
        writeln!(f, "\t{} [", node_id(node.id().as_str()))?;
        writeln!(f, "\t\tshape = plaintext")?;
        write!(
            f,
            "\t\tlabel = <<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" ALIGN=\"LEFT\" VALIGN=\"TOP\">\
             <TR><TD COLSPAN=\"4\"><B>{}</B></TD></TR>",
            escape_html(node.label())
        )?;
        for row in node.rows() {
            self.write_row(f, row)?;
        }
        writeln!(f, "</TABLE>>")?;
        writeln!(f, "\t]")
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, row: &Row) -> fmt::Result {
        let field = row.field();
        let port = format!(" PORT=\"{}\"", escape_html(&port_name(field.name())));
        let (tag_port, name_port) = match row.anchor() {
            AnchorSide::Left => (port.as_str(), ""),
            AnchorSide::Right => ("", port.as_str()),
        };
        let multiplicity = field.multiplicity();

        write!(
            f,
            "<TR><TD{tag_port}>{}</TD><TD TITLE=\"{}\">{}</TD>\
             <TD ALIGN=\"LEFT\"><FONT COLOR=\"#444444\">&lt;{}&gt;</FONT></TD>\
             <TD ALIGN=\"LEFT\"{name_port}>",
            field.number(),
            multiplicity.as_str(),
            multiplicity.marker(),
            field.value().type_tag(),
        )?;

        match field.value() {
            ValueKind::Enum { values } => self.write_enum_values(f, field.name(), values)?,
            ValueKind::Scalar(_) | ValueKind::Message { .. } => {
                write!(f, "{}", escape_html(field.name()))?
            }
        }

        write!(f, "</TD></TR>")
    }

    fn write_enum_values(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        values: &[EnumValue],
    ) -> fmt::Result {
        let size = self.style.enum_font_size();
        write!(
            f,
            "<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\" ALIGN=\"LEFT\" VALIGN=\"TOP\">\
             <TR><TD COLSPAN=\"3\" ALIGN=\"LEFT\">{}</TD></TR>",
            escape_html(name)
        )?;
        for value in values {
            write!(
                f,
                "<TR><TD WIDTH=\"10\"></TD>\
                 <TD ALIGN=\"LEFT\"><FONT POINT-SIZE=\"{size}\">[{}]</FONT></TD>\
                 <TD ALIGN=\"LEFT\"><I><FONT POINT-SIZE=\"{size}\">{}</FONT></I></TD></TR>",
                value.number(),
                escape_html(value.name())
            )?;
        }
        write!(f, "</TABLE>")
    }
}
