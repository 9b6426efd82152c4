use schema_ast_core::types::{
    AssignmentEntry, Attribute, AttributeArgument, Block, EnumEntry, Field, FieldType, Property,
    Schema, Value,
};
use unicode_width::UnicodeWidthStr;

use crate::config::PrintConfig;
use crate::error::PrintError;

/// Print a schema to canonical text with the default layout.
///
/// Entries are indented by two spaces, assignment keys and field columns
/// are aligned within each run of lines not interrupted by a blank line,
/// runs of blank lines collapse to one, and the text ends with a single
/// line break.
///
/// # Errors
///
/// Returns `PrintError` if the tree contains a node kind this printer
/// does not know. Trees produced by [`crate::parse`] always print.
pub fn print(schema: &Schema) -> Result<String, PrintError> {
    print_with(schema, &PrintConfig::default())
}

/// Print a schema using the given layout settings.
///
/// # Errors
///
/// See [`print`].
pub fn print_with(schema: &Schema, config: &PrintConfig) -> Result<String, PrintError> {
    let mut printer = Printer::new(config);
    let mut after_component = false;

    for block in &schema.list {
        match block {
            Block::Comment(comment) => {
                printer.line(comment.text.clone());
                after_component = false;
            }
            Block::Break => {
                printer.blank();
                after_component = false;
            }
            Block::Datasource(ds) => {
                printer.separate(after_component);
                printer.header("datasource", ds.group.as_deref(), &ds.name);
                printer.assignments(&ds.assignments)?;
                printer.line("}".to_string());
                after_component = true;
            }
            Block::Generator(generator) => {
                printer.separate(after_component);
                printer.header("generator", generator.group.as_deref(), &generator.name);
                printer.assignments(&generator.assignments)?;
                printer.line("}".to_string());
                after_component = true;
            }
            Block::Model(model) => {
                printer.separate(after_component);
                printer.header("model", model.group.as_deref(), &model.name);
                printer.properties(&model.properties)?;
                printer.line("}".to_string());
                after_component = true;
            }
            Block::Enum(en) => {
                printer.separate(after_component);
                printer.header("enum", en.group.as_deref(), &en.name);
                printer.enumerators(&en.enumerators)?;
                printer.line("}".to_string());
                after_component = true;
            }
            _ => return Err(PrintError::Unrecognized { kind: "block" }),
        }
    }

    let output = printer.finish();
    tracing::debug!(
        blocks = schema.list.len(),
        bytes = output.len(),
        "printed schema"
    );
    Ok(output)
}

/// Accumulates output lines; blank-line collapsing happens in `finish`.
struct Printer<'a> {
    config: &'a PrintConfig,
    indent: String,
    lines: Vec<String>,
}

impl<'a> Printer<'a> {
    fn new(config: &'a PrintConfig) -> Self {
        Self {
            config,
            indent: " ".repeat(config.indent),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, text: String) {
        self.lines.push(text);
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Writes one indented line inside a block.
    fn entry(&mut self, text: &str) {
        self.lines.push(format!("{}{text}", self.indent));
    }

    /// Two adjacent blocks are always separated by a blank line.
    fn separate(&mut self, after_component: bool) {
        if after_component {
            self.blank();
        }
    }

    fn header(&mut self, keyword: &str, group: Option<&str>, name: &str) {
        match group {
            Some(group) => self.line(format!("{keyword} {group}.{name} {{")),
            None => self.line(format!("{keyword} {name} {{")),
        }
    }

    fn assignments(&mut self, entries: &[AssignmentEntry]) -> Result<(), PrintError> {
        let entries = skip_leading(entries, |e| matches!(e, AssignmentEntry::Break));
        let breaks: Vec<bool> = entries
            .iter()
            .map(|e| matches!(e, AssignmentEntry::Break))
            .collect();
        let key_widths = segment_widths(&breaks, |i| match &entries[i] {
            AssignmentEntry::Assignment(a) => a.key.width(),
            _ => 0,
        });

        for (entry, key_width) in entries.iter().zip(key_widths) {
            match entry {
                AssignmentEntry::Assignment(a) => {
                    let mut line = pad(&a.key, key_width);
                    line.push_str(" = ");
                    print_value(&a.value, &mut line)?;
                    self.entry(&line);
                }
                AssignmentEntry::Comment(comment) => self.entry(&comment.text),
                AssignmentEntry::Break => self.blank(),
                _ => return Err(PrintError::Unrecognized { kind: "assignment" }),
            }
        }
        Ok(())
    }

    fn properties(&mut self, properties: &[Property]) -> Result<(), PrintError> {
        let properties = skip_leading(properties, |p| matches!(p, Property::Break));
        // Field columns are rendered up front so widths can be measured.
        let mut columns = Vec::with_capacity(properties.len());
        for property in properties {
            columns.push(match property {
                Property::Field(field) => Some(FieldColumns::render(field)?),
                _ => None,
            });
        }

        let breaks: Vec<bool> = properties
            .iter()
            .map(|p| matches!(p, Property::Break))
            .collect();
        let name_widths = segment_widths(&breaks, |i| {
            columns[i].as_ref().map_or(0, |c| c.name.width())
        });
        let type_widths = segment_widths(&breaks, |i| {
            columns[i].as_ref().map_or(0, |c| c.field_type.width())
        });

        for (i, property) in properties.iter().enumerate() {
            match (property, &columns[i]) {
                (Property::Field(_), Some(cols)) => {
                    let line = cols.line(name_widths[i], type_widths[i]);
                    self.entry(&line);
                }
                (Property::Attribute(attribute), _) => {
                    let mut line = String::new();
                    print_attribute(attribute, &mut line)?;
                    self.entry(&line);
                }
                (Property::Assignment(a), _) => {
                    let mut line = format!("{} = ", a.key);
                    print_value(&a.value, &mut line)?;
                    self.entry(&line);
                }
                (Property::Comment(comment), _) => self.entry(&comment.text),
                (Property::Break, _) => self.blank(),
                _ => return Err(PrintError::Unrecognized { kind: "property" }),
            }
        }
        Ok(())
    }

    fn enumerators(&mut self, entries: &[EnumEntry]) -> Result<(), PrintError> {
        for entry in skip_leading(entries, |e| matches!(e, EnumEntry::Break)) {
            match entry {
                EnumEntry::Enumerator(e) => self.entry(&e.name),
                EnumEntry::Comment(comment) => self.entry(&comment.text),
                EnumEntry::Break => self.blank(),
                _ => return Err(PrintError::Unrecognized { kind: "enumerator" }),
            }
        }
        Ok(())
    }

    /// Joins the lines, keeping at most one blank line in a row and none at
    /// the start.
    fn finish(self) -> String {
        let eol = self.config.line_ending.as_str();
        let mut output = String::new();
        // Starting as blank drops leading empty lines.
        let mut previous_blank = true;
        for line in &self.lines {
            let blank = line.trim().is_empty();
            if blank && previous_blank {
                continue;
            }
            if !blank {
                output.push_str(line);
            }
            output.push_str(eol);
            previous_blank = blank;
        }
        if output.is_empty() {
            output.push_str(eol);
        }
        output
    }
}

/// The three columns of a field line, rendered but not yet padded.
struct FieldColumns {
    name: String,
    field_type: String,
    attributes: Vec<String>,
}

impl FieldColumns {
    fn render(field: &Field) -> Result<Self, PrintError> {
        let mut field_type = String::new();
        print_field_type(field, &mut field_type)?;

        let mut attributes = Vec::with_capacity(field.attributes.len());
        for attribute in &field.attributes {
            let mut out = String::new();
            print_attribute(attribute, &mut out)?;
            attributes.push(out);
        }

        Ok(Self {
            name: field.name.clone(),
            field_type,
            attributes,
        })
    }

    fn line(&self, name_width: usize, type_width: usize) -> String {
        let mut line = pad(&self.name, name_width);
        line.push(' ');
        line.push_str(&pad(&self.field_type, type_width));
        for attribute in &self.attributes {
            line.push(' ');
            line.push_str(attribute);
        }
        line.trim_end().to_string()
    }
}

/// Drops the blank lines at the top of a block. The line break after `{`
/// already separates the header, and a blank line there reads back as part
/// of the block opening.
fn skip_leading<T>(entries: &[T], is_break: impl Fn(&T) -> bool) -> &[T] {
    let start = entries
        .iter()
        .position(|e| !is_break(e))
        .unwrap_or(entries.len());
    &entries[start..]
}

/// For each entry, the widest value among the entries of its segment.
/// Segments are the runs between `breaks`.
fn segment_widths(breaks: &[bool], width: impl Fn(usize) -> usize) -> Vec<usize> {
    let mut widths = vec![0; breaks.len()];
    let mut start = 0;
    for end in 0..=breaks.len() {
        if end == breaks.len() || breaks[end] {
            let max = (start..end).map(&width).max().unwrap_or(0);
            widths[start..end].fill(max);
            start = end + 1;
        }
    }
    widths
}

/// Right-pads `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width.max(text.len()));
    out.push_str(text);
    for _ in text.width()..width {
        out.push(' ');
    }
    out
}

fn print_field_type(field: &Field, output: &mut String) -> Result<(), PrintError> {
    match &field.field_type {
        FieldType::Identifier(name) => output.push_str(name),
        FieldType::Function { name, args } => {
            output.push_str(name);
            output.push('(');
            print_value_list(args, output)?;
            output.push(')');
        }
        _ => return Err(PrintError::Unrecognized { kind: "field type" }),
    }

    if field.array {
        output.push_str("[]");
    } else if field.optional {
        output.push('?');
    }
    Ok(())
}

fn print_attribute(attribute: &Attribute, output: &mut String) -> Result<(), PrintError> {
    output.push_str(attribute.kind.marker());
    if let Some(group) = &attribute.group {
        output.push_str(group);
        output.push('.');
    }
    output.push_str(&attribute.name);

    if attribute.args.is_empty() {
        return Ok(());
    }

    output.push('(');
    for (i, arg) in attribute.args.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        match arg {
            AttributeArgument::KeyValue { key, value } => print_keyed(key, value, output)?,
            // The grammar reads `key: value` back as a keyed argument.
            AttributeArgument::Value(Value::KeyValue { key, value }) => {
                print_keyed(key, value, output)?
            }
            AttributeArgument::Value(value) => print_value(value, output)?,
            _ => return Err(PrintError::Unrecognized { kind: "attribute argument" }),
        }
    }
    output.push(')');
    Ok(())
}

fn print_keyed(key: &str, value: &Value, output: &mut String) -> Result<(), PrintError> {
    output.push_str(key);
    output.push_str(": ");
    print_value(value, output)
}

fn print_value(value: &Value, output: &mut String) -> Result<(), PrintError> {
    match value {
        Value::String(s) => {
            if s.contains(['"', '\n', '\r']) {
                return Err(PrintError::Unrepresentable {
                    what: "string containing a quote or line break",
                });
            }
            output.push('"');
            output.push_str(s);
            output.push('"');
        }
        Value::Number(n) => output.push_str(n),
        Value::Boolean(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Null => output.push_str("null"),
        Value::Identifier(name) => output.push_str(name),
        Value::Array(items) => {
            output.push('[');
            print_value_list(items, output)?;
            output.push(']');
        }
        Value::Function { name, args } => {
            output.push_str(name);
            output.push('(');
            print_value_list(args, output)?;
            output.push(')');
        }
        Value::KeyValue { .. } => {
            return Err(PrintError::Unrepresentable {
                what: "key-value pair outside an attribute argument list",
            })
        }
        _ => return Err(PrintError::Unrecognized { kind: "value" }),
    }
    Ok(())
}

fn print_value_list(values: &[Value], output: &mut String) -> Result<(), PrintError> {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        print_value(value, output)?;
    }
    Ok(())
}
