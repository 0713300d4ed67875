use crate::casing::to_pascal_case;
use crate::cli::{similar_help_suggestions, PrintableMessage};
use crate::config::CompileSettings;
use crate::graphql::document::{self, FragmentCatalog, ParsedText};
use crate::graphql::schema::Schema;
use graphql_parser::query as parsed_query;
use graphql_parser::Pos;
use std::path::Path;

mod complex;
mod expr;
mod field;
mod fragment;
mod operation;

pub const HEADER: &str = "/* eslint-disable */
// This file was automatically generated and should not be edited.

";

#[derive(Debug)]
pub enum Error {
    MissingType(String),
    UnknownFragment(String, Pos, Vec<String>),
    MissingTypeConditionOnInlineFragment(Pos),
    SelectionSetOnWrongType(String, Pos),
    MissingSelectionSetOnType(String, Pos),
    SelectionSetAsOperationUnsupported(Pos),
    UnknownField {
        parent_type_name: String,
        field_name: String,
        position: Pos,
        possible_field_names: Vec<String>,
    },
    UnrelatedFragmentSpread {
        spread_type_name: String,
        parent_type_name: String,
        position: Pos,
    },
    InputObjectInOutput {
        type_name: String,
        position: Pos,
    },
}

impl From<document::Error> for Error {
    fn from(error: document::Error) -> Self {
        match error {
            document::Error::MissingTypeConditionOnInlineFragment(position) => {
                Error::MissingTypeConditionOnInlineFragment(position)
            }
        }
    }
}

impl From<(&str, &Path, Error)> for PrintableMessage {
    fn from((contents, file_path, error): (&str, &Path, Error)) -> Self {
        match error {
            Error::UnknownFragment(name, position, in_scope_names) => {
                let extra = similar_help_suggestions(&name, in_scope_names.into_iter())
                    .unwrap_or_else(|| " Did you forget to import it?".to_string());
                PrintableMessage::new_compile_error(
                    &format!("unknown spread fragment name `{name}`"),
                    file_path,
                    contents,
                    &position,
                    Some(&format!(
                        "This fragment name doesn't appear to be in scope.{extra}"
                    )),
                )
            }
            Error::UnknownField {
                parent_type_name,
                field_name,
                position,
                possible_field_names,
            } => {
                let extra =
                    similar_help_suggestions(&field_name, possible_field_names.into_iter())
                        .unwrap_or_default();
                PrintableMessage::new_compile_error(
                    &format!("unknown field `{field_name}`"),
                    file_path,
                    contents,
                    &position,
                    Some(&format!("Check the fields of `{parent_type_name}`.{extra}")),
                )
            }
            Error::MissingTypeConditionOnInlineFragment(position) => {
                PrintableMessage::new_compile_error(
                    "fragment missing type condition on inline fragment",
                    file_path,
                    contents,
                    &position,
                    Some("Fragments must specify a type they can be spread on."),
                )
            }
            Error::SelectionSetOnWrongType(name, position) => PrintableMessage::new_compile_error(
                &format!("unexpected selection on field of type `{name}`"),
                file_path,
                contents,
                &position,
                Some("This field is not a complex type with selections. Did you accidentally place the curlies on this field?"),
            ),
            Error::MissingSelectionSetOnType(name, position) => {
                PrintableMessage::new_compile_error(
                    &format!("expected selection on field of type `{name}`"),
                    file_path,
                    contents,
                    &position,
                    Some("This is a complex type, and it is improper GraphQL to not have at least one sub field selection."),
                )
            }
            Error::SelectionSetAsOperationUnsupported(position) => {
                PrintableMessage::new_compile_error(
                    "unsupported selection set as operation",
                    file_path,
                    contents,
                    &position,
                    Some("QTG does not support a plain selection set as an operation."),
                )
            }
            Error::UnrelatedFragmentSpread {
                spread_type_name,
                parent_type_name,
                position,
            } => PrintableMessage::new_compile_error(
                &format!("fragment on type `{spread_type_name}` can never match `{parent_type_name}`"),
                file_path,
                contents,
                &position,
                Some("No concrete type satisfies both, so the spread selects nothing."),
            ),
            Error::InputObjectInOutput {
                type_name,
                position,
            } => PrintableMessage::new_compile_error(
                &format!("selection of input object type `{type_name}`"),
                file_path,
                contents,
                &position,
                Some("Input objects cannot appear in an output selection."),
            ),
            Error::MissingType(type_name) => PrintableMessage::new_simple_program_error(
                &format!("failed lookup of type `{type_name}`"),
            ),
        }
    }
}

type Result<T> = std::result::Result<T, Error>;

pub struct Compile {
    pub filename: String,
    pub contents: String,
}

pub struct CompileContext<'a> {
    pub schema: &'a Schema,
    pub settings: &'a CompileSettings,
    pub catalog: &'a FragmentCatalog,
    pub convert: fn(&str) -> String,
    used_fragments: Vec<String>,
}

impl<'a> CompileContext<'a> {
    fn new(schema: &'a Schema, settings: &'a CompileSettings, catalog: &'a FragmentCatalog) -> Self {
        CompileContext {
            schema,
            settings,
            catalog,
            convert: to_pascal_case,
            used_fragments: Vec::new(),
        }
    }

    fn record_fragment_use(&mut self, name: &str) {
        if !self.used_fragments.iter().any(|used| used == name) {
            self.used_fragments.push(name.to_string());
        }
    }

    fn compile_imports(&self) -> String {
        if self.used_fragments.is_empty() {
            return String::from("");
        }
        let lines = self
            .used_fragments
            .iter()
            .map(|name| {
                let symbol = if self.settings.render.no_namespaces {
                    format!("{}Fragment", (self.convert)(name))
                } else {
                    (self.convert)(name)
                };
                format!("import {{ {symbol} }} from \"__generated__/{name}\";")
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{lines}\n\n")
    }
}

pub fn compile(
    definition: &parsed_query::Definition<'_, ParsedText>,
    schema: &Schema,
    catalog: &FragmentCatalog,
    settings: &CompileSettings,
) -> Result<Compile> {
    let mut ctx = CompileContext::new(schema, settings, catalog);
    let (name, body) = match definition {
        parsed_query::Definition::Operation(op_def) => operation::from_operation(&mut ctx, op_def),
        parsed_query::Definition::Fragment(frag_def) => operation::from_fragment(&mut ctx, frag_def),
    }?;
    let contents = format!("{HEADER}{}{body}\n", ctx.compile_imports());
    Ok(Compile {
        filename: format!("{name}.ts"),
        contents,
    })
}
