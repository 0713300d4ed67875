use super::complex::{compile_scope, DeclSink};
use super::{CompileContext, Error, Result};
use crate::graphql::document::ParsedText;
use graphql_parser::query::{FragmentDefinition, OperationDefinition, TypeCondition};

fn wrap_in_namespace(namespace_name: &str, body: &str) -> String {
    let indented = body
        .lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("export namespace {namespace_name} {{\n{indented}\n}}")
}

pub fn from_operation(
    ctx: &mut CompileContext,
    operation: &OperationDefinition<'_, ParsedText>,
) -> Result<(String, String)> {
    let (root_type_name, kind_name, op_name, selection_set, position) = match operation {
        OperationDefinition::Query(query) => (
            "Query",
            "Query",
            &query.name,
            &query.selection_set,
            query.position,
        ),
        OperationDefinition::Mutation(mutation) => (
            "Mutation",
            "Mutation",
            &mutation.name,
            &mutation.selection_set,
            mutation.position,
        ),
        OperationDefinition::Subscription(subscription) => (
            "Subscription",
            "Subscription",
            &subscription.name,
            &subscription.selection_set,
            subscription.position,
        ),
        OperationDefinition::SelectionSet(selection) => {
            return Err(Error::SelectionSetAsOperationUnsupported(selection.span.0));
        }
    };
    let compiled_name = op_name
        .as_ref()
        .cloned()
        .unwrap_or_else(|| kind_name.to_string());

    let mut decls = DeclSink::new();
    let rhs = compile_scope(
        ctx,
        selection_set,
        root_type_name,
        position,
        "",
        &compiled_name,
        &mut decls,
    )?;
    let convert = ctx.convert;
    let contents = if ctx.settings.render.no_namespaces {
        decls.insert(format!("{}{kind_name}", convert(&compiled_name)), rhs);
        decls.render()
    } else {
        decls.insert(kind_name.to_string(), rhs);
        wrap_in_namespace(&convert(&compiled_name), &decls.render())
    };
    Ok((compiled_name, contents))
}

pub fn from_fragment(
    ctx: &mut CompileContext,
    fragment: &FragmentDefinition<'_, ParsedText>,
) -> Result<(String, String)> {
    let name = fragment.name.clone();
    let TypeCondition::On(type_name) = &fragment.type_condition;

    let mut decls = DeclSink::new();
    let rhs = compile_scope(
        ctx,
        &fragment.selection_set,
        type_name,
        fragment.position,
        "",
        &name,
        &mut decls,
    )?;
    let convert = ctx.convert;
    let contents = if ctx.settings.render.no_namespaces {
        decls.insert(format!("{}Fragment", convert(&name)), rhs);
        decls.render()
    } else {
        decls.insert("Fragment".to_string(), rhs);
        wrap_in_namespace(&convert(&name), &decls.render())
    };
    Ok((name, contents))
}
