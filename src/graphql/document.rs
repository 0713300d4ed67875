//! Descriptors for operation selection sets and the fragment catalog.
use graphql_parser::query as parsed_query;
use graphql_parser::Pos;
use std::collections::HashMap;

pub type ParsedText = String;
pub type ParsedSelectionSet<'d> = parsed_query::SelectionSet<'d, ParsedText>;
pub type ParsedField<'d> = parsed_query::Field<'d, ParsedText>;

#[derive(Debug)]
pub enum Error {
    MissingTypeConditionOnInlineFragment(Pos),
}

/// An inline fragment usage narrowing to a concrete type. The `name` is the
/// generated type identifier for the fragment's own declaration.
#[derive(Debug)]
pub struct InlineFragmentUsage<'s, 'd> {
    pub on_type: String,
    pub name: String,
    pub position: Pos,
    pub selection_set: &'s ParsedSelectionSet<'d>,
}

/// A reference to a separately defined named fragment.
#[derive(Debug)]
pub struct FragmentSpreadUsage {
    pub fragment_name: String,
    pub position: Pos,
}

/// A fragment usage is either of the two; consumers dispatch by match.
#[derive(Debug)]
pub enum FragmentUsage<'u, 's, 'd> {
    Inline(&'u InlineFragmentUsage<'s, 'd>),
    Spread(&'u FragmentSpreadUsage),
}

/// One selection set split into plain fields and fragment usages, keeping
/// declaration order within each class.
#[derive(Debug)]
pub struct SelectionDescriptor<'s, 'd> {
    pub fields: Vec<&'s ParsedField<'d>>,
    pub inline_fragments: Vec<InlineFragmentUsage<'s, 'd>>,
    pub fragment_spreads: Vec<FragmentSpreadUsage>,
}

impl<'s, 'd> SelectionDescriptor<'s, 'd> {
    /// Splits `selection_set`. Inline fragments are named
    /// `<scope_local_name>On<TypeName>`, which keeps generated declarations
    /// unique within one compiled document.
    pub fn split(
        selection_set: &'s ParsedSelectionSet<'d>,
        scope_local_name: &str,
    ) -> Result<Self, Error> {
        let mut fields = Vec::new();
        let mut inline_fragments = Vec::new();
        let mut fragment_spreads = Vec::new();
        for selection in &selection_set.items {
            match selection {
                parsed_query::Selection::Field(field) => fields.push(field),
                parsed_query::Selection::InlineFragment(inline) => {
                    let on_type = match &inline.type_condition {
                        Some(parsed_query::TypeCondition::On(type_name)) => type_name.clone(),
                        None => {
                            return Err(Error::MissingTypeConditionOnInlineFragment(
                                inline.position,
                            ))
                        }
                    };
                    inline_fragments.push(InlineFragmentUsage {
                        name: format!("{scope_local_name}On{on_type}"),
                        on_type,
                        position: inline.position,
                        selection_set: &inline.selection_set,
                    });
                }
                parsed_query::Selection::FragmentSpread(spread) => {
                    fragment_spreads.push(FragmentSpreadUsage {
                        fragment_name: spread.fragment_name.clone(),
                        position: spread.position,
                    });
                }
            }
        }
        Ok(SelectionDescriptor {
            fields,
            inline_fragments,
            fragment_spreads,
        })
    }

    /// Whether the selection has fields outside of fragments.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn has_fragments(&self) -> bool {
        !self.inline_fragments.is_empty() || !self.fragment_spreads.is_empty()
    }
}

/// Definition catalog entry for a named fragment.
#[derive(Debug)]
pub struct FragmentInfo {
    pub on_type: String,
}

/// Named fragment definitions in scope for one document, owned so entries
/// outlive the parsed sources they came from.
#[derive(Debug, Default)]
pub struct FragmentCatalog {
    entries: HashMap<String, FragmentInfo>,
}

impl FragmentCatalog {
    pub fn insert(&mut self, name: String, on_type: String) {
        self.entries.insert(name, FragmentInfo { on_type });
    }

    pub fn get(&self, name: &str) -> Option<&FragmentInfo> {
        self.entries.get(name)
    }

    /// All names in scope, for did-you-mean reporting.
    pub fn known_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
