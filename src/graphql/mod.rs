use crate::cli::PrintableMessage;
use crate::config::CompileSettings;
use crate::typescript;
use document::{FragmentCatalog, ParsedText};
use graphql_parser::query::{Definition, TypeCondition};
use schema::Schema;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub mod document;
pub mod schema;

#[derive(Debug)]
pub enum Error {
    FileError(PathBuf, std::io::Error),
    DocumentParseError(PathBuf, graphql_parser::query::ParseError),
    OnlyImportFragments(PathBuf),
    OnlyOneDefinitionPerDocument(PathBuf),
}

impl From<Error> for PrintableMessage {
    fn from(error: Error) -> Self {
        match error {
            Error::FileError(path, e) => {
                PrintableMessage::new_file_error(&format!("unable to read file: {e}"), &path)
            }
            Error::DocumentParseError(path, e) => {
                PrintableMessage::new_file_error(&format!("failed parsing document: {e}"), &path)
            }
            Error::OnlyImportFragments(path) => PrintableMessage::new_file_error(
                "only fragment definitions can be imported",
                &path,
            )
            .with_help("Move operations into their own documents and #import only fragments."),
            Error::OnlyOneDefinitionPerDocument(path) => PrintableMessage::new_file_error(
                "documents must contain exactly one definition",
                &path,
            )
            .with_help("Split additional operations or fragments into their own files."),
        }
    }
}

fn read_graphql_file(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut buf_reader = BufReader::new(file);
    let mut contents = String::new();
    buf_reader.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn parse_schema(path: &Path) -> Result<Schema, PrintableMessage> {
    let file = File::open(path).map_err(|e| {
        PrintableMessage::new_file_error(&format!("unable to open schema file: {e}"), path)
            .with_help("Does the schema exist? Set its location with --schema-file.")
    })?;
    Schema::from_reader(BufReader::new(file)).map_err(|e| {
        PrintableMessage::new_file_error(
            &format!("failed parsing introspection schema: {e:?}"),
            path,
        )
    })
}

fn makedir_p(path: &Path) -> Result<(), Error> {
    match std::fs::create_dir(path) {
        Ok(_) => Ok(()),
        Err(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(Error::FileError(path.to_path_buf(), e)),
    }
}

fn make_generated_dir(mut path: PathBuf) -> Result<PathBuf, Error> {
    path.push("__generated__");
    makedir_p(&path)?;
    Ok(path)
}

fn get_file_path_of_fragment(
    import_comment: &str,
    current_dir: &Path,
    root_dir: &Path,
) -> PathBuf {
    let last_quote = import_comment
        .rfind('"')
        .unwrap_or(import_comment.len() - 1);
    let import_filename = &import_comment[9..last_quote];
    if import_filename.starts_with('.') {
        return current_dir.join(import_filename);
    }
    root_dir.join(import_filename)
}

/// Collects `#import "<path>"` comment lines into the fragment catalog,
/// following imports of imports. `visited` keeps circular imports from
/// looping.
fn add_imported_fragments(
    current_dir: &Path,
    root_dir: &Path,
    contents: &str,
    catalog: &mut FragmentCatalog,
    visited: &mut HashSet<PathBuf>,
) -> Result<(), Error> {
    for line in contents.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with("#import \"") {
            continue;
        }
        let mut file_path = get_file_path_of_fragment(trimmed, current_dir, root_dir);
        if !visited.insert(file_path.clone()) {
            continue;
        }
        let contents = read_graphql_file(&file_path)
            .map_err(|e| Error::FileError(file_path.clone(), e))?;
        let import_path = file_path.clone();
        file_path.pop();
        add_imported_fragments(&file_path, root_dir, &contents, catalog, visited)?;
        let parsed = graphql_parser::parse_query::<ParsedText>(&contents)
            .map_err(|e| Error::DocumentParseError(import_path.clone(), e))?;
        if parsed.definitions.len() != 1 {
            return Err(Error::OnlyOneDefinitionPerDocument(import_path));
        }
        for definition in parsed.definitions {
            match definition {
                Definition::Fragment(fragment_def) => {
                    let TypeCondition::On(on_type) = fragment_def.type_condition;
                    catalog.insert(fragment_def.name.clone(), on_type);
                }
                _ => return Err(Error::OnlyImportFragments(import_path)),
            }
        }
    }
    Ok(())
}

/// Compiles one document file to `__generated__/<Name>.ts` next to it.
/// Returns the diagnostics produced; an empty vec means success.
pub fn compile_file(
    path: &Path,
    root_dir: &Path,
    schema: &Schema,
    settings: &CompileSettings,
) -> Vec<PrintableMessage> {
    match try_compile_file(path, root_dir, schema, settings) {
        Ok(()) => Vec::new(),
        Err(messages) => messages,
    }
}

fn try_compile_file(
    path: &Path,
    root_dir: &Path,
    schema: &Schema,
    settings: &CompileSettings,
) -> Result<(), Vec<PrintableMessage>> {
    let contents = read_graphql_file(path)
        .map_err(|e| vec![Error::FileError(path.to_path_buf(), e).into()])?;
    let document = graphql_parser::parse_query::<ParsedText>(&contents)
        .map_err(|e| vec![Error::DocumentParseError(path.to_path_buf(), e).into()])?;
    if document.definitions.len() != 1 {
        return Err(vec![
            Error::OnlyOneDefinitionPerDocument(path.to_path_buf()).into()
        ]);
    }

    let mut parent_dir = path.to_path_buf();
    parent_dir.pop();
    let mut catalog = FragmentCatalog::default();
    let mut visited = HashSet::new();
    add_imported_fragments(&parent_dir, root_dir, &contents, &mut catalog, &mut visited)
        .map_err(|error| vec![error.into()])?;

    let the_compile = typescript::compile(&document.definitions[0], schema, &catalog, settings)
        .map_err(|error| vec![PrintableMessage::from((contents.as_str(), path, error))])?;

    let mut generated_dir_path =
        make_generated_dir(parent_dir).map_err(|error| vec![error.into()])?;
    generated_dir_path.push(the_compile.filename);
    std::fs::write(&generated_dir_path, the_compile.contents)
        .map_err(|e| vec![Error::FileError(generated_dir_path.clone(), e).into()])?;
    Ok(())
}
