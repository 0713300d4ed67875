use crate::cli::PrintableMessage;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug)]
pub enum Error {
    FileError(std::io::Error),
    JsonParseError(serde_json::Error),
}

impl From<(&Path, Error)> for PrintableMessage {
    fn from((path, error): (&Path, Error)) -> Self {
        match error {
            Error::FileError(e) => PrintableMessage::new_file_error(
                &format!("unable to read config file: {e}"),
                path,
            ),
            Error::JsonParseError(e) => PrintableMessage::new_file_error(
                &format!("failed parsing config JSON: {e}"),
                path,
            )
            .with_help("Check the rc file for syntax errors."),
        }
    }
}

/// On disk shape of `.qtgrc.json`. Missing keys take their "off" values and
/// unrecognized keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RcFile {
    pub no_namespaces: bool,
    pub primitives: HashMap<String, String>,
}

/// Reads the rc file at `path`. A missing file is `Ok(None)`; a file that
/// exists but does not parse is an error, not an empty config.
pub fn load_rc_file(path: &Path) -> Result<Option<RcFile>, Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::FileError(e)),
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(Error::JsonParseError)
}

/// Rendering options, resolved once per run and passed explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    /// Emit flat, prefix-concatenated type names instead of namespaces.
    pub no_namespaces: bool,
}

/// Maps GraphQL scalar type names to their rendered TypeScript primitives.
/// Absence of an entry is an expected outcome, not an error.
#[derive(Debug)]
pub struct PrimitiveTable {
    map: HashMap<String, String>,
}

impl PrimitiveTable {
    fn built_ins() -> HashMap<String, String> {
        let pairs = [
            ("Boolean", "boolean"),
            ("String", "string"),
            ("ID", "string"),
            ("Int", "number"),
            ("Float", "number"),
        ];
        pairs
            .into_iter()
            .map(|(gql, ts)| (gql.to_string(), ts.to_string()))
            .collect()
    }

    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut map = Self::built_ins();
        map.extend(overrides);
        PrimitiveTable { map }
    }

    pub fn lookup(&self, type_name: &str) -> Option<&str> {
        self.map.get(type_name).map(String::as_str)
    }
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        PrimitiveTable {
            map: Self::built_ins(),
        }
    }
}

/// Everything a compile pass needs besides the schema itself.
#[derive(Debug)]
pub struct CompileSettings {
    pub render: RenderConfig,
    pub primitives: PrimitiveTable,
}

impl CompileSettings {
    pub fn new(rc: Option<RcFile>, no_namespaces_flag: bool) -> Self {
        let rc = rc.unwrap_or_default();
        CompileSettings {
            render: RenderConfig {
                no_namespaces: no_namespaces_flag || rc.no_namespaces,
            },
            primitives: PrimitiveTable::with_overrides(rc.primitives),
        }
    }
}
