use crate::cli::PrintableMessage;
use crate::config::CompileSettings;
use crate::graphql;
use crate::graphql::schema::Schema;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Work {
    GraphQL(PathBuf),
    DirEntry(PathBuf),
}

impl Work {
    fn run_dir_entry(&self, path: &Path) -> Result<Vec<Work>, std::io::Error> {
        let readdir = fs::read_dir(path)?;
        let mut more_work = vec![];
        for raw_entry in readdir {
            let path = raw_entry?.path();
            if path.is_dir() {
                more_work.push(Work::DirEntry(path));
            } else if path.is_file() && path.extension().map_or(false, |x| x == "graphql") {
                more_work.push(Work::GraphQL(path));
            }
        }
        Ok(more_work)
    }

    pub fn run(
        &self,
        schema: &Schema,
        settings: &CompileSettings,
        root_dir: &Path,
    ) -> (Vec<Work>, Vec<PrintableMessage>) {
        match self {
            Work::DirEntry(path) => match self.run_dir_entry(path) {
                Ok(more_work) => (more_work, Vec::new()),
                Err(e) => (
                    Vec::new(),
                    vec![PrintableMessage::new_file_error(
                        &format!("unable to read directory: {e}"),
                        path,
                    )],
                ),
            },
            Work::GraphQL(path) => (
                Vec::new(),
                graphql::compile_file(path, root_dir, schema, settings),
            ),
        }
    }
}
