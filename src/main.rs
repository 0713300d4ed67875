mod casing;
mod cli;
mod config;
mod graphql;
mod typescript;
mod work;
mod worker_pool;

use cli::PrintableMessage;

fn exit_with_message(message: PrintableMessage) -> ! {
    cli::print_messages(&[message]);
    std::process::exit(1);
}

fn main() {
    let runtime_config = cli::RuntimeConfig::from_cli();

    let config_path = runtime_config.config_file_path();
    let rc_file = match config::load_rc_file(&config_path) {
        Ok(Some(rc_file)) => Some(rc_file),
        Ok(None) => {
            if runtime_config.config_file_is_explicit() {
                exit_with_message(PrintableMessage::new_file_error(
                    "unable to open config file",
                    &config_path,
                ));
            }
            None
        }
        Err(error) => exit_with_message(PrintableMessage::from((config_path.as_path(), error))),
    };
    let settings = config::CompileSettings::new(rc_file, runtime_config.no_namespaces_flag());

    let schema = match graphql::parse_schema(&runtime_config.schema_file_path()) {
        Ok(schema) => schema,
        Err(message) => exit_with_message(message),
    };

    let pool = worker_pool::WorkerPool::new(
        runtime_config.thread_count().into(),
        schema,
        settings,
        runtime_config.root_dir_path(),
    );
    let messages = pool.work();
    if !messages.is_empty() {
        cli::print_messages(&messages);
        std::process::exit(1);
    }
}
