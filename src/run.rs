mod cli;
mod table;

pub(crate) use cli::as_cli;
