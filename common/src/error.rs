use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Unable to read parameter toml: {path}")]
    TomlReadError { path: String },

    #[error("Unable to parse parameter toml: {msg}")]
    TomlParseError { msg: String },
}
