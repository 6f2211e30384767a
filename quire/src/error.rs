use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced by Quire.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration from file {0}")]
    FailedToLoadConfig(PathBuf),
    #[error("failed to load template from file {0}")]
    FailedToLoadTemplate(PathBuf),
    #[error("failed to parse template \"{0}\": {1}")]
    TemplateParse(String, handlebars::TemplateError),
    #[error("a different template with the name \"{0}\" has already been registered")]
    TemplateAlreadyExists(String),
    #[error("failed to render template \"{0}\": {1}")]
    TemplateRender(String, handlebars::RenderError),
    #[error("failed to render page {0}")]
    FailedToRenderPage(PathBuf),
    #[error("failed to read source file {0}")]
    FailedToReadSource(PathBuf),
    #[error("failed to list directory {0}")]
    FailedToListDir(PathBuf),
    #[error("failed to create directory {0}")]
    FailedToCreateDir(PathBuf),
    #[error("failed to write output file {0}")]
    FailedToWrite(PathBuf),
    #[error("failed to copy {0} to {1}")]
    FailedToCopy(PathBuf, PathBuf),
    #[error("source path is not a directory: {0}")]
    SourceNotADirectory(PathBuf),
    #[error("destination {0} lies inside source directory {1}")]
    DestinationInsideSource(PathBuf, PathBuf),
    #[error("failed to load data from file {0}")]
    FailedToLoadData(PathBuf),
    #[error("failed to load page definitions from file {0}")]
    FailedToLoadPages(PathBuf),
    #[error("page output path must be relative and stay within the destination: {0}")]
    OutputEscapesDestination(PathBuf),
    #[error("cannot determine file type of file: {0}")]
    CannotDetermineFileType(PathBuf),
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("path has no parent directory: {0}")]
    PathMissingParent(PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
