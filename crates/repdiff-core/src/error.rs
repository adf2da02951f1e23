pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read input file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML syntax error in input file {path}: {source}")]
    XmlParse {
        path: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("unsupported report format: {path} (expected a .txt or .xml file)")]
    UnsupportedFormat { path: String },
}
