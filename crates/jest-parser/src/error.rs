use thiserror::Error;

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParserError>;

/// Errors that can occur while parsing a test file
#[derive(Error, Debug)]
pub enum ParserError {
    /// Failed to parse the source code
    #[error("Parse error: {0}")]
    ParseError(String),

    /// File extension is not a supported test-file language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Forest construction error
    #[error("Tree error: {0}")]
    TreeError(#[from] testlens_tree::TreeError),
}

impl ParserError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}
