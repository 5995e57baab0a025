use thiserror::Error;

/// Failure turning a Base64 payload into text.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was blank; nothing was decoded.
    #[error("payload is empty")]
    Empty,

    /// The payload is not valid standard Base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Failure reading the decoded text as a Comprobante XML document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Syntax error reported by the XML reader.
    #[error("XML syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Malformed attribute (duplicate name, missing quotes, bad entity).
    #[error("malformed attribute at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document contains no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// The root element is not a Comprobante.
    #[error("unexpected root element <{0}>, expected <Comprobante>")]
    UnexpectedRoot(String),

    /// A second element appeared after the root was closed.
    #[error("unexpected element <{0}> after the root element")]
    TrailingElement(String),

    /// Character data before or after the root element.
    #[error("data at the root level is invalid (byte {0})")]
    TextOutsideRoot(u64),

    /// The document ended with elements still open.
    #[error("unexpected end of document, <{0}> is not closed")]
    UnclosedElement(String),
}

/// Failure serializing a Comprobante back to XML.
#[derive(Debug, Error)]
#[error("XML write error: {0}")]
pub struct WriteError(#[from] std::io::Error);

/// Which input stage rejected the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFailureKind {
    EmptyInput,
    MalformedEncoding,
    MalformedDocument,
}

impl std::fmt::Display for InputFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::EmptyInput => "empty input",
            Self::MalformedEncoding => "malformed encoding",
            Self::MalformedDocument => "malformed document",
        })
    }
}

/// A payload rejected before any document tree exists.
#[derive(Debug, Error)]
pub enum InputError {
    /// Blank payload, rejected before decoding.
    #[error("payload is empty")]
    EmptyInput,

    /// Base64 or UTF-8 decoding failed.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[source] DecodeError),

    /// The text is not a well-formed Comprobante document.
    #[error("malformed document: {0}")]
    MalformedDocument(#[source] ParseError),
}

impl InputError {
    pub fn kind(&self) -> InputFailureKind {
        match self {
            Self::EmptyInput => InputFailureKind::EmptyInput,
            Self::MalformedEncoding(_) => InputFailureKind::MalformedEncoding,
            Self::MalformedDocument(_) => InputFailureKind::MalformedDocument,
        }
    }

    /// The lowest-level diagnostic available for this failure.
    pub fn detail(&self) -> String {
        match self {
            Self::EmptyInput => DecodeError::Empty.to_string(),
            Self::MalformedEncoding(e) => e.to_string(),
            Self::MalformedDocument(e) => e.to_string(),
        }
    }
}

impl From<DecodeError> for InputError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::Empty => Self::EmptyInput,
            other => Self::MalformedEncoding(other),
        }
    }
}

impl From<ParseError> for InputError {
    fn from(e: ParseError) -> Self {
        Self::MalformedDocument(e)
    }
}
