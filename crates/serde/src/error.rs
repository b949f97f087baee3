/// Error types for FHIR serialization and deserialization.
///
/// Codec-level problems (a second `value[x]` variant, an unknown field,
/// misaligned `_field` arrays) are raised through serde and arrive here as
/// [`SerdeError::Json`], also when the input was XML.
#[derive(Debug)]
pub enum SerdeError {
    /// JSON serialization or deserialization error
    Json(serde_json::Error),

    /// XML write error
    #[cfg(feature = "xml")]
    Xml(quick_xml::Error),

    /// The XML input is not well-formed
    #[cfg(feature = "xml")]
    XmlParse(roxmltree::Error),

    /// IO error during serialization/deserialization
    Io(std::io::Error),

    /// An element outside the FHIR namespace (or a `div` outside XHTML)
    Namespace {
        element: String,
        found: Option<String>,
    },

    /// An attribute the element does not define
    UnexpectedAttribute { element: String, attribute: String },

    /// A child element the enclosing type does not define
    UnexpectedElement { element: String, parent: String },

    /// Character data where FHIR XML only allows elements
    UnexpectedText { element: String, text: String },

    /// Custom error message
    Custom(String),
}

impl std::fmt::Display for SerdeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerdeError::Json(e) => write!(f, "JSON error: {}", e),
            #[cfg(feature = "xml")]
            SerdeError::Xml(e) => write!(f, "XML error: {}", e),
            #[cfg(feature = "xml")]
            SerdeError::XmlParse(e) => write!(f, "XML parse error: {}", e),
            SerdeError::Io(e) => write!(f, "IO error: {}", e),
            SerdeError::Namespace { element, found } => match found {
                Some(namespace) => write!(
                    f,
                    "element `{}` is in namespace `{}`, expected the FHIR namespace",
                    element, namespace
                ),
                None => write!(f, "element `{}` has no namespace, expected the FHIR namespace", element),
            },
            SerdeError::UnexpectedAttribute { element, attribute } => {
                write!(f, "unexpected attribute `{}` on `{}`", attribute, element)
            }
            SerdeError::UnexpectedElement { element, parent } => {
                write!(f, "unexpected element `{}` in `{}`", element, parent)
            }
            SerdeError::UnexpectedText { element, text } => {
                write!(f, "unexpected text {:?} in `{}`", text, element)
            }
            SerdeError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SerdeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerdeError::Json(e) => Some(e),
            #[cfg(feature = "xml")]
            SerdeError::Xml(e) => Some(e),
            #[cfg(feature = "xml")]
            SerdeError::XmlParse(e) => Some(e),
            SerdeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SerdeError {
    fn from(err: serde_json::Error) -> Self {
        SerdeError::Json(err)
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::Error> for SerdeError {
    fn from(err: quick_xml::Error) -> Self {
        SerdeError::Xml(err)
    }
}

#[cfg(feature = "xml")]
impl From<roxmltree::Error> for SerdeError {
    fn from(err: roxmltree::Error) -> Self {
        SerdeError::XmlParse(err)
    }
}

impl From<std::io::Error> for SerdeError {
    fn from(err: std::io::Error) -> Self {
        SerdeError::Io(err)
    }
}

impl From<String> for SerdeError {
    fn from(msg: String) -> Self {
        SerdeError::Custom(msg)
    }
}

impl From<&str> for SerdeError {
    fn from(msg: &str) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

/// Result type alias for FHIR serialization operations
pub type Result<T> = std::result::Result<T, SerdeError>;
