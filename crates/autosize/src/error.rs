/// Failures a host can report while a control is being measured.
///
/// None of these cross the public binding surface: the binder logs them and
/// leaves the control at its previous size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Reading or writing a single style property was refused by the host.
    PropertyAccess { property: String },
    /// The node is no longer part of the host document.
    DetachedNode,
    /// The host lacks a capability the operation needs.
    Unsupported(&'static str),
    /// Any other host-side failure, already rendered to text.
    Host(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::PropertyAccess { property } => {
                write!(f, "style property `{property}` is not accessible")
            }
            Error::DetachedNode => write!(f, "node is not part of the document"),
            Error::Unsupported(what) => write!(f, "host does not support {what}"),
            Error::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
