use thiserror::Error;

use crate::loc::SourceLocation;
use crate::NodeId;

pub type Result<T, E = AstError> = std::result::Result<T, E>;

/// Any failure the crate can report, from malformed compiler output to
/// structural violations detected after the tree is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// The reader encountered a schema tag that no builder is registered
    /// for.
    #[error("unknown node kind `{tag}` at {src}")]
    UnknownNodeKind { tag: String, src: SourceLocation },

    /// A required field of a node object is missing or has the wrong JSON
    /// type.
    #[error("schema mismatch at {src}: {reason}")]
    SchemaMismatch { src: SourceLocation, reason: String },

    /// A reference attribute names an id the context cannot resolve.
    #[error("node #{owner}'s `{attribute}` references missing node #{target}")]
    DanglingReference {
        owner: NodeId,
        attribute: &'static str,
        target: NodeId,
    },

    /// An operation received a node that does not belong to the context it
    /// was given.
    #[error("node #{node} does not belong to this context")]
    WrongContext { node: NodeId },

    /// Registration or a context merge ran into an id that is already
    /// taken.
    #[error("node id #{id} is already registered")]
    DuplicateId { id: NodeId },

    /// A lookup that must succeed did not.
    #[error("no node with id #{id} is registered")]
    MissingNode { id: NodeId },

    /// A structural child's parent back-pointer disagrees with the node
    /// that lists it as a child.
    #[error(
        "node #{child} is a child of #{expected_parent} but its parent pointer is {actual_parent:?}"
    )]
    ParentageInconsistent {
        child: NodeId,
        expected_parent: NodeId,
        actual_parent: Option<NodeId>,
    },

    /// A node claims `node` as its parent, but `node`'s child list does not
    /// contain it.
    #[error("node #{missing_child} has parent #{node}, which does not list it as a child")]
    CoverageViolation {
        node: NodeId,
        missing_child: NodeId,
    },

    /// A source unit's numeric `exportedSymbols` map and its dereferenced
    /// view disagree.
    #[error("source unit #{unit}'s exported symbol `{symbol}` does not resolve consistently")]
    ExportedSymbolsMismatch { unit: NodeId, symbol: String },

    /// The compiler output carried fatal errors, so no tree was built.
    #[error("compiler output contains {} error(s): {}", messages.len(), messages.first().map(String::as_str).unwrap_or(""))]
    CompileErrorsPresent { messages: Vec<String> },

    /// A `src` string did not parse as an `offset:length:fileIndex` triple.
    #[error("malformed source location `{raw}`")]
    MalformedSourceLocation { raw: String },

    /// A structural list mutation was requested on a node whose children
    /// are computed from typed attributes.
    #[error("node #{node} does not own an ordered child list")]
    NotAContainer { node: NodeId },
}

impl AstError {
    /// Whether this error reports a structural sanity violation, as opposed
    /// to bad input or misuse of the API.
    ///
    /// [`is_sane`](crate::sanity::is_sane) swallows exactly these.
    pub fn is_sanity_violation(&self) -> bool {
        matches!(
            self,
            Self::DanglingReference { .. }
                | Self::WrongContext { .. }
                | Self::ParentageInconsistent { .. }
                | Self::CoverageViolation { .. }
                | Self::ExportedSymbolsMismatch { .. }
        )
    }
}
