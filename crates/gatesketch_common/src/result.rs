//! Common result and error types for generation passes.

/// The standard result type for graph and descriptor generation.
///
/// Generation is all-or-nothing: `Err` means no document was produced.
pub type SketchResult<T> = Result<T, SketchError>;

/// A violated upstream contract detected while walking a design.
///
/// The flattening stage is trusted to hand over well-formed wiring; these
/// errors surface the cases where it did not instead of producing a
/// half-built document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SketchError {
    /// An instance has no wiring entry for one of its gate type's pins.
    #[error("pin '{pin}' of instance '{instance}' is not connected")]
    UnconnectedPin {
        /// The instance name.
        instance: String,
        /// The pin name.
        pin: String,
    },

    /// A net source names an instance that is not a runtime part.
    #[error("net '{net}' is driven by '{instance}', which is not a flattened part")]
    UnknownPart {
        /// The net name.
        net: String,
        /// The driving instance name.
        instance: String,
    },

    /// A gate type (transitively) contains itself.
    #[error("gate type '{gate}' is recursively defined")]
    RecursiveGate {
        /// The gate type name.
        gate: String,
    },

    /// Two distinct gate types share a name, so their part configs would
    /// collide.
    #[error("gate type name '{name}' is declared more than once")]
    DuplicateGateName {
        /// The shared name.
        name: String,
    },

    /// A generated artifact could not be encoded as text.
    #[error("failed to encode {artifact}: {message}")]
    Encode {
        /// What was being encoded.
        artifact: String,
        /// The encoder's message.
        message: String,
    },
}
