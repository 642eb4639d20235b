//! Error taxonomy shared by the graph and search pipelines.

/// The request never produced a usable body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
	/// The fetch promise rejected (offline, CORS, aborted, ...).
	#[error("request to {url} failed: {reason}")]
	Network {
		/// Requested URL.
		url: String,
		/// Whatever the browser reported.
		reason: String,
	},
	/// The server answered with a non-2xx status.
	#[error("request to {url} returned HTTP {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},
}

/// The body arrived but does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataShapeError {
	/// Body is not JSON, or does not decode into the expected structure.
	#[error("malformed payload: {0}")]
	Json(String),
	/// Search responses must be a JSON array.
	#[error("expected a JSON array of results")]
	NotAnArray,
	/// One element of a result list could not be decoded.
	#[error("result #{index} is malformed: {message}")]
	Result {
		/// Position of the element in the response array.
		index: usize,
		/// Decoder message, e.g. the missing field.
		message: String,
	},
}

/// Graph data that decodes fine but contradicts itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataIntegrityError {
	/// An edge endpoint names no node.
	#[error("edge {from} -> {to} references an unknown node")]
	DanglingEdge {
		/// Source id of the edge.
		from: String,
		/// Target id of the edge.
		to: String,
	},
	/// Two nodes share an id.
	#[error("node id {0:?} appears more than once")]
	DuplicateNode(String),
}

/// Reasons a layout run refuses to start.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
	/// The payload failed validation.
	#[error(transparent)]
	Integrity(#[from] DataIntegrityError),
	/// A [`LayoutConfig`](crate::graph::LayoutConfig) option is out of range.
	#[error("invalid layout option `{option}`: {reason}")]
	InvalidConfig {
		/// Option name as written in the viewer's option blob.
		option: &'static str,
		/// What the option must satisfy.
		reason: &'static str,
	},
}

/// Coarse cause of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// See [`TransportError`].
	Transport,
	/// See [`DataShapeError`].
	DataShape,
	/// See [`DataIntegrityError`].
	DataIntegrity,
	/// An invalid layout option.
	Layout,
}

/// Anything a pipeline can fail with, caught at the page boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
	/// Fetch failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Body did not decode.
	#[error(transparent)]
	DataShape(#[from] DataShapeError),
	/// Graph contradicts itself.
	#[error(transparent)]
	DataIntegrity(#[from] DataIntegrityError),
	/// Never holds [`LayoutError::Integrity`]; that maps to `DataIntegrity`.
	#[error(transparent)]
	Layout(LayoutError),
}

impl From<LayoutError> for ClientError {
	fn from(err: LayoutError) -> Self {
		match err {
			// Integrity failures keep their own cause even when raised by the engine.
			LayoutError::Integrity(e) => Self::DataIntegrity(e),
			other => Self::Layout(other),
		}
	}
}

impl ClientError {
	/// Which stage failed.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Transport(_) => ErrorKind::Transport,
			Self::DataShape(_) => ErrorKind::DataShape,
			Self::DataIntegrity(_) => ErrorKind::DataIntegrity,
			Self::Layout(_) => ErrorKind::Layout,
		}
	}
}
