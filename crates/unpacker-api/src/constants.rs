//! Route paths and request limits.

pub const HEARTBEAT_PATH: &str = "/heartbeat";
pub const ENABLED_PATH: &str = "/enabled";
pub const INIT_PATH: &str = "/init";
pub const EXTRACT_TO_AUTO_PATH: &str = "/extract_to_auto";
pub const EXTRACT_TO_PARENT_PATH: &str = "/extract_to_parent";

/// Upper bound for inbound request bodies. Action payloads are small JSON documents.
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
