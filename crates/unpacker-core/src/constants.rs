//! Constants shared across crates.

/// Header carrying base64(`user:secret`) on every AppAPI request, in both directions.
pub const HEADER_APP_API_AUTH: &str = "AUTHORIZATION-APP-API";
pub const HEADER_EX_APP_ID: &str = "EX-APP-ID";
pub const HEADER_EX_APP_VERSION: &str = "EX-APP-VERSION";
pub const HEADER_OCS_API_REQUEST: &str = "OCS-APIRequest";

/// Name of the scratch root directory created under the system temp dir.
pub const SCRATCH_DIR_NAME: &str = "Extracted";

/// Subdirectory of a job's scratch directory that receives unpacked members.
pub const EXTRACTED_SUBDIR: &str = "extracted";

/// Subdirectory of a job's scratch directory holding the downloaded archive.
/// Never equal to [`EXTRACTED_SUBDIR`]: the archive keeps its own name.
pub const DOWNLOAD_SUBDIR: &str = "download";

/// Length of the random `object_id` attached to AppAPI notifications.
pub const NOTIFICATION_OBJECT_ID_LEN: usize = 56;

/// MIME type the extraction actions are registered for.
pub const ZIP_MIME: &str = "application/zip";
