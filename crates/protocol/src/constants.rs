/// Block upload endpoint (`POST`, JSON body).
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Namespace listing endpoint (`GET`).
pub const LIST_ENDPOINT: &str = "/list";

/// Raw content download endpoint (`GET`).
pub const DOWNLOAD_ENDPOINT: &str = "/download";

/// Query parameter carrying the namespace path for list/download.
pub const PATH_QUERY_PARAM: &str = "path";
