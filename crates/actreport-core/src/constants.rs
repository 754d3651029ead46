//! Application-wide constants

/// Separator used when several values share one record column
pub const LINK_SEPARATOR: &str = ", ";

/// Storage folder receiving photo attachments
pub const DEFAULT_PHOTOS_FOLDER_ID: &str = "1fcE99gBJ0do-sMg3mRY9cM3hEl-ymUPr";

/// Storage folder receiving report attachments
pub const DEFAULT_REPORTS_FOLDER_ID: &str = "1RvtPszHpNdFfekXIzcQQStggBnv4SIUe";

/// Folder links in records are `{FOLDER_URL_BASE}/{folder_id}`
pub const DEFAULT_FOLDER_URL_BASE: &str = "https://drive.google.com/drive/folders";

/// Base for synthetic per-file links produced by the in-memory store
pub const DEFAULT_FILE_URL_BASE: &str = "https://drive.google.com/file/d";

pub const DEFAULT_PHOTO_EXTENSIONS: &str = "jpg,jpeg,png,gif,webp,heic";
pub const DEFAULT_REPORT_EXTENSIONS: &str = "pdf,doc,docx,txt";
