/// Row letters of a plate, in order. Position + 1 is the row number.
pub const WELL_ROW_LETTERS: &str = "ABCDEFGHIJKLMNOP";

/// Default name of the CSV image index written to the output directory.
pub const DEFAULT_INDEX_FILENAME: &str = "ImageIndex.ColumbusIDX.csv";

/// Literal read-step segment of split frame filenames.
pub const READ_STEP_LITERAL: &str = "RS";

/// Fields are not split; every output frame belongs to field 1.
pub const FIELD_NUMBER: u32 = 1;

/// Planes are not split; every output frame is plane 1.
pub const PLANE_NUMBER: u32 = 1;

/// Identity orientation matrix as written to the index.
pub const IDENTITY_ORIENTATION_MATRIX: &str = "[[1,0,0],[0,1,0],[0,0,1]]";

/// Channel color used until a channel assignment overrides it.
pub const DEFAULT_CHANNEL_COLOR: &str = "#0035FF";

/// Channel type understood by the downstream importer (sic).
pub const DEFAULT_CHANNEL_TYPE: &str = "Fluoresence";

/// Start of an OME block embedded in a larger text payload.
pub const OME_START_MARKER: &str = "<OME";

/// Date format used by the instrument (two-digit year).
pub const INSTRUMENT_DATE_FORMAT: &str = "%m/%d/%y";

/// Four-digit-year variant seen on some exports.
pub const INSTRUMENT_DATE_FORMAT_LONG_YEAR: &str = "%m/%d/%Y";

/// ISO-8601 UTC format of the MeasurementDate column.
pub const MEASUREMENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// ImageJ metadata byte-count tag.
pub const IJ_METADATA_BYTE_COUNTS_TAG: u16 = 50838;

/// ImageJ metadata tag.
pub const IJ_METADATA_TAG: u16 = 50839;

/// Zero-padding width of the timepoint segment in frame filenames.
pub const TIMEPOINT_DIGITS: usize = 3;
