use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::channel::AcquisitionType;
use crate::consts::{
    DEFAULT_CHANNEL_COLOR, DEFAULT_CHANNEL_TYPE, FIELD_NUMBER, IDENTITY_ORIENTATION_MATRIX,
    PLANE_NUMBER,
};
use crate::error::{Result, SimaError};
use crate::io::tiff_stack::TiffStack;
use crate::metadata::locate::{default_strategies, locate_metadata, MetadataStrategy};
use crate::metadata::objective::pixel_pitch_um;
use crate::metadata::timestamp::{normalize_date, MeasurementTime};
use crate::metadata::tree::MetadataTree;
use crate::metadata::well::well_to_row_col;

/// Normalized acquisition metadata of one source image.
///
/// Fields below `objective_na` are per-frame placeholders; they hold their
/// defaults until a splitter or filename backfill specializes the record.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalImageMetadata {
    pub plate_name: Option<String>,
    pub measurement: MeasurementTime,
    pub well_id: String,
    pub row: u32,
    pub column: u32,
    pub vertical_total: u32,
    pub horizontal_total: u32,
    pub num_fields: u32,
    pub exposure_time_s: f64,
    pub channel_name: Option<String>,
    pub emission_wavelength_nm: Option<f64>,
    pub excitation_wavelength_nm: Option<f64>,
    pub num_channels: Option<u32>,
    pub num_timepoints: Option<u32>,
    pub image_width: u32,
    pub image_height: u32,
    pub resolution_x_um: String,
    pub resolution_y_um: String,
    pub objective_magnification: u32,
    pub objective_na: Option<f64>,

    pub field: u32,
    pub plane: u32,
    pub channel: Option<u32>,
    pub timepoint: Option<u32>,
    pub time_offset_s: f64,
    pub orientation_matrix: String,
    pub acquisition_type: Option<AcquisitionType>,
    pub source_filename: Option<String>,
    pub channel_color: String,
    pub channel_type: String,
    pub position_x_um: f64,
    pub position_y_um: f64,
}

impl CanonicalImageMetadata {
    /// Resolve the canonical attribute set from a cleaned metadata tree.
    ///
    /// `path` is only used to name the file in error messages.
    pub fn from_tree(tree: &MetadataTree, path: &Path) -> Result<Self> {
        let fields = FieldLookup { tree, path };

        let vertical_total = parse_u32(
            "VerticalTotal",
            fields.required(&["VerticalTotal", "verticalTotal"])?,
        )?;
        let horizontal_total = parse_u32(
            "HorizontalTotal",
            fields.required(&["HorizontalTotal", "horizontalTotal"])?,
        )?;

        let shutter_ms = parse_f64("ShutterSpeedMS", fields.required(&["ShutterSpeedMS"])?)?;
        let measurement = normalize_date(fields.required(&["Date"])?)?;

        let well_id = fields.required(&["Well"])?.to_string();
        let well = well_to_row_col(&well_id)?;

        let objective_magnification =
            parse_u32("ObjectiveSize", fields.required(&["ObjectiveSize"])?)?;
        let resolution = pixel_pitch_um(objective_magnification)?;

        let image_width = parse_u32("SizeX", fields.required(&["SizeX", "PixelWidth"])?)?;
        let image_height = parse_u32("SizeY", fields.required(&["SizeY", "PixelHeight"])?)?;

        Ok(Self {
            plate_name: fields.optional(&["Plate"]).map(str::to_string),
            measurement,
            well_id,
            row: well.row,
            column: well.column,
            vertical_total,
            horizontal_total,
            num_fields: vertical_total.saturating_mul(horizontal_total),
            exposure_time_s: shutter_ms / 1000.0,
            channel_name: fields.optional(&["Color"]).map(str::to_string),
            emission_wavelength_nm: optional_f64(&fields, "EmissionWavelength")?,
            excitation_wavelength_nm: optional_f64(&fields, "ExcitationWavelength")?,
            num_channels: optional_u32(&fields, "SizeC")?,
            num_timepoints: optional_u32(&fields, "SizeT")?,
            image_width,
            image_height,
            resolution_x_um: resolution.to_string(),
            resolution_y_um: resolution.to_string(),
            objective_magnification,
            objective_na: optional_f64(&fields, "NumericalAperture")?,

            field: FIELD_NUMBER,
            plane: PLANE_NUMBER,
            channel: None,
            timepoint: None,
            time_offset_s: 0.0,
            orientation_matrix: IDENTITY_ORIENTATION_MATRIX.to_string(),
            acquisition_type: None,
            source_filename: None,
            channel_color: DEFAULT_CHANNEL_COLOR.to_string(),
            channel_type: DEFAULT_CHANNEL_TYPE.to_string(),
            position_x_um: 0.0,
            position_y_um: 0.0,
        })
    }
}

/// Extract canonical metadata from a TIFF file.
pub fn extract_metadata(path: &Path) -> Result<CanonicalImageMetadata> {
    let stack = TiffStack::open(path)?;
    extract_from_stack(&stack, &default_strategies())
}

/// Extract canonical metadata from an opened stack using the given strategies.
pub fn extract_from_stack(
    stack: &TiffStack,
    strategies: &[Box<dyn MetadataStrategy>],
) -> Result<CanonicalImageMetadata> {
    let page = stack.first_page_text()?;
    let (strategy, tree) = locate_metadata(&page, strategies)
        .ok_or_else(|| SimaError::NoMetadataFound(stack.path().to_path_buf()))?;
    info!(file = %stack.path().display(), strategy, "Located metadata");

    let cleaned = tree.strip_attribute_markers();
    let metadata = CanonicalImageMetadata::from_tree(&cleaned, stack.path())?;
    debug!(
        well = %metadata.well_id,
        objective = metadata.objective_magnification,
        fields = metadata.num_fields,
        "Resolved canonical metadata"
    );
    Ok(metadata)
}

struct FieldLookup<'a> {
    tree: &'a MetadataTree,
    path: &'a Path,
}

impl<'a> FieldLookup<'a> {
    /// First non-empty value among `keys`, tried in order.
    fn optional(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter()
            .filter_map(|key| self.tree.find_text(key))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    fn required(&self, keys: &[&str]) -> Result<&'a str> {
        self.optional(keys)
            .ok_or_else(|| SimaError::MissingMetadataField {
                path: PathBuf::from(self.path),
                field: keys.join("/"),
            })
    }
}

fn invalid(field: &str, value: &str) -> SimaError {
    SimaError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Parse a non-negative integer, accepting whole decimals such as `"20.0"`.
fn parse_u32(field: &str, value: &str) -> Result<u32> {
    if let Ok(v) = value.parse::<u32>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) => Ok(v as u32),
        _ => Err(invalid(field, value)),
    }
}

fn parse_f64(field: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(field, value))
}

fn optional_u32(fields: &FieldLookup<'_>, key: &str) -> Result<Option<u32>> {
    fields.optional(&[key]).map(|v| parse_u32(key, v)).transpose()
}

fn optional_f64(fields: &FieldLookup<'_>, key: &str) -> Result<Option<f64>> {
    fields.optional(&[key]).map(|v| parse_f64(key, v)).transpose()
}
