use serde::{Serialize, Serializer};

use crate::channel::AcquisitionType;
use crate::metadata::CanonicalImageMetadata;

/// Column names of the image index, in order.
pub const INDEX_COLUMNS: [&str; 29] = [
    "PlateName",
    "MeasurementDate",
    "Row",
    "Column",
    "Field",
    "Timepoint",
    "Plane",
    "Channel",
    "ChannelName",
    "ChannelColor",
    "ChannelType",
    "ImageResolutionX@um",
    "ImageResolutionY@um",
    "ExposureTime[s]",
    "MainEmissionWavelength@nm",
    "MainExcitationWavelength@nm",
    "PositionX@um",
    "PositionY@um",
    "TimeOffset@s",
    "AbsoluteTime@s",
    "ImageWidth",
    "ImageHeight",
    "NumberOfFields",
    "NumberOfTimepoints",
    "ObjectiveMagnification",
    "ObjectiveNA",
    "AcquisitionType",
    "OrientationMatrix",
    "SourceFilename",
];

/// One row of the image index. Field order matches [`INDEX_COLUMNS`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutputFrameRecord {
    #[serde(rename = "PlateName")]
    pub plate_name: Option<String>,
    #[serde(rename = "MeasurementDate")]
    pub measurement_date: String,
    #[serde(rename = "Row")]
    pub row: u32,
    #[serde(rename = "Column")]
    pub column: u32,
    #[serde(rename = "Field")]
    pub field: u32,
    #[serde(rename = "Timepoint")]
    pub timepoint: Option<u32>,
    #[serde(rename = "Plane")]
    pub plane: u32,
    #[serde(rename = "Channel")]
    pub channel: Option<u32>,
    #[serde(rename = "ChannelName")]
    pub channel_name: Option<String>,
    #[serde(rename = "ChannelColor")]
    pub channel_color: String,
    #[serde(rename = "ChannelType")]
    pub channel_type: String,
    #[serde(rename = "ImageResolutionX@um")]
    pub resolution_x_um: String,
    #[serde(rename = "ImageResolutionY@um")]
    pub resolution_y_um: String,
    #[serde(rename = "ExposureTime[s]", serialize_with = "plain_float")]
    pub exposure_time_s: f64,
    #[serde(rename = "MainEmissionWavelength@nm", serialize_with = "plain_float_opt")]
    pub emission_wavelength_nm: Option<f64>,
    #[serde(rename = "MainExcitationWavelength@nm", serialize_with = "plain_float_opt")]
    pub excitation_wavelength_nm: Option<f64>,
    #[serde(rename = "PositionX@um", serialize_with = "plain_float")]
    pub position_x_um: f64,
    #[serde(rename = "PositionY@um", serialize_with = "plain_float")]
    pub position_y_um: f64,
    #[serde(rename = "TimeOffset@s", serialize_with = "plain_float")]
    pub time_offset_s: f64,
    #[serde(rename = "AbsoluteTime@s")]
    pub absolute_time_s: i64,
    #[serde(rename = "ImageWidth")]
    pub image_width: u32,
    #[serde(rename = "ImageHeight")]
    pub image_height: u32,
    #[serde(rename = "NumberOfFields")]
    pub number_of_fields: u32,
    #[serde(rename = "NumberOfTimepoints")]
    pub number_of_timepoints: Option<u32>,
    #[serde(rename = "ObjectiveMagnification")]
    pub objective_magnification: u32,
    #[serde(rename = "ObjectiveNA", serialize_with = "plain_float_opt")]
    pub objective_na: Option<f64>,
    #[serde(rename = "AcquisitionType")]
    pub acquisition_type: Option<AcquisitionType>,
    #[serde(rename = "OrientationMatrix")]
    pub orientation_matrix: String,
    #[serde(rename = "SourceFilename")]
    pub source_filename: Option<String>,
}

impl OutputFrameRecord {
    /// Index columns whose value is empty in this row.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let empty = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());
        let checks = [
            ("PlateName", empty(&self.plate_name)),
            ("Timepoint", self.timepoint.is_none()),
            ("Channel", self.channel.is_none()),
            ("ChannelName", empty(&self.channel_name)),
            ("MainEmissionWavelength@nm", self.emission_wavelength_nm.is_none()),
            ("MainExcitationWavelength@nm", self.excitation_wavelength_nm.is_none()),
            ("NumberOfTimepoints", self.number_of_timepoints.is_none()),
            ("ObjectiveNA", self.objective_na.is_none()),
            ("AcquisitionType", self.acquisition_type.is_none()),
            ("SourceFilename", empty(&self.source_filename)),
        ];
        checks
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name)
            .collect()
    }
}

impl From<&CanonicalImageMetadata> for OutputFrameRecord {
    fn from(m: &CanonicalImageMetadata) -> Self {
        Self {
            plate_name: m.plate_name.clone(),
            measurement_date: m.measurement.iso.clone(),
            row: m.row,
            column: m.column,
            field: m.field,
            timepoint: m.timepoint,
            plane: m.plane,
            channel: m.channel,
            channel_name: m.channel_name.clone(),
            channel_color: m.channel_color.clone(),
            channel_type: m.channel_type.clone(),
            resolution_x_um: m.resolution_x_um.clone(),
            resolution_y_um: m.resolution_y_um.clone(),
            exposure_time_s: m.exposure_time_s,
            emission_wavelength_nm: m.emission_wavelength_nm,
            excitation_wavelength_nm: m.excitation_wavelength_nm,
            position_x_um: m.position_x_um,
            position_y_um: m.position_y_um,
            time_offset_s: m.time_offset_s,
            absolute_time_s: m.measurement.epoch_seconds,
            image_width: m.image_width,
            image_height: m.image_height,
            number_of_fields: m.num_fields,
            number_of_timepoints: m.num_timepoints,
            objective_magnification: m.objective_magnification,
            objective_na: m.objective_na,
            acquisition_type: m.acquisition_type,
            orientation_matrix: m.orientation_matrix.clone(),
            source_filename: m.source_filename.clone(),
        }
    }
}

/// Write floats without a forced fraction: `0`, `460`, `0.012`.
fn plain_float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn plain_float_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}
