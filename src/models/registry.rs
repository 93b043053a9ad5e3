//! models::registry
//!
//! Lookup tables over every declared schema and vocabulary, and kind-based
//! dispatch for interchange text whose record type is not known up front.

use tracing::debug;

use super::device::{
    Device, DETECTOR_MANUFACTURER, DEVICE, DEVICE_MANUFACTURER, DEVICE_TYPE, MANUFACTURER,
};
use super::instrument::{
    AdditionalImagingDevice, Com, Detector, Filter, Instrument, Lightsource, MotorizedStage,
    Objective, OpticalTable, ScanningStage, ADDITIONAL_IMAGING_DEVICE, COM, COOLING, COUPLING,
    DATA_INTERFACE, DETECTOR, DETECTOR_TYPE, FILTER, IMAGING_DEVICE_TYPE, IMMERSION, INSTRUMENT,
    INSTRUMENT_TYPE, LIGHTSOURCE, LIGHTSOURCE_TYPE, MOTORIZED_STAGE, OBJECTIVE,
    OPTICAL_FILTER_TYPE, OPTICAL_TABLE, SCANNING_STAGE, STAGE_AXIS_DIRECTION, STAGE_AXIS_NAME,
};
use super::processing::{
    AnalysisProcess, DataProcess, PipelineProcess, Processing, ANALYSIS_PROCESS, DATA_PROCESS,
    PIPELINE_PROCESS, PROCESSING, PROCESS_NAME,
};
use super::stimulus::{
    AuditoryStimulation, OlfactometerChannelConfig, OlfactoryStimulation, OptoStimulation,
    PhotoStimulation, PhotoStimulationGroup, Software, StimulusEpoch, VisualStimulation,
    AUDITORY_STIMULATION, FILTER_TYPE, OLFACTOMETER_CHANNEL_CONFIG, OLFACTORY_STIMULATION,
    OPTO_STIMULATION, PHOTO_STIMULATION, PHOTO_STIMULATION_GROUP, PULSE_SHAPE, SOFTWARE,
    STIMULUS_EPOCH, STIMULUS_MODALITY, VISUAL_STIMULATION,
};
use super::tile::{
    AcquisitionTile, Channel, Tile, ACQUISITION_TILE, AFFINE_TRANSFORM, CHANNEL,
    ROTATION_TRANSFORM, SCALE_TRANSFORM, TILE, TRANSLATION_TRANSFORM,
};
use super::units::{
    ANGLE_UNIT, CONCENTRATION_UNIT, FREQUENCY_UNIT, POWER_UNIT, SIZE_UNIT, SOUND_INTENSITY_UNIT,
    TIME_UNIT, VOLUME_UNIT,
};
use crate::core::codec::{from_text, read_envelope, to_text_with, CodecError, TextOptions};
use crate::core::schema::{IssueKind, RecordSchema, ValidationError, Vocabulary};
use crate::core::types::FieldPath;

/// Every record schema with interchange text of its own, top-level records
/// first. Each entry is a `kind` that [`check_text`] dispatches.
pub static ALL_SCHEMAS: &[&RecordSchema] = &[
    &INSTRUMENT,
    &PROCESSING,
    &OBJECTIVE,
    &DETECTOR,
    &LIGHTSOURCE,
    &MOTORIZED_STAGE,
    &SCANNING_STAGE,
    &OPTICAL_TABLE,
    &COM,
    &FILTER,
    &ADDITIONAL_IMAGING_DEVICE,
    &DEVICE,
    &CHANNEL,
    &TILE,
    &ACQUISITION_TILE,
    &SOFTWARE,
    &OPTO_STIMULATION,
    &VISUAL_STIMULATION,
    &PHOTO_STIMULATION_GROUP,
    &PHOTO_STIMULATION,
    &OLFACTOMETER_CHANNEL_CONFIG,
    &OLFACTORY_STIMULATION,
    &AUDITORY_STIMULATION,
    &STIMULUS_EPOCH,
    &PIPELINE_PROCESS,
    &ANALYSIS_PROCESS,
    &DATA_PROCESS,
];

/// Union variant schemas. They only appear nested in a union field and
/// never carry an envelope.
pub static NESTED_SCHEMAS: &[&RecordSchema] = &[
    &SCALE_TRANSFORM,
    &TRANSLATION_TRANSFORM,
    &ROTATION_TRANSFORM,
    &AFFINE_TRANSFORM,
];

/// Schemas written to their own standard file.
pub static TOP_LEVEL: &[&RecordSchema] = &[&INSTRUMENT, &PROCESSING];

/// Every declared vocabulary.
pub static VOCABULARIES: &[&Vocabulary] = &[
    &SIZE_UNIT,
    &FREQUENCY_UNIT,
    &TIME_UNIT,
    &POWER_UNIT,
    &CONCENTRATION_UNIT,
    &VOLUME_UNIT,
    &SOUND_INTENSITY_UNIT,
    &ANGLE_UNIT,
    &DEVICE_MANUFACTURER,
    &DETECTOR_MANUFACTURER,
    &DEVICE_TYPE,
    &MANUFACTURER,
    &INSTRUMENT_TYPE,
    &IMMERSION,
    &DETECTOR_TYPE,
    &DATA_INTERFACE,
    &COOLING,
    &LIGHTSOURCE_TYPE,
    &COUPLING,
    &STAGE_AXIS_DIRECTION,
    &STAGE_AXIS_NAME,
    &OPTICAL_FILTER_TYPE,
    &IMAGING_DEVICE_TYPE,
    &STIMULUS_MODALITY,
    &PULSE_SHAPE,
    &FILTER_TYPE,
    &PROCESS_NAME,
];

/// Find a schema by identifier.
pub fn lookup(id: &str) -> Option<&'static RecordSchema> {
    ALL_SCHEMAS.iter().copied().find(|schema| schema.id == id)
}

/// Find a nested-only schema by identifier.
pub fn lookup_nested(id: &str) -> Option<&'static RecordSchema> {
    NESTED_SCHEMAS.iter().copied().find(|schema| schema.id == id)
}

/// Find a vocabulary by name, ignoring ASCII case.
pub fn lookup_vocabulary(name: &str) -> Option<&'static Vocabulary> {
    VOCABULARIES
        .iter()
        .copied()
        .find(|vocabulary| vocabulary.name.eq_ignore_ascii_case(name))
}

/// Check if a schema is written to its own standard file.
pub fn is_top_level(schema: &RecordSchema) -> bool {
    TOP_LEVEL.iter().any(|top| top.id == schema.id)
}

macro_rules! checked_records {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        /// A record read from interchange text, of whichever kind it declared.
        #[derive(Debug, Clone, PartialEq)]
        pub enum CheckedRecord {
            $($variant($ty),)+
        }

        impl CheckedRecord {
            /// Schema of the contained record.
            pub fn schema(&self) -> &'static RecordSchema {
                match self {
                    $(CheckedRecord::$variant(_) => <$ty as $crate::core::schema::Record>::SCHEMA,)+
                }
            }

            /// Re-serialize the contained record.
            pub fn to_text_with(&self, options: &TextOptions) -> Result<String, CodecError> {
                match self {
                    $(CheckedRecord::$variant(record) => to_text_with(record, options),)+
                }
            }
        }

        fn dispatch(kind: &str, text: &str) -> Option<Result<CheckedRecord, CodecError>> {
            $(
                if kind == <$ty as $crate::core::schema::Record>::SCHEMA.id {
                    return Some(from_text::<$ty>(text).map(CheckedRecord::$variant));
                }
            )+
            None
        }
    };
}

checked_records! {
    Instrument => Instrument,
    Processing => Processing,
    Objective => Objective,
    Detector => Detector,
    Lightsource => Lightsource,
    MotorizedStage => MotorizedStage,
    ScanningStage => ScanningStage,
    OpticalTable => OpticalTable,
    Com => Com,
    Filter => Filter,
    AdditionalImagingDevice => AdditionalImagingDevice,
    Device => Device,
    Channel => Channel,
    Tile => Tile,
    AcquisitionTile => AcquisitionTile,
    Software => Software,
    OptoStimulation => OptoStimulation,
    VisualStimulation => VisualStimulation,
    PhotoStimulationGroup => PhotoStimulationGroup,
    PhotoStimulation => PhotoStimulation,
    OlfactometerChannelConfig => OlfactometerChannelConfig,
    OlfactoryStimulation => OlfactoryStimulation,
    AuditoryStimulation => AuditoryStimulation,
    StimulusEpoch => StimulusEpoch,
    PipelineProcess => PipelineProcess,
    AnalysisProcess => AnalysisProcess,
    DataProcess => DataProcess,
}

/// Parse interchange text of any registered kind.
///
/// The `kind` field selects the record type; the text is then read with
/// that type's [`from_text`].
///
/// # Errors
///
/// - `CodecError::Syntax` if the text is not a JSON object
/// - `CodecError::Invalid` with a `SchemaKind` issue if `kind` names no
///   registered record
/// - any error from the selected type's `from_text`
pub fn check_text(text: &str) -> Result<CheckedRecord, CodecError> {
    let envelope = read_envelope(text)?;
    debug!("Dispatching on kind '{}'", envelope.kind);

    dispatch(&envelope.kind, text).unwrap_or_else(|| {
        Err(ValidationError::single(
            "record",
            FieldPath::root().field("kind"),
            IssueKind::SchemaKind {
                expected: "a registered schema",
                found: envelope.kind,
            },
        )
        .into())
    })
}
