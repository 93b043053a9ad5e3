//! models::processing
//!
//! Processing provenance.
//!
//! [`Processing`] is a top-level record. It always names the pipeline that
//! produced the data and may also carry a downstream analysis; both are
//! ordered lists of [`DataProcess`] steps.

use serde::{Deserialize, Serialize};

use crate::core::schema::{
    CoreRecord, DefaultValue, FieldDescriptor, FieldKind, Params, Record, RecordSchema,
};
use crate::core::types::{SchemaVersion, UtcTimestamp};
use crate::define_vocabulary;

define_vocabulary! {
    /// Data processing type labels
    pub enum ProcessName as PROCESS_NAME {
        Analysis = "ANALYSIS" => "Analysis",
        EphysCuration = "EPHYS_CURATION" => "Ephys curation",
        EphysPostprocessing = "EPHYS_POSTPROCESSING" => "Ephys postprocessing",
        EphysPreprocessing = "EPHYS_PREPROCESSING" => "Ephys preprocessing",
        EphysVisualization = "EPHYS_VISUALIZATION" => "Ephys visualization",
        FiducialSegmentation = "FIDUCIAL_SEGMENTATION" => "Fiducial segmentation",
        FileConversion = "FILE_CONVERSION" => "File format conversion",
        ImageAtlasAlignment = "IMAGE_ATLAS_ALIGNMENT" => "Image atlas alignment",
        ImageBackgroundSubtraction = "IMAGE_BACKGROUND_SUBTRACTION" => "Image background subtraction",
        ImageCellClassification = "IMAGE_CELL_CLASSIFICATION" => "Image cell classification",
        ImageCellSegmentation = "IMAGE_CELL_SEGMENTATION" => "Image cell segmentation",
        ImageDestriping = "IMAGE_DESTRIPING" => "Image destriping",
        ImageFlatFieldCorrection = "IMAGE_FLAT_FIELD_CORRECTION" => "Image flat-field correction",
        ImageImporting = "IMAGE_IMPORTING" => "Image importing",
        ImageThresholding = "IMAGE_THRESHOLDING" => "Image thresholding",
        ImageTileAlignment = "IMAGE_TILE_ALIGNMENT" => "Image tile alignment",
        ImageTileFusing = "IMAGE_TILE_FUSING" => "Image tile fusing",
        ImageTileProjection = "IMAGE_TILE_PROJECTION" => "Image tile projection",
        NeuropilSubtraction = "NEUROPIL_SUBTRACTION" => "Neuropil subtraction",
        SkullStripping = "SKULL_STRIPPING" => "Skull stripping",
        SpikeSorting = "SPIKE_SORTING" => "Spike sorting",
        VideoMotionCorrection = "VIDEO_MOTION_CORRECTION" => "Video motion correction",
        VideoPlaneDecrosstalk = "VIDEO_PLANE_DECROSSTALK" => "Video plane decrosstalk",
        VideoRoiClassification = "VIDEO_ROI_CLASSIFICATION" => "Video ROI classification",
        VideoRoiSegmentation = "VIDEO_ROI_SEGMENTATION" => "Video ROI segmentation",
        VideoRoiTimeseriesExtraction = "VIDEO_ROI_TIMESERIES_EXTRACTION" => "Video ROI timeseries extraction",
        Other = "OTHER" => "Other",
    }
}

pub static DATA_PROCESS: RecordSchema = RecordSchema {
    id: "data_process",
    version: SchemaVersion::new(0, 1, 0),
    title: "Data process",
    description: "Description of a single processing step",
    fields: &[
        FieldDescriptor::required("name", "Name", FieldKind::Enum(&PROCESS_NAME)),
        FieldDescriptor::required("software_version", "Version", FieldKind::String)
            .described("Version of the software used"),
        FieldDescriptor::required("start_date_time", "Start date time", FieldKind::Timestamp),
        FieldDescriptor::required("end_date_time", "End date time", FieldKind::Timestamp),
        FieldDescriptor::required("input_location", "Input location", FieldKind::String)
            .described("Path to data inputs"),
        FieldDescriptor::required("output_location", "Output location", FieldKind::String)
            .described("Path to data outputs"),
        FieldDescriptor::required("code_url", "Code URL", FieldKind::String)
            .described("Path to code repository"),
        FieldDescriptor::optional("code_version", "Code version", FieldKind::String),
        FieldDescriptor::defaulted(
            "parameters",
            "Parameters",
            FieldKind::Params,
            DefaultValue::EmptyParams,
        ),
        FieldDescriptor::defaulted("outputs", "Outputs", FieldKind::Params, DefaultValue::EmptyParams)
            .described("Output parameters"),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
    ],
};

/// Description of a single processing step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataProcess {
    pub name: ProcessName,
    pub software_version: String,
    pub start_date_time: UtcTimestamp,
    pub end_date_time: UtcTimestamp,
    pub input_location: String,
    pub output_location: String,
    pub code_url: String,
    pub code_version: Option<String>,
    pub parameters: Params,
    pub outputs: Params,
    pub notes: Option<String>,
}

impl Record for DataProcess {
    const SCHEMA: &'static RecordSchema = &DATA_PROCESS;
}

static DATA_PROCESS_KIND: FieldKind = FieldKind::Record(&DATA_PROCESS);

pub static PIPELINE_PROCESS: RecordSchema = RecordSchema {
    id: "pipeline_process",
    version: SchemaVersion::new(0, 1, 0),
    title: "Pipeline process",
    description: "Description of a processing pipeline",
    fields: &[
        FieldDescriptor::required("person", "Person", FieldKind::String)
            .described("Name of person responsible for processing pipeline"),
        FieldDescriptor::optional("pipeline_version", "Pipeline version", FieldKind::String),
        FieldDescriptor::optional("pipeline_url", "Pipeline URL", FieldKind::String),
        FieldDescriptor::required(
            "data_processes",
            "Data processes",
            FieldKind::List(&DATA_PROCESS_KIND),
        ),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
    ],
};

/// Description of a processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineProcess {
    pub person: String,
    pub pipeline_version: Option<String>,
    pub pipeline_url: Option<String>,
    pub data_processes: Vec<DataProcess>,
    pub notes: Option<String>,
}

impl Record for PipelineProcess {
    const SCHEMA: &'static RecordSchema = &PIPELINE_PROCESS;
}

pub static ANALYSIS_PROCESS: RecordSchema = RecordSchema {
    id: "analysis_process",
    version: SchemaVersion::new(0, 1, 0),
    title: "Analysis process",
    description: "Description of an analysis",
    fields: &[
        FieldDescriptor::required("person", "Person", FieldKind::String)
            .described("Name of person responsible for analysis"),
        FieldDescriptor::required(
            "data_processes",
            "Data processes",
            FieldKind::List(&DATA_PROCESS_KIND),
        ),
        FieldDescriptor::optional("description", "Description", FieldKind::String),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
    ],
};

/// Description of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisProcess {
    pub person: String,
    pub data_processes: Vec<DataProcess>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl Record for AnalysisProcess {
    const SCHEMA: &'static RecordSchema = &ANALYSIS_PROCESS;
}

pub static PROCESSING: RecordSchema = RecordSchema {
    id: "processing",
    version: SchemaVersion::new(0, 2, 5),
    title: "Processing",
    description: "Description of all processes run on data",
    fields: &[
        FieldDescriptor::required(
            "processing_pipeline",
            "Processing pipeline",
            FieldKind::Record(&PIPELINE_PROCESS),
        )
        .described("Pipeline used to process data"),
        FieldDescriptor::optional("analysis", "Analysis", FieldKind::Record(&ANALYSIS_PROCESS))
            .described("Analysis steps taken after processing"),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
    ],
};

/// Description of all processes run on data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Processing {
    pub processing_pipeline: PipelineProcess,
    pub analysis: Option<AnalysisProcess>,
    pub notes: Option<String>,
}

impl Record for Processing {
    const SCHEMA: &'static RecordSchema = &PROCESSING;
}

impl CoreRecord for Processing {}
