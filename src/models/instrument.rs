//! models::instrument
//!
//! Imaging instrument configuration.
//!
//! [`Instrument`] is a top-level record written to its own file. Every
//! hardware component record starts with the same four fields
//! (`manufacturer`, `model`, `serial_number`, `notes`) followed by its own.

use serde::{Deserialize, Serialize};

use super::device::{Manufacturer, MANUFACTURER};
use super::units::{PowerUnit, SizeUnit, POWER_UNIT, SIZE_UNIT};
use crate::core::schema::{
    Bound, CoreRecord, DefaultValue, FieldDescriptor, FieldKind, NumericBounds, Record,
    RecordSchema,
};
use crate::core::types::{SchemaVersion, UtcTimestamp};
use crate::define_vocabulary;

define_vocabulary! {
    /// Instrument type name
    pub enum InstrumentType as INSTRUMENT_TYPE {
        DiSpim = "DISPIM" => "diSPIM",
        ExaSpim = "EXASPIM" => "exaSPIM",
        MesoSpim = "MESOSPIM" => "mesoSPIM",
        SmartSpim = "SMARTSPIM" => "SmartSPIM",
        Other = "OTHER" => "Other",
    }
}

define_vocabulary! {
    /// Objective immersion media
    pub enum Immersion as IMMERSION {
        Air = "AIR" => "air",
        Multi = "MULTI" => "multi",
        Oil = "OIL" => "oil",
        Water = "WATER" => "water",
        Other = "OTHER" => "other",
    }
}

define_vocabulary! {
    /// Detector type name
    pub enum DetectorType as DETECTOR_TYPE {
        Camera = "CAMERA" => "Camera",
        Pmt = "PMT" => "Photomultiplier tube",
        Other = "OTHER" => "Other",
    }
}

define_vocabulary! {
    /// Detector data interface
    pub enum DataInterface as DATA_INTERFACE {
        Usb = "USB" => "USB",
        Pcie = "PCIE" => "PCIe",
        Coax = "COAX" => "Coax",
        Ethernet = "ETH" => "Ethernet",
        Other = "OTHER" => "Other",
    }
}

define_vocabulary! {
    /// Cooling medium
    pub enum Cooling as COOLING {
        Air = "AIR" => "air",
        Water = "WATER" => "water",
    }
}

define_vocabulary! {
    /// Light source type
    pub enum LightsourceType as LIGHTSOURCE_TYPE {
        Laser = "LASER" => "laser",
        Led = "LED" => "LED",
    }
}

define_vocabulary! {
    /// Light source coupling
    pub enum Coupling as COUPLING {
        SingleModeFiber = "SMF" => "Single-mode fiber",
        MultiModeFiber = "MMF" => "Multi-mode fiber",
        FreeSpace = "FREE_SPACE" => "Free-space",
    }
}

define_vocabulary! {
    /// Direction of motion of a scanning stage
    pub enum StageAxisDirection as STAGE_AXIS_DIRECTION {
        Detection = "DETECTION_AXIS" => "Detection axis",
        Illumination = "ILLUMINATION_AXIS" => "Illumination axis",
        Perpendicular = "PERPENDICULAR_AXIS" => "Perpendicular axis",
    }
}

define_vocabulary! {
    /// Name of a stage axis
    pub enum StageAxisName as STAGE_AXIS_NAME {
        X = "X" => "X",
        Y = "Y" => "Y",
        Z = "Z" => "Z",
    }
}

define_vocabulary! {
    /// Optical filter type
    pub enum OpticalFilterType as OPTICAL_FILTER_TYPE {
        BandPass = "BAND_PASS" => "Band pass",
        ShortPass = "SHORT_PASS" => "Short pass",
        LongPass = "LONG_PASS" => "Long pass",
        Multiband = "MULTIBAND" => "Multiband",
        Notch = "NOTCH" => "Notch",
        Other = "OTHER" => "Other",
    }
}

define_vocabulary! {
    /// Type of an additional imaging device
    pub enum ImagingDeviceType as IMAGING_DEVICE_TYPE {
        BeamExpander = "BEAM_EXPANDER" => "Beam expander",
        SampleChamber = "SAMPLE_CHAMBER" => "Sample Chamber",
        Diffuser = "DIFFUSER" => "Diffuser",
        Galvo = "GALVO" => "Galvo",
        LaserCombiner = "LASER_COMBINER" => "Laser combiner",
        LaserCoupler = "LASER_COUPLER" => "Laser coupler",
        Prism = "PRISM" => "Prism",
        Objective = "OBJECTIVE" => "Objective",
        Slit = "SLIT" => "Slit",
        TunableLens = "TUNABLE_LENS" => "Tunable lens",
        Other = "OTHER" => "Other",
    }
}

macro_rules! hardware_fields {
    ($($extra:expr),* $(,)?) => {
        &[
            FieldDescriptor::required("manufacturer", "Manufacturer", FieldKind::Enum(&MANUFACTURER)),
            FieldDescriptor::optional("model", "Model", FieldKind::String),
            FieldDescriptor::optional("serial_number", "Serial number", FieldKind::String),
            FieldDescriptor::optional("notes", "Notes", FieldKind::String),
            $($extra),*
        ]
    };
}

macro_rules! hardware_schema {
    ($id:literal, $title:literal, $description:literal, [$($extra:expr),* $(,)?]) => {
        RecordSchema {
            id: $id,
            version: SchemaVersion::new(0, 1, 0),
            title: $title,
            description: $description,
            fields: hardware_fields!($($extra),*),
        }
    };
}

pub static OBJECTIVE: RecordSchema = hardware_schema!(
    "objective",
    "Objective",
    "Description of an objective device",
    [
        FieldDescriptor::required(
            "numerical_aperture",
            "Numerical aperture (in air)",
            FieldKind::Number(NumericBounds::new(
                Some(Bound::Exclusive(0.0)),
                Some(Bound::Inclusive(2.0)),
            )),
        ),
        FieldDescriptor::required(
            "magnification",
            "Magnification",
            FieldKind::Number(NumericBounds::greater_than(0.0)),
        ),
        FieldDescriptor::required("immersion", "Immersion", FieldKind::Enum(&IMMERSION)),
    ]
);

/// Description of an objective device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Objective {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub numerical_aperture: f64,
    pub magnification: f64,
    pub immersion: Immersion,
}

impl Record for Objective {
    const SCHEMA: &'static RecordSchema = &OBJECTIVE;
}

pub static DETECTOR: RecordSchema = hardware_schema!(
    "detector",
    "Detector",
    "Description of a detector device",
    [
        FieldDescriptor::required("type", "Detector type", FieldKind::Enum(&DETECTOR_TYPE)),
        FieldDescriptor::required(
            "data_interface",
            "Data interface",
            FieldKind::Enum(&DATA_INTERFACE),
        ),
        FieldDescriptor::required("cooling", "Cooling", FieldKind::Enum(&COOLING)),
    ]
);

/// Description of a detector device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Detector {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub detector_type: DetectorType,
    pub data_interface: DataInterface,
    pub cooling: Cooling,
}

impl Record for Detector {
    const SCHEMA: &'static RecordSchema = &DETECTOR;
}

pub static LIGHTSOURCE: RecordSchema = hardware_schema!(
    "lightsource",
    "Light source",
    "Description of a light source device",
    [
        FieldDescriptor::optional("name", "Light source name", FieldKind::String),
        FieldDescriptor::required(
            "type",
            "Light source type",
            FieldKind::Enum(&LIGHTSOURCE_TYPE),
        ),
        FieldDescriptor::required("coupling", "Coupling", FieldKind::Enum(&COUPLING)),
        FieldDescriptor::required(
            "wavelength",
            "Wavelength",
            FieldKind::Integer(NumericBounds::between(300.0, 1000.0)),
        ),
        FieldDescriptor::defaulted(
            "wavelength_unit",
            "Wavelength unit",
            FieldKind::Enum(&SIZE_UNIT),
            DefaultValue::Str("nanometer"),
        ),
        FieldDescriptor::required(
            "max_power",
            "Maximum power",
            FieldKind::Number(NumericBounds::at_least(0.0)),
        ),
        FieldDescriptor::defaulted(
            "power_unit",
            "Power unit",
            FieldKind::Enum(&POWER_UNIT),
            DefaultValue::Str("milliwatt"),
        ),
    ]
);

/// Description of a light source device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lightsource {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub lightsource_type: LightsourceType,
    pub coupling: Coupling,
    pub wavelength: i64,
    pub wavelength_unit: SizeUnit,
    pub max_power: f64,
    pub power_unit: PowerUnit,
}

impl Record for Lightsource {
    const SCHEMA: &'static RecordSchema = &LIGHTSOURCE;
}

pub static MOTORIZED_STAGE: RecordSchema = hardware_schema!(
    "motorized_stage",
    "Motorized stage",
    "Description of a motorized stage",
    [
        FieldDescriptor::required("travel", "Travel of device", FieldKind::Number(NumericBounds::NONE)),
        FieldDescriptor::defaulted(
            "travel_unit",
            "Travel unit",
            FieldKind::Enum(&SIZE_UNIT),
            DefaultValue::Str("millimeter"),
        ),
    ]
);

/// Description of a motorized stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorizedStage {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub travel: f64,
    pub travel_unit: SizeUnit,
}

impl Record for MotorizedStage {
    const SCHEMA: &'static RecordSchema = &MOTORIZED_STAGE;
}

pub static SCANNING_STAGE: RecordSchema = hardware_schema!(
    "scanning_stage",
    "Scanning stage",
    "Description of a scanning motorized stage",
    [
        FieldDescriptor::required("travel", "Travel of device", FieldKind::Number(NumericBounds::NONE)),
        FieldDescriptor::defaulted(
            "travel_unit",
            "Travel unit",
            FieldKind::Enum(&SIZE_UNIT),
            DefaultValue::Str("millimeter"),
        ),
        FieldDescriptor::required(
            "stage_axis_direction",
            "Direction of stage axis",
            FieldKind::Enum(&STAGE_AXIS_DIRECTION),
        ),
        FieldDescriptor::required(
            "stage_axis_name",
            "Name of stage axis",
            FieldKind::Enum(&STAGE_AXIS_NAME),
        ),
    ]
);

/// Description of a scanning motorized stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanningStage {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub travel: f64,
    pub travel_unit: SizeUnit,
    pub stage_axis_direction: StageAxisDirection,
    pub stage_axis_name: StageAxisName,
}

impl Record for ScanningStage {
    const SCHEMA: &'static RecordSchema = &SCANNING_STAGE;
}

pub static OPTICAL_TABLE: RecordSchema = hardware_schema!(
    "optical_table",
    "Optical table",
    "Description of an optical table",
    [
        FieldDescriptor::optional("length", "Length", FieldKind::Number(NumericBounds::NONE)),
        FieldDescriptor::optional("width", "Width", FieldKind::Number(NumericBounds::NONE)),
        FieldDescriptor::defaulted(
            "table_size_unit",
            "Table size unit",
            FieldKind::Enum(&SIZE_UNIT),
            DefaultValue::Str("inch"),
        ),
        FieldDescriptor::optional("vibration_control", "Vibration control", FieldKind::Bool),
    ]
);

/// Description of an optical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpticalTable {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub table_size_unit: SizeUnit,
    pub vibration_control: Option<bool>,
}

impl Record for OpticalTable {
    const SCHEMA: &'static RecordSchema = &OPTICAL_TABLE;
}

pub static COM: RecordSchema = RecordSchema {
    id: "com",
    version: SchemaVersion::new(0, 1, 0),
    title: "COM port",
    description: "Description of a communication port",
    fields: &[
        FieldDescriptor::required("hardware_name", "Controlled hardware device", FieldKind::String),
        FieldDescriptor::required("com_port", "COM port", FieldKind::String),
    ],
};

/// Description of a communication port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Com {
    pub hardware_name: String,
    pub com_port: String,
}

impl Record for Com {
    const SCHEMA: &'static RecordSchema = &COM;
}

pub static FILTER: RecordSchema = hardware_schema!(
    "filter",
    "Filter",
    "Description of a filter",
    [
        FieldDescriptor::optional("name", "Filter name", FieldKind::String),
        FieldDescriptor::required(
            "filter_type",
            "Type of filter",
            FieldKind::Enum(&OPTICAL_FILTER_TYPE),
        ),
        FieldDescriptor::required(
            "diameter",
            "Diameter",
            FieldKind::Number(NumericBounds::at_least(0.0)),
        ),
        FieldDescriptor::optional(
            "thickness",
            "Thickness",
            FieldKind::Number(NumericBounds::at_least(0.0)),
        ),
        FieldDescriptor::defaulted(
            "size_unit",
            "Size unit",
            FieldKind::Enum(&SIZE_UNIT),
            DefaultValue::Str("millimeter"),
        ),
        FieldDescriptor::optional(
            "filter_wheel_index",
            "Filter wheel index",
            FieldKind::Integer(NumericBounds::NONE),
        ),
    ]
);

/// Description of a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub name: Option<String>,
    pub filter_type: OpticalFilterType,
    pub diameter: f64,
    pub thickness: Option<f64>,
    pub size_unit: SizeUnit,
    pub filter_wheel_index: Option<i64>,
}

impl Record for Filter {
    const SCHEMA: &'static RecordSchema = &FILTER;
}

pub static ADDITIONAL_IMAGING_DEVICE: RecordSchema = hardware_schema!(
    "additional_imaging_device",
    "Additional imaging device",
    "Description of an additional imaging device",
    [FieldDescriptor::required(
        "type",
        "Device type",
        FieldKind::Enum(&IMAGING_DEVICE_TYPE)
    )]
);

/// Description of an additional imaging device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdditionalImagingDevice {
    pub manufacturer: Manufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub device_type: ImagingDeviceType,
}

impl Record for AdditionalImagingDevice {
    const SCHEMA: &'static RecordSchema = &ADDITIONAL_IMAGING_DEVICE;
}

static OBJECTIVE_KIND: FieldKind = FieldKind::Record(&OBJECTIVE);
static DETECTOR_KIND: FieldKind = FieldKind::Record(&DETECTOR);
static LIGHTSOURCE_KIND: FieldKind = FieldKind::Record(&LIGHTSOURCE);
static MOTORIZED_STAGE_KIND: FieldKind = FieldKind::Record(&MOTORIZED_STAGE);
static SCANNING_STAGE_KIND: FieldKind = FieldKind::Record(&SCANNING_STAGE);
static OPTICAL_TABLE_KIND: FieldKind = FieldKind::Record(&OPTICAL_TABLE);
static COM_KIND: FieldKind = FieldKind::Record(&COM);
static FILTER_KIND: FieldKind = FieldKind::Record(&FILTER);
static ADDITIONAL_DEVICE_KIND: FieldKind = FieldKind::Record(&ADDITIONAL_IMAGING_DEVICE);

pub static INSTRUMENT: RecordSchema = RecordSchema {
    id: "instrument",
    version: SchemaVersion::new(0, 5, 4),
    title: "Instrument",
    description: "Description of an instrument, which is a collection of devices",
    fields: &[
        FieldDescriptor::required("instrument_id", "Instrument ID", FieldKind::String)
            .described("Unique identifier for this instrument configuration"),
        FieldDescriptor::required(
            "instrument_type",
            "Instrument type",
            FieldKind::Enum(&INSTRUMENT_TYPE),
        ),
        FieldDescriptor::required(
            "manufacturer",
            "Instrument manufacturer",
            FieldKind::Enum(&MANUFACTURER),
        ),
        FieldDescriptor::defaulted(
            "modification_date",
            "Date of modification",
            FieldKind::Timestamp,
            DefaultValue::Now,
        ),
        FieldDescriptor::optional("temperature_control", "Temperature control", FieldKind::Bool),
        FieldDescriptor::optional("humidity_control", "Humidity control", FieldKind::Bool),
        FieldDescriptor::defaulted(
            "optical_tables",
            "Optical table",
            FieldKind::List(&OPTICAL_TABLE_KIND),
            DefaultValue::EmptyList,
        ),
        FieldDescriptor::required(
            "objectives",
            "Objectives",
            FieldKind::List(&OBJECTIVE_KIND),
        ),
        FieldDescriptor::required("detectors", "Detectors", FieldKind::List(&DETECTOR_KIND)),
        FieldDescriptor::required(
            "light_sources",
            "Light sources",
            FieldKind::List(&LIGHTSOURCE_KIND),
        ),
        FieldDescriptor::defaulted(
            "fluorescence_filters",
            "Fluorescence filters",
            FieldKind::List(&FILTER_KIND),
            DefaultValue::EmptyList,
        ),
        FieldDescriptor::defaulted(
            "motorized_stages",
            "Motorized stages",
            FieldKind::List(&MOTORIZED_STAGE_KIND),
            DefaultValue::EmptyList,
        ),
        FieldDescriptor::defaulted(
            "scanning_stages",
            "Scanning motorized stages",
            FieldKind::List(&SCANNING_STAGE_KIND),
            DefaultValue::EmptyList,
        ),
        FieldDescriptor::defaulted(
            "additional_devices",
            "Additional devices",
            FieldKind::List(&ADDITIONAL_DEVICE_KIND),
            DefaultValue::EmptyList,
        ),
        FieldDescriptor::optional("calibration_date", "Date of calibration", FieldKind::Timestamp)
            .described("Date of most recent calibration"),
        FieldDescriptor::optional("calibration_data", "Calibration data", FieldKind::String)
            .described("Path to calibration data from most recent calibration"),
        FieldDescriptor::defaulted(
            "com_ports",
            "COM ports",
            FieldKind::List(&COM_KIND),
            DefaultValue::EmptyList,
        ),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
    ],
};

/// Description of an instrument, which is a collection of devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Instrument {
    pub instrument_id: String,
    pub instrument_type: InstrumentType,
    pub manufacturer: Manufacturer,
    pub modification_date: UtcTimestamp,
    pub temperature_control: Option<bool>,
    pub humidity_control: Option<bool>,
    pub optical_tables: Vec<OpticalTable>,
    pub objectives: Vec<Objective>,
    pub detectors: Vec<Detector>,
    pub light_sources: Vec<Lightsource>,
    pub fluorescence_filters: Vec<Filter>,
    pub motorized_stages: Vec<MotorizedStage>,
    pub scanning_stages: Vec<ScanningStage>,
    pub additional_devices: Vec<AdditionalImagingDevice>,
    pub calibration_date: Option<UtcTimestamp>,
    pub calibration_data: Option<String>,
    pub com_ports: Vec<Com>,
    pub notes: Option<String>,
}

impl Record for Instrument {
    const SCHEMA: &'static RecordSchema = &INSTRUMENT;
}

impl CoreRecord for Instrument {}
