//! models::stimulus
//!
//! Session stimulus descriptions.

use serde::{Deserialize, Serialize};

use super::units::{
    ConcentrationUnit, FrequencyUnit, PowerUnit, TimeUnit, VolumeUnit, CONCENTRATION_UNIT,
    FREQUENCY_UNIT, POWER_UNIT, TIME_UNIT, VOLUME_UNIT,
};
use crate::core::schema::{
    DefaultValue, FieldDescriptor, FieldKind, NumericBounds, Params, Record, RecordSchema, TEXT,
};
use crate::core::types::{SchemaVersion, UtcTimestamp};
use crate::define_vocabulary;

define_vocabulary! {
    /// Types of stimulus modalities
    pub enum StimulusModality as STIMULUS_MODALITY {
        Auditory = "AUDITORY" => "Auditory",
        Olfactory = "OLFACTORY" => "Olfactory",
        Optogenetics = "OPTOGENETICS" => "Optogenetics",
        NoStimulus = "NONE" => "None",
        VirtualReality = "VIRTUAL_REALITY" => "Virtual reality",
        Visual = "VISUAL" => "Visual",
        WheelFriction = "WHEEL_FRICTION" => "Wheel friction",
    }
}

define_vocabulary! {
    /// Opto stimulation pulse shapes
    pub enum PulseShape as PULSE_SHAPE {
        Square = "SQUARE" => "Square",
        Ramp = "RAMP" => "Ramp",
        Sine = "SINE" => "Sinusoidal",
    }
}

define_vocabulary! {
    /// Bandpass filters for auditory stimuli
    pub enum FilterType as FILTER_TYPE {
        Butterworth = "BUTTERWORTH" => "Butterworth",
        Other = "OTHER" => "Other",
    }
}

const INTEGER: FieldKind = FieldKind::Integer(NumericBounds::NONE);
const DECIMAL: FieldKind = FieldKind::Number(NumericBounds::NONE);

const fn time_unit(name: &'static str, title: &'static str) -> FieldDescriptor {
    FieldDescriptor::defaulted(name, title, FieldKind::Enum(&TIME_UNIT), DefaultValue::Str("second"))
}

const fn notes() -> FieldDescriptor {
    FieldDescriptor::optional("notes", "Notes", FieldKind::String)
}

pub static SOFTWARE: RecordSchema = RecordSchema {
    id: "software",
    version: SchemaVersion::new(0, 1, 0),
    title: "Software",
    description: "Description of generic software",
    fields: &[
        FieldDescriptor::required("name", "Software name", FieldKind::String),
        FieldDescriptor::required("version", "Software version", FieldKind::String),
        FieldDescriptor::optional("url", "URL to commit being used", FieldKind::String),
        FieldDescriptor::defaulted(
            "parameters",
            "Software parameters",
            FieldKind::Params,
            DefaultValue::EmptyParams,
        ),
    ],
};

/// Description of generic software.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Software {
    pub name: String,
    pub version: String,
    pub url: Option<String>,
    pub parameters: Params,
}

impl Record for Software {
    const SCHEMA: &'static RecordSchema = &SOFTWARE;
}

pub static OPTO_STIMULATION: RecordSchema = RecordSchema {
    id: "opto_stimulation",
    version: SchemaVersion::new(0, 1, 0),
    title: "Opto stimulation",
    description: "Description of opto stimulation parameters",
    fields: &[
        FieldDescriptor::required("stimulus_name", "Stimulus name", FieldKind::String),
        FieldDescriptor::required("pulse_shape", "Pulse shape", FieldKind::Enum(&PULSE_SHAPE)),
        FieldDescriptor::required("pulse_frequency", "Pulse frequency (Hz)", INTEGER),
        FieldDescriptor::defaulted(
            "pulse_frequency_unit",
            "Pulse frequency unit",
            FieldKind::Enum(&FREQUENCY_UNIT),
            DefaultValue::Str("hertz"),
        ),
        FieldDescriptor::required("number_pulse_trains", "Number of pulse trains", INTEGER),
        FieldDescriptor::required("pulse_width", "Pulse width (ms)", INTEGER),
        FieldDescriptor::defaulted(
            "pulse_width_unit",
            "Pulse width unit",
            FieldKind::Enum(&TIME_UNIT),
            DefaultValue::Str("millisecond"),
        ),
        FieldDescriptor::required("pulse_train_duration", "Pulse train duration (s)", DECIMAL),
        time_unit("pulse_train_duration_unit", "Pulse train duration unit"),
        FieldDescriptor::required(
            "fixed_pulse_train_interval",
            "Fixed pulse train interval",
            FieldKind::Bool,
        ),
        FieldDescriptor::optional("pulse_train_interval", "Pulse train interval (s)", DECIMAL)
            .described("Time between pulse trains"),
        time_unit("pulse_train_interval_unit", "Pulse train interval unit"),
        FieldDescriptor::required("baseline_duration", "Baseline duration (s)", DECIMAL)
            .described("Duration of baseline recording prior to first pulse train"),
        time_unit("baseline_duration_unit", "Baseline duration unit"),
        FieldDescriptor::defaulted(
            "other_parameters",
            "Other parameters",
            FieldKind::Params,
            DefaultValue::EmptyParams,
        ),
        notes(),
    ],
};

/// Description of opto stimulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptoStimulation {
    pub stimulus_name: String,
    pub pulse_shape: PulseShape,
    pub pulse_frequency: i64,
    pub pulse_frequency_unit: FrequencyUnit,
    pub number_pulse_trains: i64,
    pub pulse_width: i64,
    pub pulse_width_unit: TimeUnit,
    pub pulse_train_duration: f64,
    pub pulse_train_duration_unit: TimeUnit,
    pub fixed_pulse_train_interval: bool,
    pub pulse_train_interval: Option<f64>,
    pub pulse_train_interval_unit: TimeUnit,
    pub baseline_duration: f64,
    pub baseline_duration_unit: TimeUnit,
    pub other_parameters: Params,
    pub notes: Option<String>,
}

impl Record for OptoStimulation {
    const SCHEMA: &'static RecordSchema = &OPTO_STIMULATION;
}

pub static VISUAL_STIMULATION: RecordSchema = RecordSchema {
    id: "visual_stimulation",
    version: SchemaVersion::new(0, 1, 0),
    title: "Visual stimulation",
    description: "High level description of visual stimulus parameters",
    fields: &[
        FieldDescriptor::required("stimulus_name", "Stimulus name", FieldKind::String),
        FieldDescriptor::defaulted(
            "stimulus_parameters",
            "Stimulus parameters",
            FieldKind::Params,
            DefaultValue::EmptyParams,
        )
        .described("Parameter values used (e.g. all TF or orientation values)"),
        FieldDescriptor::defaulted(
            "stimulus_template_name",
            "Stimulus template name",
            FieldKind::List(&TEXT),
            DefaultValue::EmptyList,
        )
        .described("Name of image set or movie displayed"),
        notes(),
    ],
};

/// High level description of visual stimulus parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualStimulation {
    pub stimulus_name: String,
    pub stimulus_parameters: Params,
    pub stimulus_template_name: Vec<String>,
    pub notes: Option<String>,
}

impl Record for VisualStimulation {
    const SCHEMA: &'static RecordSchema = &VISUAL_STIMULATION;
}

pub static PHOTO_STIMULATION_GROUP: RecordSchema = RecordSchema {
    id: "photo_stimulation_group",
    version: SchemaVersion::new(0, 1, 0),
    title: "Photostimulation group",
    description: "Description of a photostimulation group",
    fields: &[
        FieldDescriptor::required("group_index", "Group index", INTEGER),
        FieldDescriptor::required("number_of_neurons", "Number of neurons", INTEGER),
        FieldDescriptor::required(
            "stimulation_laser_power",
            "Stimulation laser power (mW)",
            DECIMAL,
        ),
        FieldDescriptor::defaulted(
            "stimulation_laser_power_unit",
            "Stimulation laser power unit",
            FieldKind::Enum(&POWER_UNIT),
            DefaultValue::Str("milliwatt"),
        ),
        FieldDescriptor::required("number_trials", "Number of trials", INTEGER),
        FieldDescriptor::required("number_spirals", "Number of spirals", INTEGER),
        FieldDescriptor::required("spiral_duration", "Spiral duration (s)", DECIMAL),
        time_unit("spiral_duration_unit", "Spiral duration unit"),
        FieldDescriptor::required("inter_spiral_interval", "Inter spiral interval (s)", DECIMAL),
        time_unit("inter_spiral_interval_unit", "Inter spiral interval unit"),
        FieldDescriptor::defaulted(
            "other_parameters",
            "Other parameters",
            FieldKind::Params,
            DefaultValue::EmptyParams,
        ),
        notes(),
    ],
};

/// Description of a photostimulation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhotoStimulationGroup {
    pub group_index: i64,
    pub number_of_neurons: i64,
    pub stimulation_laser_power: f64,
    pub stimulation_laser_power_unit: PowerUnit,
    pub number_trials: i64,
    pub number_spirals: i64,
    pub spiral_duration: f64,
    pub spiral_duration_unit: TimeUnit,
    pub inter_spiral_interval: f64,
    pub inter_spiral_interval_unit: TimeUnit,
    pub other_parameters: Params,
    pub notes: Option<String>,
}

impl Record for PhotoStimulationGroup {
    const SCHEMA: &'static RecordSchema = &PHOTO_STIMULATION_GROUP;
}

static GROUP_KIND: FieldKind = FieldKind::Record(&PHOTO_STIMULATION_GROUP);

pub static PHOTO_STIMULATION: RecordSchema = RecordSchema {
    id: "photo_stimulation",
    version: SchemaVersion::new(0, 1, 0),
    title: "Photostimulation",
    description: "Description of a photostimulation session",
    fields: &[
        FieldDescriptor::required("stimulus_name", "Stimulus name", FieldKind::String),
        FieldDescriptor::required("number_groups", "Number of groups", INTEGER),
        FieldDescriptor::required("groups", "Groups", FieldKind::List(&GROUP_KIND)),
        FieldDescriptor::required("inter_trial_interval", "Inter trial interval (s)", DECIMAL),
        time_unit("inter_trial_interval_unit", "Inter trial interval unit"),
        FieldDescriptor::defaulted(
            "other_parameters",
            "Other parameters",
            FieldKind::Params,
            DefaultValue::EmptyParams,
        ),
        notes(),
    ],
};

/// Description of a photostimulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhotoStimulation {
    pub stimulus_name: String,
    pub number_groups: i64,
    pub groups: Vec<PhotoStimulationGroup>,
    pub inter_trial_interval: f64,
    pub inter_trial_interval_unit: TimeUnit,
    pub other_parameters: Params,
    pub notes: Option<String>,
}

impl Record for PhotoStimulation {
    const SCHEMA: &'static RecordSchema = &PHOTO_STIMULATION;
}

pub static OLFACTOMETER_CHANNEL_CONFIG: RecordSchema = RecordSchema {
    id: "olfactometer_channel_config",
    version: SchemaVersion::new(0, 1, 0),
    title: "Olfactometer channel configuration",
    description: "Description of olfactometer channel configurations",
    fields: &[
        FieldDescriptor::required("channel_index", "Channel index", INTEGER),
        FieldDescriptor::required("odorant", "Odorant", FieldKind::String),
        FieldDescriptor::required("odorant_dilution", "Odorant dilution", DECIMAL),
        FieldDescriptor::defaulted(
            "odorant_dilution_unit",
            "Dilution unit",
            FieldKind::Enum(&CONCENTRATION_UNIT),
            DefaultValue::Str("% volume"),
        ),
        notes(),
    ],
};

/// Description of olfactometer channel configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OlfactometerChannelConfig {
    pub channel_index: i64,
    pub odorant: String,
    pub odorant_dilution: f64,
    pub odorant_dilution_unit: ConcentrationUnit,
    pub notes: Option<String>,
}

impl Record for OlfactometerChannelConfig {
    const SCHEMA: &'static RecordSchema = &OLFACTOMETER_CHANNEL_CONFIG;
}

static OLFACTOMETER_CHANNEL_KIND: FieldKind = FieldKind::Record(&OLFACTOMETER_CHANNEL_CONFIG);

pub static OLFACTORY_STIMULATION: RecordSchema = RecordSchema {
    id: "olfactory_stimulation",
    version: SchemaVersion::new(0, 1, 0),
    title: "Olfactory stimulation",
    description: "Description of an olfactory stimulus",
    fields: &[
        FieldDescriptor::required(
            "channels",
            "Channels",
            FieldKind::List(&OLFACTOMETER_CHANNEL_KIND),
        ),
        notes(),
    ],
};

/// Description of an olfactory stimulus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OlfactoryStimulation {
    pub channels: Vec<OlfactometerChannelConfig>,
    pub notes: Option<String>,
}

impl Record for OlfactoryStimulation {
    const SCHEMA: &'static RecordSchema = &OLFACTORY_STIMULATION;
}

pub static AUDITORY_STIMULATION: RecordSchema = RecordSchema {
    id: "auditory_stimulation",
    version: SchemaVersion::new(0, 1, 0),
    title: "Auditory stimulation",
    description: "Description of an auditory stimulus",
    fields: &[
        FieldDescriptor::required("sample_frequency", "Sample frequency", DECIMAL),
        FieldDescriptor::optional(
            "amplitude_modulation_frequency",
            "Amplitude modulation frequency",
            INTEGER,
        ),
        FieldDescriptor::defaulted(
            "frequency_unit",
            "Tone frequency unit",
            FieldKind::Enum(&FREQUENCY_UNIT),
            DefaultValue::Str("hertz"),
        ),
        FieldDescriptor::optional("bandpass_low_frequency", "Bandpass low frequency", DECIMAL),
        FieldDescriptor::optional("bandpass_high_frequency", "Bandpass high frequency", DECIMAL),
        FieldDescriptor::optional(
            "bandpass_filter_type",
            "Bandpass filter type",
            FieldKind::Enum(&FILTER_TYPE),
        ),
        FieldDescriptor::optional("bandpass_order", "Bandpass order", INTEGER),
        notes(),
    ],
};

/// Description of an auditory stimulus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditoryStimulation {
    pub sample_frequency: f64,
    pub amplitude_modulation_frequency: Option<i64>,
    pub frequency_unit: FrequencyUnit,
    pub bandpass_low_frequency: Option<f64>,
    pub bandpass_high_frequency: Option<f64>,
    pub bandpass_filter_type: Option<FilterType>,
    pub bandpass_order: Option<i64>,
    pub notes: Option<String>,
}

impl Record for AuditoryStimulation {
    const SCHEMA: &'static RecordSchema = &AUDITORY_STIMULATION;
}

static SOFTWARE_KIND: FieldKind = FieldKind::Record(&SOFTWARE);
static MODALITY_KIND: FieldKind = FieldKind::Enum(&STIMULUS_MODALITY);

pub static STIMULUS_EPOCH: RecordSchema = RecordSchema {
    id: "stimulus_epoch",
    version: SchemaVersion::new(0, 1, 0),
    title: "Stimulus epoch",
    description: "Description of stimulus used during session",
    fields: &[
        FieldDescriptor::required("stimulus_start_time", "Stimulus start time", FieldKind::Timestamp)
            .described("When a specific stimulus begins"),
        FieldDescriptor::required("stimulus_end_time", "Stimulus end time", FieldKind::Timestamp)
            .described("When a specific stimulus ends"),
        FieldDescriptor::required("stimulus_name", "Stimulus name", FieldKind::String),
        FieldDescriptor::required("session_number", "Session number", INTEGER),
        FieldDescriptor::required("software", "Software", FieldKind::List(&SOFTWARE_KIND))
            .described("The software used to control the behavior/stimulus (e.g. Bonsai)"),
        FieldDescriptor::required("script", "Script", FieldKind::Record(&SOFTWARE))
            .described("URL to the commit of the script and the parameters used"),
        FieldDescriptor::required(
            "stimulus_modalities",
            "Stimulus modalities",
            FieldKind::List(&MODALITY_KIND),
        ),
        FieldDescriptor::optional(
            "olfactory_stimulus",
            "Olfactory stimulus",
            FieldKind::Record(&OLFACTORY_STIMULATION),
        ),
        FieldDescriptor::optional(
            "visual_stimulus",
            "Visual stimulus",
            FieldKind::Record(&VISUAL_STIMULATION),
        ),
        FieldDescriptor::optional(
            "opto_stimulus",
            "Optogenetic stimulus",
            FieldKind::Record(&OPTO_STIMULATION),
        ),
        FieldDescriptor::optional(
            "auditory_stimulus",
            "Auditory stimulus",
            FieldKind::Record(&AUDITORY_STIMULATION),
        ),
        FieldDescriptor::required("output_parameters", "Performance parameters", FieldKind::Params)
            .described("Performance metrics from session"),
        FieldDescriptor::required(
            "reward_consumed_during_epoch",
            "Reward consumed during training (uL)",
            DECIMAL,
        ),
        FieldDescriptor::defaulted(
            "reward_consumed_unit",
            "Reward consumed unit",
            FieldKind::Enum(&VOLUME_UNIT),
            DefaultValue::Str("microliter"),
        ),
        FieldDescriptor::optional("trials_total", "Total trials", INTEGER),
        FieldDescriptor::optional("trials_finished", "Finished trials", INTEGER),
        FieldDescriptor::optional("trials_rewarded", "Rewarded trials", INTEGER),
        notes(),
    ],
};

/// Description of stimulus used during session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StimulusEpoch {
    pub stimulus_start_time: UtcTimestamp,
    pub stimulus_end_time: UtcTimestamp,
    pub stimulus_name: String,
    pub session_number: i64,
    pub software: Vec<Software>,
    pub script: Software,
    pub stimulus_modalities: Vec<StimulusModality>,
    pub olfactory_stimulus: Option<OlfactoryStimulation>,
    pub visual_stimulus: Option<VisualStimulation>,
    pub opto_stimulus: Option<OptoStimulation>,
    pub auditory_stimulus: Option<AuditoryStimulation>,
    pub output_parameters: Params,
    pub reward_consumed_during_epoch: f64,
    pub reward_consumed_unit: VolumeUnit,
    pub trials_total: Option<i64>,
    pub trials_finished: Option<i64>,
    pub trials_rewarded: Option<i64>,
    pub notes: Option<String>,
}

impl Record for StimulusEpoch {
    const SCHEMA: &'static RecordSchema = &STIMULUS_EPOCH;
}
