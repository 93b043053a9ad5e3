//! models::tile
//!
//! Imaging tiles, their channels and coordinate transforms.
//!
//! A tile carries an ordered list of coordinate transforms. Each list
//! element is one of four tagged variants, resolved independently by its
//! `type` field:
//!
//! | tag           | payload field      | length |
//! |---------------|--------------------|--------|
//! | `scale`       | `scale`            | 3      |
//! | `translation` | `translation`      | 3      |
//! | `rotation`    | `rotation`         | 9 (row-major 3x3) |
//! | `affine`      | `affinetransform`  | 12 (top 3x4)      |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::units::{AngleUnit, PowerUnit, SizeUnit, ANGLE_UNIT, POWER_UNIT, SIZE_UNIT};
use crate::core::schema::{
    DefaultValue, FieldDescriptor, FieldKind, IssueKind, NumericBounds, Record, RecordSchema,
    UnionSchema, ValidationError, Validator, NUMBER,
};
use crate::core::types::{FieldPath, SchemaVersion, SystemClock};

pub static CHANNEL: RecordSchema = RecordSchema {
    id: "channel",
    version: SchemaVersion::new(0, 1, 0),
    title: "Channel",
    description: "Description of a channel",
    fields: &[
        FieldDescriptor::required("channel_name", "Channel", FieldKind::String),
        FieldDescriptor::required(
            "laser_wavelength",
            "Wavelength",
            FieldKind::Integer(NumericBounds::between(300.0, 1000.0)),
        ),
        FieldDescriptor::defaulted(
            "laser_wavelength_unit",
            "Laser wavelength unit",
            FieldKind::Enum(&SIZE_UNIT),
            DefaultValue::Str("nanometer"),
        ),
        FieldDescriptor::required(
            "laser_power",
            "Laser power",
            FieldKind::Number(NumericBounds::at_most(2000.0)),
        ),
        FieldDescriptor::defaulted(
            "laser_power_unit",
            "Laser power unit",
            FieldKind::Enum(&POWER_UNIT),
            DefaultValue::Str("milliwatt"),
        ),
        FieldDescriptor::required(
            "filter_wheel_index",
            "Filter wheel index",
            FieldKind::Integer(NumericBounds::NONE),
        ),
    ],
};

/// Description of a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Channel {
    pub channel_name: String,
    pub laser_wavelength: i64,
    pub laser_wavelength_unit: SizeUnit,
    pub laser_power: f64,
    pub laser_power_unit: PowerUnit,
    pub filter_wheel_index: i64,
}

impl Record for Channel {
    const SCHEMA: &'static RecordSchema = &CHANNEL;
}

macro_rules! transform_schema {
    ($id:literal, $tag:literal, $field:literal, $title:literal, $len:literal, $description:literal) => {
        RecordSchema {
            id: $id,
            version: SchemaVersion::new(0, 1, 0),
            title: $title,
            description: $description,
            fields: &[
                FieldDescriptor::defaulted(
                    "type",
                    "Transformation type",
                    FieldKind::Literal($tag),
                    DefaultValue::Str($tag),
                ),
                FieldDescriptor::required(
                    $field,
                    $title,
                    FieldKind::FixedList {
                        element: &NUMBER,
                        len: $len,
                    },
                ),
            ],
        }
    };
}

pub static SCALE_TRANSFORM: RecordSchema = transform_schema!(
    "scale_transform",
    "scale",
    "scale",
    "3D scale parameters",
    3,
    "Values to be vector-multiplied with a 3D position"
);

pub static TRANSLATION_TRANSFORM: RecordSchema = transform_schema!(
    "translation_transform",
    "translation",
    "translation",
    "3D translation parameters",
    3,
    "Values to be vector-added to a 3D position"
);

pub static ROTATION_TRANSFORM: RecordSchema = transform_schema!(
    "rotation_transform",
    "rotation",
    "rotation",
    "3D rotation matrix values (3x3)",
    9,
    "Row-major 3x3 rotation matrix"
);

pub static AFFINE_TRANSFORM: RecordSchema = transform_schema!(
    "affine_transform",
    "affine",
    "affinetransform",
    "Affine transform matrix values (top 3x4 matrix)",
    12,
    "Row-major top 3x4 block of an affine matrix"
);

pub static COORDINATE_TRANSFORM: UnionSchema = UnionSchema {
    name: "coordinate transform",
    discriminator: "type",
    variants: &[
        &SCALE_TRANSFORM,
        &TRANSLATION_TRANSFORM,
        &ROTATION_TRANSFORM,
        &AFFINE_TRANSFORM,
    ],
};

static TRANSFORM_KIND: FieldKind = FieldKind::Union(&COORDINATE_TRANSFORM);

/// One coordinate transform applied to a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoordinateTransform {
    Scale { scale: [f64; 3] },
    Translation { translation: [f64; 3] },
    Rotation { rotation: [f64; 9] },
    Affine {
        #[serde(rename = "affinetransform")]
        affine_transform: [f64; 12],
    },
}

impl CoordinateTransform {
    /// Resolve a transform from its field values.
    ///
    /// The `type` tag selects the variant; without a tag the payload must
    /// match exactly one variant.
    ///
    /// ```
    /// use neurometa::models::tile::CoordinateTransform;
    /// use serde_json::json;
    ///
    /// let rotation = CoordinateTransform::from_fields(json!({
    ///     "type": "rotation",
    ///     "rotation": [1, 0, 0, 0, 1, 0, 0, 0, 1],
    /// }))
    /// .unwrap();
    /// assert_eq!(rotation.tag(), "rotation");
    /// ```
    pub fn from_fields(input: Value) -> Result<Self, ValidationError> {
        let clock = SystemClock;
        let mut validator = Validator::new(&clock);
        let normalized = validator.value(&TRANSFORM_KIND, &input, &FieldPath::root());
        validator.finish(COORDINATE_TRANSFORM.name)?;

        serde_json::from_value(normalized).map_err(|_| {
            ValidationError::single(
                COORDINATE_TRANSFORM.name,
                FieldPath::root(),
                IssueKind::Type {
                    expected: "record",
                    found: "value outside the representable range",
                },
            )
        })
    }

    /// The `type` tag of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            CoordinateTransform::Scale { .. } => "scale",
            CoordinateTransform::Translation { .. } => "translation",
            CoordinateTransform::Rotation { .. } => "rotation",
            CoordinateTransform::Affine { .. } => "affine",
        }
    }

    /// The numeric payload.
    pub fn values(&self) -> &[f64] {
        match self {
            CoordinateTransform::Scale { scale } => scale,
            CoordinateTransform::Translation { translation } => translation,
            CoordinateTransform::Rotation { rotation } => rotation,
            CoordinateTransform::Affine { affine_transform } => affine_transform,
        }
    }
}

macro_rules! tile_fields {
    ($($extra:expr),* $(,)?) => {
        &[
            FieldDescriptor::required(
                "coordinate_transformations",
                "Tile coordinate transformations",
                FieldKind::List(&TRANSFORM_KIND),
            ),
            FieldDescriptor::optional("file_name", "File name", FieldKind::String),
            $($extra),*
        ]
    };
}

pub static TILE: RecordSchema = RecordSchema {
    id: "tile",
    version: SchemaVersion::new(0, 1, 0),
    title: "Tile",
    description: "Description of an image tile",
    fields: tile_fields!(),
};

/// Description of an image tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tile {
    pub coordinate_transformations: Vec<CoordinateTransform>,
    pub file_name: Option<String>,
}

impl Record for Tile {
    const SCHEMA: &'static RecordSchema = &TILE;
}

pub static ACQUISITION_TILE: RecordSchema = RecordSchema {
    id: "acquisition_tile",
    version: SchemaVersion::new(0, 1, 0),
    title: "Acquisition tile",
    description: "Description of acquisition tile",
    fields: tile_fields!(
        FieldDescriptor::required("channel", "Channel", FieldKind::Record(&CHANNEL)),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
        FieldDescriptor::defaulted(
            "imaging_angle",
            "Imaging angle",
            FieldKind::Integer(NumericBounds::NONE),
            DefaultValue::Int(0),
        ),
        FieldDescriptor::defaulted(
            "imaging_angle_unit",
            "Imaging angle unit",
            FieldKind::Enum(&ANGLE_UNIT),
            DefaultValue::Str("degree"),
        ),
    ),
};

/// Description of acquisition tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcquisitionTile {
    pub coordinate_transformations: Vec<CoordinateTransform>,
    pub file_name: Option<String>,
    pub channel: Channel,
    pub notes: Option<String>,
    pub imaging_angle: i64,
    pub imaging_angle_unit: AngleUnit,
}

impl Record for AcquisitionTile {
    const SCHEMA: &'static RecordSchema = &ACQUISITION_TILE;
}
