//! Scene Model
//!
//! Typed view of the design tree handed over by the host. The wire format is the
//! host's JSON serialization of its node objects: camelCase keys, SCREAMING_SNAKE
//! enum values and a `type` tag selecting the node kind.
//!
//! Kinds the transpiler does not generate code for (vectors, stars, slices...) land in
//! [`SceneNode::Unsupported`] instead of failing the whole tree.

use indexmap::IndexMap;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use std::fmt;

use crate::error::{Error, Result};

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAINTS & EFFECTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Normalized (0–1) RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Normalized (0–1) RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_one")]
    pub a: f64,
}

impl Rgb {
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableAlias {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BoundVariables {
    #[serde(default)]
    pub color: Option<VariableAlias>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: Rgb,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default)]
    pub bound_variables: Option<BoundVariables>,
}

impl SolidPaint {
    /// Id of the design token bound to this paint's color, if any.
    pub fn bound_color_id(&self) -> Option<&str> {
        self.bound_variables
            .as_ref()
            .and_then(|b| b.color.as_ref())
            .map(|alias| alias.id.as_str())
    }
}

/// A fill or stroke entry. Only solid paints carry anything the generators use;
/// gradients, images and video all collapse into `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shadow {
    pub color: Rgba,
    pub offset: Vector,
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(Shadow),
    #[serde(other)]
    Other,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED NODE PARTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Fields every supported node kind carries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBase {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_one")]
    pub opacity: f64,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl NodeBase {
    /// Geometry precondition checked before any code is generated for the node.
    pub fn check_geometry(&self) -> Result<()> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("rotation", self.rotation),
            ("opacity", self.opacity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(self.geometry_error(format!("{} is not a finite number", field)));
            }
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(self.geometry_error(format!(
                "negative size {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn geometry_error(&self, reason: String) -> Error {
        Error::InvalidGeometry {
            id: self.id.clone(),
            name: self.name.clone(),
            reason,
        }
    }
}

/// Per-edge stroke weights. Edges the host left out fall back to the uniform weight,
/// which reads as `0` when the host reports it mixed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeWeights {
    #[serde(default)]
    pub stroke_weight: Mixed<f64>,
    #[serde(default)]
    pub stroke_top_weight: Option<f64>,
    #[serde(default)]
    pub stroke_right_weight: Option<f64>,
    #[serde(default)]
    pub stroke_bottom_weight: Option<f64>,
    #[serde(default)]
    pub stroke_left_weight: Option<f64>,
}

impl StrokeWeights {
    pub fn uniform(&self) -> f64 {
        self.stroke_weight.uniform_or(0.0)
    }

    pub fn top(&self) -> f64 {
        self.stroke_top_weight.unwrap_or_else(|| self.uniform())
    }

    pub fn right(&self) -> f64 {
        self.stroke_right_weight.unwrap_or_else(|| self.uniform())
    }

    pub fn bottom(&self) -> f64 {
        self.stroke_bottom_weight.unwrap_or_else(|| self.uniform())
    }

    pub fn left(&self) -> f64 {
        self.stroke_left_weight.unwrap_or_else(|| self.uniform())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    #[serde(default)]
    pub corner_radius: Mixed<f64>,
    #[serde(default)]
    pub top_left_radius: Option<f64>,
    #[serde(default)]
    pub top_right_radius: Option<f64>,
    #[serde(default)]
    pub bottom_right_radius: Option<f64>,
    #[serde(default)]
    pub bottom_left_radius: Option<f64>,
}

impl CornerRadii {
    /// Radii in CSS shorthand order: top-left, top-right, bottom-right, bottom-left.
    pub fn clockwise(&self) -> [f64; 4] {
        let uniform = self.corner_radius.uniform_or(0.0);
        [
            self.top_left_radius.unwrap_or(uniform),
            self.top_right_radius.unwrap_or(uniform),
            self.bottom_right_radius.unwrap_or(uniform),
            self.bottom_left_radius.unwrap_or(uniform),
        ]
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUTOLAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    Horizontal,
    Vertical,
    /// Also any layout mode this crate does not know.
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    #[default]
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    #[default]
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisSizingMode {
    Fixed,
    #[default]
    Auto,
}

/// How a node sizes itself along one axis inside an autolayout parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutSizing {
    Fixed,
    #[default]
    Hug,
    Fill,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLayout {
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default)]
    pub layout_wrap: LayoutWrap,
    #[serde(default)]
    pub primary_axis_align_items: AxisAlign,
    #[serde(default)]
    pub counter_axis_align_items: AxisAlign,
    #[serde(default)]
    pub primary_axis_sizing_mode: AxisSizingMode,
    #[serde(default)]
    pub counter_axis_sizing_mode: AxisSizingMode,
    #[serde(default)]
    pub layout_sizing_horizontal: LayoutSizing,
    #[serde(default)]
    pub layout_sizing_vertical: LayoutSizing,
    #[serde(default)]
    pub padding_top: f64,
    #[serde(default)]
    pub padding_right: f64,
    #[serde(default)]
    pub padding_bottom: f64,
    #[serde(default)]
    pub padding_left: f64,
    #[serde(default)]
    pub item_spacing: f64,
    #[serde(default)]
    pub counter_axis_spacing: Option<f64>,
    #[serde(default)]
    pub min_width: Option<f64>,
    #[serde(default)]
    pub max_width: Option<f64>,
    #[serde(default)]
    pub min_height: Option<f64>,
    #[serde(default)]
    pub max_height: Option<f64>,
}

impl AutoLayout {
    pub fn is_enabled(&self) -> bool {
        self.layout_mode != LayoutMode::None
    }
}

/// Everything a frame-like container (frame, component, instance) carries besides
/// the base fields and its children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameProps {
    #[serde(flatten)]
    pub stroke: StrokeWeights,
    #[serde(flatten)]
    pub corners: CornerRadii,
    #[serde(default)]
    pub clips_content: bool,
    #[serde(flatten)]
    pub layout: AutoLayout,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// A property the host may report as mixed: text styles that differ across
/// characters, or a uniform stroke weight or corner radius whose edges differ.
///
/// The host cannot serialize its "mixed" marker, so a missing field, `null` and the
/// string `"mixed"` all read as [`Mixed::Mixed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mixed<T> {
    Uniform(T),
    Mixed,
}

impl<T> Default for Mixed<T> {
    fn default() -> Self {
        Mixed::Mixed
    }
}

impl<T> Mixed<T> {
    pub fn uniform_or(self, fallback: T) -> T {
        match self {
            Mixed::Uniform(value) => value,
            Mixed::Mixed => fallback,
        }
    }

    /// The uniform value, or whatever `requery` finds for the first character.
    pub fn or_first_char(self, requery: impl FnOnce() -> Option<T>) -> Option<T> {
        match self {
            Mixed::Uniform(value) => Some(value),
            Mixed::Mixed => requery(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Mixed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Value(T),
            Marker(Option<String>),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Value(value) => Ok(Mixed::Uniform(value)),
            Repr::Marker(None) => Ok(Mixed::Mixed),
            Repr::Marker(Some(marker)) if marker.eq_ignore_ascii_case("mixed") => Ok(Mixed::Mixed),
            Repr::Marker(Some(other)) => Err(D::Error::custom(format!(
                "expected a value or the mixed marker, found '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    Auto,
    Percent { value: f64 },
    Pixels { value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacing {
    Percent { value: f64 },
    Pixels { value: f64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justified => "justify",
        }
    }
}

/// Uniformly styled run of characters `[start, end)`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub line_height: Option<LineHeight>,
    #[serde(default)]
    pub letter_spacing: Option<LetterSpacing>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default)]
    pub characters: String,
    #[serde(default)]
    pub font_size: Mixed<f64>,
    #[serde(default)]
    pub font_weight: Mixed<f64>,
    #[serde(default)]
    pub line_height: Mixed<LineHeight>,
    #[serde(default)]
    pub letter_spacing: Mixed<LetterSpacing>,
    #[serde(default)]
    pub text_align_horizontal: TextAlign,
    #[serde(default)]
    pub styled_segments: Vec<TextSegment>,
}

impl TextNode {
    /// Style of the range `[0, 1)`, i.e. the first character.
    pub fn first_char(&self) -> Option<&TextSegment> {
        self.styled_segments
            .iter()
            .find(|segment| segment.start == 0 && segment.end > 0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════════

/// Value of one instance property. Variant properties arrive as strings
/// (`"true"`, `"primary"`), boolean properties as booleans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// Boolean reading shared by boolean and `"true"`/`"false"` variant properties.
    pub fn is_true(&self) -> bool {
        match self {
            PropertyValue::Bool(b) => *b,
            PropertyValue::Number(n) => *n != 0.0,
            PropertyValue::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Number(n) => f.write_str(&crate::style::js_number(*n)),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentProperty {
    pub value: PropertyValue,
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(flatten)]
    pub props: FrameProps,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(flatten)]
    pub stroke: StrokeWeights,
    #[serde(flatten)]
    pub corners: CornerRadii,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(flatten)]
    pub props: FrameProps,
    #[serde(default)]
    pub component_properties: IndexMap<String, ComponentProperty>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
    #[serde(default)]
    pub exposed_instances: Vec<SceneNode>,
}

/// One node of the design tree, tagged by kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneNode {
    Frame(FrameNode),
    Component(FrameNode),
    ComponentSet(FrameNode),
    Instance(InstanceNode),
    Group(GroupNode),
    Text(TextNode),
    Rectangle(ShapeNode),
    Ellipse(ShapeNode),
    Line(ShapeNode),
    #[serde(other)]
    Unsupported,
}

impl SceneNode {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::InvalidNode { source })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|source| Error::InvalidNode { source })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SceneNode::Frame(_) => "FRAME",
            SceneNode::Component(_) => "COMPONENT",
            SceneNode::ComponentSet(_) => "COMPONENT_SET",
            SceneNode::Instance(_) => "INSTANCE",
            SceneNode::Group(_) => "GROUP",
            SceneNode::Text(_) => "TEXT",
            SceneNode::Rectangle(_) => "RECTANGLE",
            SceneNode::Ellipse(_) => "ELLIPSE",
            SceneNode::Line(_) => "LINE",
            SceneNode::Unsupported => "UNSUPPORTED",
        }
    }

    pub fn base(&self) -> Option<&NodeBase> {
        match self {
            SceneNode::Frame(n) | SceneNode::Component(n) | SceneNode::ComponentSet(n) => {
                Some(&n.base)
            }
            SceneNode::Instance(n) => Some(&n.base),
            SceneNode::Group(n) => Some(&n.base),
            SceneNode::Text(n) => Some(&n.base),
            SceneNode::Rectangle(n) | SceneNode::Ellipse(n) | SceneNode::Line(n) => Some(&n.base),
            SceneNode::Unsupported => None,
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        match self {
            SceneNode::Frame(n) | SceneNode::Component(n) | SceneNode::ComponentSet(n) => {
                &n.children
            }
            SceneNode::Instance(n) => &n.children,
            SceneNode::Group(n) => &n.children,
            _ => &[],
        }
    }

    pub fn is_visible(&self) -> bool {
        self.base().map_or(true, |b| b.visible)
    }

    pub fn as_instance(&self) -> Option<&InstanceNode> {
        match self {
            SceneNode::Instance(n) => Some(n),
            _ => None,
        }
    }

    /// Instance with the given component name.
    pub fn is_instance_named(&self, name: &str) -> bool {
        self.as_instance().is_some_and(|n| n.base.name == name)
    }
}
