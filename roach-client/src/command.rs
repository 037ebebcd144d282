//! Printer command model and wire encoding
//!
//! A [`Command`] is one requested printer operation: a wire operation name
//! plus its ordered arguments. Each variant carries statically typed fields,
//! but the encoding stays generic (a two-element `[name, args]` pair with
//! heterogeneous argument values), so the service can grow new operations
//! without a transport change on this side.

use base64::Engine;
use serde::Serialize;
use serde::ser::{SerializeTuple, Serializer};

/// One wire argument value.
///
/// Arguments the caller omitted travel as `Null` and the service applies its
/// own default; the client never invents one. Binary payloads travel as
/// base64 text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Record(serde_json::Value),
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(data) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data))
            }
            Value::List(items) => serializer.collect_seq(items),
            Value::Record(v) => v.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(data: Vec<u8>) -> Self {
        Value::Bytes(data)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// One cell of a custom table row.
///
/// Layout fields are forwarded untouched; the service computes column
/// widths and wrapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl TableCell {
    /// Create a cell with the given text and no layout hints.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: None,
            width: None,
            style: None,
        }
    }

    /// Set the cell alignment (e.g. "LEFT", "CENTER", "RIGHT").
    pub fn with_align(mut self, align: impl Into<String>) -> Self {
        self.align = Some(align.into());
        self
    }

    /// Set the cell width as a fraction of the paper width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the cell text style (e.g. "B" for bold).
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Options for a custom table command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<(u8, u8)>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text encoding for the table content.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Set the (width, height) text size pair.
    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.size = Some((width, height));
        self
    }
}

/// Options for a barcode command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarcodeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(rename = "includeParity", skip_serializing_if = "Option::is_none")]
    pub include_parity: Option<bool>,
}

impl BarcodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the HRI text position (e.g. "OFF", "ABV", "BLW", "BTH").
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_include_parity(mut self, include: bool) -> Self {
        self.include_parity = Some(include);
        self
    }
}

/// Options for a qrcode-as-image command.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QrImageOptions {
    /// Image format (e.g. "png").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Raster mode (e.g. "dhdw").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl QrImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

fn record<T: Serialize>(value: &T) -> Value {
    Value::Record(serde_json::to_value(value).expect("Failed to serialize option record"))
}

/// One queued printer operation.
///
/// Immutable once constructed; the queue only ever appends.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Model { model: Option<String> },
    CharacterCodeTable { table: u8 },
    MarginBottom { size: u8 },
    MarginLeft { size: u8 },
    MarginRight { size: u8 },
    Content { content: String },
    Println { content: String },
    NewLine,
    Text { content: String, encoding: Option<String> },
    DrawLine { character: Option<char> },
    Table { cells: Vec<String>, encoding: Option<String> },
    TableCustom { rows: Vec<TableCell>, options: TableOptions },
    PureText { content: String, encoding: Option<String> },
    Encode { encoding: String },
    Feed { lines: u8 },
    Control { sequence: String },
    Align { alignment: String },
    Font { family: String },
    Style { style: String },
    Size { width: u8, height: u8 },
    Spacing { chars: Option<u8> },
    LineSpace { dots: Option<u8> },
    Hardware { command: String },
    Barcode { code: String, kind: String, options: Option<BarcodeOptions> },
    QrCode { code: String, version: Option<u8>, level: Option<String>, size: Option<u8> },
    QrImage { content: String, options: Option<QrImageOptions> },
    Image { data: Vec<u8>, density: Option<String> },
    Raster { data: Vec<u8>, mode: Option<String> },
    CashDraw { pin: u8 },
    Beep { count: u8, duration: u8 },
    Cut { partial: Option<bool>, feed: Option<u8> },
    Color { color: u8 },
    ReverseColors { enabled: bool },
    Raw { data: Vec<u8> },
    /// Synthetic terminal marker closing a batch.
    Flush,
}

impl Command {
    /// Wire operation identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Model { .. } => "model",
            Command::CharacterCodeTable { .. } => "setCharacterCodeTable",
            Command::MarginBottom { .. } => "marginBottom",
            Command::MarginLeft { .. } => "marginLeft",
            Command::MarginRight { .. } => "marginRight",
            Command::Content { .. } => "content",
            Command::Println { .. } => "println",
            Command::NewLine => "newLine",
            Command::Text { .. } => "text",
            Command::DrawLine { .. } => "drawLine",
            Command::Table { .. } => "table",
            Command::TableCustom { .. } => "tableCustom",
            Command::PureText { .. } => "pureText",
            Command::Encode { .. } => "encode",
            Command::Feed { .. } => "feed",
            Command::Control { .. } => "control",
            Command::Align { .. } => "align",
            Command::Font { .. } => "font",
            Command::Style { .. } => "style",
            Command::Size { .. } => "size",
            Command::Spacing { .. } => "spacing",
            Command::LineSpace { .. } => "lineSpace",
            Command::Hardware { .. } => "hardware",
            Command::Barcode { .. } => "barcode",
            Command::QrCode { .. } => "qrcode",
            Command::QrImage { .. } => "qrimage",
            Command::Image { .. } => "image",
            Command::Raster { .. } => "raster",
            Command::CashDraw { .. } => "cashdraw",
            Command::Beep { .. } => "beep",
            Command::Cut { .. } => "cut",
            Command::Color { .. } => "color",
            Command::ReverseColors { .. } => "setReverseColors",
            Command::Raw { .. } => "raw",
            Command::Flush => "flush",
        }
    }

    /// Ordered wire arguments, fixed arity per operation.
    pub fn args(&self) -> Vec<Value> {
        match self {
            Command::Model { model } => vec![model.clone().into()],
            Command::CharacterCodeTable { table } => vec![(*table).into()],
            Command::MarginBottom { size }
            | Command::MarginLeft { size }
            | Command::MarginRight { size } => vec![(*size).into()],
            Command::Content { content } | Command::Println { content } => {
                vec![content.clone().into()]
            }
            Command::NewLine | Command::Flush => Vec::new(),
            Command::Text { content, encoding } | Command::PureText { content, encoding } => {
                vec![content.clone().into(), encoding.clone().into()]
            }
            Command::DrawLine { character } => vec![(*character).into()],
            Command::Table { cells, encoding } => vec![
                Value::List(cells.iter().cloned().map(Value::Text).collect()),
                encoding.clone().into(),
            ],
            Command::TableCustom { rows, options } => vec![
                Value::List(rows.iter().map(record).collect()),
                record(options),
            ],
            Command::Encode { encoding } => vec![encoding.clone().into()],
            Command::Feed { lines } => vec![(*lines).into()],
            Command::Control { sequence } => vec![sequence.clone().into()],
            Command::Align { alignment } => vec![alignment.clone().into()],
            Command::Font { family } => vec![family.clone().into()],
            Command::Style { style } => vec![style.clone().into()],
            Command::Size { width, height } => vec![(*width).into(), (*height).into()],
            Command::Spacing { chars } => vec![(*chars).into()],
            Command::LineSpace { dots } => vec![(*dots).into()],
            Command::Hardware { command } => vec![command.clone().into()],
            Command::Barcode { code, kind, options } => vec![
                code.clone().into(),
                kind.clone().into(),
                match options {
                    Some(o) => record(o),
                    None => Value::Null,
                },
            ],
            Command::QrCode { code, version, level, size } => vec![
                code.clone().into(),
                (*version).into(),
                level.clone().into(),
                (*size).into(),
            ],
            Command::QrImage { content, options } => vec![
                content.clone().into(),
                match options {
                    Some(o) => record(o),
                    None => Value::Null,
                },
            ],
            Command::Image { data, density } => {
                vec![Value::Bytes(data.clone()), density.clone().into()]
            }
            Command::Raster { data, mode } => {
                vec![Value::Bytes(data.clone()), mode.clone().into()]
            }
            Command::CashDraw { pin } => vec![(*pin).into()],
            Command::Beep { count, duration } => vec![(*count).into(), (*duration).into()],
            Command::Cut { partial, feed } => vec![(*partial).into(), (*feed).into()],
            Command::Color { color } => vec![(*color).into()],
            Command::ReverseColors { enabled } => vec![(*enabled).into()],
            Command::Raw { data } => vec![Value::Bytes(data.clone())],
        }
    }
}

impl Serialize for Command {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.name())?;
        pair.serialize_element(&self.args())?;
        pair.end()
    }
}
