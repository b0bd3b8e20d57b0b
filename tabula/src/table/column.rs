//! Column definitions.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ParseWidthError;

/// Column width: absolute pixels or a share of the table width.
///
/// Serializes as a number of pixels (`100`) or a percentage string (`"20%"`).
/// Strings with a `px` suffix are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWidth", into = "RawWidth")]
pub enum ColumnWidth {
    /// Fixed width in pixels.
    Px(f64),
    /// Percentage of the table width (`20.0` is 20%).
    Percent(f64),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Px(100.0)
    }
}

impl ColumnWidth {
    /// Parse a CSS-like width: `"120"`, `"120px"` or `"20%"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let width = if let Some(percent) = s.strip_suffix('%') {
            ColumnWidth::Percent(percent.trim().parse().ok()?)
        } else {
            let px = s.strip_suffix("px").unwrap_or(s);
            ColumnWidth::Px(px.trim().parse().ok()?)
        };
        width.is_valid().then_some(width)
    }

    /// A width is valid when it is finite and not negative.
    pub fn is_valid(&self) -> bool {
        let (ColumnWidth::Px(v) | ColumnWidth::Percent(v)) = *self;
        v.is_finite() && v >= 0.0
    }

    /// Resolve to pixels against the full table width.
    pub fn resolve(&self, total_width: f64) -> f64 {
        match *self {
            ColumnWidth::Px(px) => px,
            ColumnWidth::Percent(percent) => total_width * percent / 100.0,
        }
    }
}

/// Renders the CSS value: `100px` or `20%`.
impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Px(px) => write!(f, "{px}px"),
            ColumnWidth::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

impl FromStr for ColumnWidth {
    type Err = ParseWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnWidth::parse(s).ok_or_else(|| ParseWidthError::new(s))
    }
}

impl TryFrom<&str> for ColumnWidth {
    type Error = ParseWidthError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<f64> for ColumnWidth {
    fn from(px: f64) -> Self {
        ColumnWidth::Px(px)
    }
}

impl From<u32> for ColumnWidth {
    fn from(px: u32) -> Self {
        ColumnWidth::Px(px as f64)
    }
}

/// Wire form of [`ColumnWidth`]: a pixel number or a width string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawWidth {
    Px(f64),
    Text(String),
}

impl TryFrom<RawWidth> for ColumnWidth {
    type Error = ParseWidthError;

    fn try_from(raw: RawWidth) -> Result<Self, Self::Error> {
        match raw {
            RawWidth::Px(px) => {
                let width = ColumnWidth::Px(px);
                if width.is_valid() {
                    Ok(width)
                } else {
                    Err(ParseWidthError::new(width.to_string()))
                }
            }
            RawWidth::Text(text) => text.parse(),
        }
    }
}

impl From<ColumnWidth> for RawWidth {
    fn from(width: ColumnWidth) -> Self {
        match width {
            ColumnWidth::Px(px) => RawWidth::Px(px),
            percent @ ColumnWidth::Percent(_) => RawWidth::Text(percent.to_string()),
        }
    }
}

/// Column configuration.
///
/// A column names the row field it shows. Header text, width, position and
/// sortability are optional. Cell rendering belongs to the host; `class` is
/// carried through for it untouched.
///
/// # Examples
///
/// ```
/// use tabula::{Column, ColumnWidth};
///
/// let columns = vec![
///     Column::new("id").width(60u32).unsortable(),
///     Column::new("name").header("Name").width(ColumnWidth::Percent(40.0)),
///     Column::new("email").width_str("25%"),
///     Column::new("created").position(0),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Field name, unique within a table.
    pub name: String,
    /// Header text. Falls back to the name.
    pub header: Option<String>,
    /// Width.
    pub width: ColumnWidth,
    /// Extra class for the column's cells.
    pub class: String,
    /// Declared position.
    pub position: Option<i32>,
    /// Position set by a committed drag. Wins over `position`.
    pub overridden_position: Option<i32>,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Width string given to [`width_str`](Column::width_str) that did not parse.
    #[serde(skip)]
    pub(crate) rejected_width: Option<String>,
}

impl Column {
    /// Create a sortable column for a field, 100px wide.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: None,
            width: ColumnWidth::default(),
            class: String::new(),
            position: None,
            overridden_position: None,
            sortable: true,
            rejected_width: None,
        }
    }

    /// Set the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the width.
    pub fn width(mut self, width: impl Into<ColumnWidth>) -> Self {
        self.width = width.into();
        self.rejected_width = None;
        self
    }

    /// Set the width from a string: `"120"`, `"120px"` or `"20%"`.
    ///
    /// A string that does not parse keeps the previous width and makes
    /// [`TableBuilder::build`](super::TableBuilder::build) fail with
    /// [`TableError::InvalidWidth`](crate::TableError::InvalidWidth).
    pub fn width_str(mut self, width: &str) -> Self {
        match width.parse() {
            Ok(parsed) => {
                self.width = parsed;
                self.rejected_width = None;
            }
            Err(_) => self.rejected_width = Some(width.to_string()),
        }
        self
    }

    /// Set the cell class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Set the declared position.
    pub fn position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// Make the column not sortable.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Header text to display.
    pub fn display_header(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.name)
    }

    /// Width as a CSS value.
    pub fn css_width(&self) -> String {
        self.width.to_string()
    }

    /// The position used for ordering: overridden, else declared.
    pub fn effective_position(&self) -> Option<i32> {
        self.overridden_position.or(self.position)
    }
}
