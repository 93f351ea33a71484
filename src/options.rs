//! Configuration options for writing and parsing config files.
//!
//! This module provides:
//!
//! - [`Mode`]: which values are written and whether doc comments are included
//! - [`WriteOptions`]: mode plus comment layout
//! - [`ParseOptions`]: how strictly a document must match its record type
//!
//! ## Examples
//!
//! ```rust
//! use sconf::{record, to_string_with_options, Mode, WriteOptions};
//!
//! record! {
//!     #[derive(Default)]
//!     pub struct Data {
//!         #[sconf(optional, doc = "Port to listen on.")]
//!         pub port: u16,
//!     }
//! }
//!
//! let options = WriteOptions::new().with_mode(Mode::Full).with_wrap_width(40);
//! let text = to_string_with_options(&Data::default(), &options).unwrap();
//! assert_eq!(text, "# Port to listen on. (optional)\nport: 0\n");
//! ```

/// Which values to write, and whether to write doc comments.
///
/// # Examples
///
/// ```rust
/// use sconf::Mode;
///
/// assert!(Mode::Full.keep_zero());
/// assert!(Mode::Full.docs());
/// assert!(!Mode::Compact.docs());
/// assert!(Mode::Documented.docs());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every field is written, including zero values, with doc comments.
    /// Empty collections get one example element. This is what
    /// [`describe`](crate::describe) produces.
    Full,
    /// Zero optional fields are left out and no comments are written.
    #[default]
    Compact,
    /// Like [`Mode::Compact`], with doc comments.
    Documented,
}

impl Mode {
    /// Returns `true` if zero values are written too.
    #[must_use]
    pub const fn keep_zero(self) -> bool {
        matches!(self, Mode::Full)
    }

    /// Returns `true` if doc comments are written.
    #[must_use]
    pub const fn docs(self) -> bool {
        matches!(self, Mode::Full | Mode::Documented)
    }
}

/// Options for writing a config file.
///
/// # Examples
///
/// ```rust
/// use sconf::{Mode, WriteOptions};
///
/// let options = WriteOptions::new();
/// assert_eq!(options.mode, Mode::Compact);
/// assert_eq!(options.wrap_width, 80);
///
/// let options = WriteOptions::documented();
/// assert_eq!(options.mode, Mode::Documented);
/// ```
#[derive(Clone, Debug)]
pub struct WriteOptions {
    pub mode: Mode,
    /// Maximum width of a doc comment line, counting the `# ` prefix but not
    /// indentation.
    pub wrap_width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            mode: Mode::default(),
            wrap_width: 80,
        }
    }
}

impl WriteOptions {
    /// Creates default options: compact mode, 80 column comments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a full example config, see [`Mode::Full`].
    #[must_use]
    pub fn full() -> Self {
        Self::new().with_mode(Mode::Full)
    }

    /// Options for a compact config with doc comments, see [`Mode::Documented`].
    #[must_use]
    pub fn documented() -> Self {
        Self::new().with_mode(Mode::Documented)
    }

    /// Sets the write mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the width doc comments are wrapped at.
    #[must_use]
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }
}

/// Options for parsing a config file.
///
/// By default, fields missing from the document keep their zero value. With
/// [`ParseOptions::strict`], every non-optional field must be present.
///
/// # Examples
///
/// ```rust
/// use sconf::{from_str_with_options, record, Error, ParseOptions};
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Data {
///         pub name: String,
///         #[sconf(optional)]
///         pub port: u16,
///     }
/// }
///
/// let lenient: Data = from_str_with_options("port: 1", &ParseOptions::new()).unwrap();
/// assert_eq!(lenient.name, "");
///
/// let err = from_str_with_options::<Data>("port: 1", &ParseOptions::strict()).unwrap_err();
/// assert!(matches!(err.unpositioned(), Error::MissingField(name) if name == "name"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub require_fields: bool,
}

impl ParseOptions {
    /// Creates default options: absent fields are zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject documents missing a required field.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            require_fields: true,
        }
    }

    /// Sets whether non-optional fields must be present.
    #[must_use]
    pub fn with_require_fields(mut self, require: bool) -> Self {
        self.require_fields = require;
        self
    }
}
